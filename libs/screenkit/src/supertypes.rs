//! Memoized, cycle-safe supertype queries.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

use crate::model::{CompilationUnit, QualifiedName};

/// Source of direct supertype edges.
pub trait TypeGraph: Send + Sync {
    /// Direct declared supertypes, `None` when the type cannot be resolved.
    fn direct_supertypes(&self, ty: &QualifiedName) -> Option<Vec<QualifiedName>>;

    fn contains(&self, ty: &QualifiedName) -> bool {
        self.direct_supertypes(ty).is_some()
    }
}

impl TypeGraph for CompilationUnit {
    fn direct_supertypes(&self, ty: &QualifiedName) -> Option<Vec<QualifiedName>> {
        self.supertypes_of(ty).map(<[QualifiedName]>::to_vec)
    }

    fn contains(&self, ty: &QualifiedName) -> bool {
        self.contains_type(ty)
    }
}

type Edges = Option<Arc<[QualifiedName]>>;

/// Answers "does `ty` transitively derive from `target`?" for one session.
///
/// Both caches are append-only. Two callers racing on the same entry compute the same value, so
/// inserting twice is harmless and reads never lock.
pub struct SupertypeResolver {
    graph: Arc<dyn TypeGraph>,
    edges: DashMap<QualifiedName, Edges>,
    results: DashMap<(QualifiedName, QualifiedName), bool>,
}

impl SupertypeResolver {
    #[must_use]
    pub fn new(graph: Arc<dyn TypeGraph>) -> Self {
        Self {
            graph,
            edges: DashMap::new(),
            results: DashMap::new(),
        }
    }

    #[must_use]
    pub fn graph(&self) -> &dyn TypeGraph {
        self.graph.as_ref()
    }

    /// Breadth-first walk over declared supertypes.
    ///
    /// Reflexive. Unknown types and cycles read as "not derived", never as errors.
    #[must_use]
    pub fn is_derived_from(&self, ty: &QualifiedName, target: &QualifiedName) -> bool {
        if ty == target {
            return true;
        }
        let cache_key = (ty.clone(), target.clone());
        if let Some(hit) = self.results.get(&cache_key) {
            return *hit;
        }

        let mut visited: HashSet<QualifiedName> = HashSet::from([ty.clone()]);
        let mut frontier: VecDeque<QualifiedName> = VecDeque::from([ty.clone()]);
        let mut found = false;

        'walk: while let Some(current) = frontier.pop_front() {
            let Some(supertypes) = self.edges_of(&current) else {
                trace!(ty = %current, "unresolved type, treated as non-matching");
                continue;
            };
            for supertype in supertypes.iter() {
                if supertype == target {
                    found = true;
                    break 'walk;
                }
                if visited.insert(supertype.clone()) {
                    frontier.push_back(supertype.clone());
                }
            }
        }

        trace!(%ty, %target, found, visited = visited.len(), "supertype walk finished");
        self.results.insert(cache_key, found);
        found
    }

    /// Number of memoized `(type, target)` answers.
    #[must_use]
    pub fn cached_results(&self) -> usize {
        self.results.len()
    }

    fn edges_of(&self, ty: &QualifiedName) -> Edges {
        if let Some(cached) = self.edges.get(ty) {
            return cached.clone();
        }
        let edges: Edges = self.graph.direct_supertypes(ty).map(Arc::from);
        self.edges.insert(ty.clone(), edges.clone());
        edges
    }
}

impl fmt::Debug for SupertypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupertypeResolver")
            .field("edges", &self.edges.len())
            .field("results", &self.results.len())
            .finish_non_exhaustive()
    }
}
