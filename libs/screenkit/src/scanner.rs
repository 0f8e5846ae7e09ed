//! Predicate scanner: one pass over the unit, O(1) membership afterwards.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::marker::MarkerAttribute;
use crate::model::{CompilationUnit, DeclId, QualifiedName, SourceLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateId(pub(crate) usize);

impl CandidateId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A declaration carrying the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDeclaration {
    pub id: CandidateId,
    pub decl: DeclId,
    pub owner: QualifiedName,
    pub marker: MarkerAttribute,
    pub location: SourceLocation,
}

/// Candidate arena plus the declaration index into it.
#[derive(Debug, Default)]
pub struct CandidateIndex {
    candidates: Vec<CandidateDeclaration>,
    by_decl: HashMap<DeclId, CandidateId>,
}

impl CandidateIndex {
    #[instrument(skip(unit), fields(unit = %unit.name()))]
    #[must_use]
    pub fn scan(unit: &CompilationUnit) -> Self {
        let mut index = Self::default();
        for (decl_id, decl) in unit.declarations() {
            let Some(literal) = MarkerAttribute::find(decl) else {
                continue;
            };
            let id = CandidateId(index.candidates.len());
            index.candidates.push(CandidateDeclaration {
                id,
                decl: decl_id,
                owner: decl.qualified_name(),
                marker: MarkerAttribute::parse(literal),
                location: decl.location.clone(),
            });
            index.by_decl.insert(decl_id, id);
        }
        debug!(
            declarations = unit.classes().len(),
            candidates = index.candidates.len(),
            "scan complete"
        );
        index
    }

    #[must_use]
    pub fn is_matched(&self, decl: DeclId) -> bool {
        self.by_decl.contains_key(&decl)
    }

    #[must_use]
    pub fn for_declaration(&self, decl: DeclId) -> Option<&CandidateDeclaration> {
        self.by_decl
            .get(&decl)
            .and_then(|id| self.candidates.get(id.0))
    }

    #[must_use]
    pub fn get(&self, id: CandidateId) -> Option<&CandidateDeclaration> {
        self.candidates.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateDeclaration> {
        self.candidates.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
