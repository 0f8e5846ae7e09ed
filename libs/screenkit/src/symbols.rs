//! Synthesized symbols and the arena both phases operate on.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{DeclId, QualifiedName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Container,
    Constant,
    AccessorProperty,
    FactoryFunction,
    ConditionalAccessorProperty,
}

/// Where a symbol lives: directly on the owner or inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Owner,
    Container,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    pub name: QualifiedName,
    pub nullable: bool,
}

impl TypeRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: QualifiedName::new(name),
            nullable: false,
        }
    }

    #[must_use]
    pub fn of(name: &QualifiedName, nullable: bool) -> Self {
        Self {
            name: name.clone(),
            nullable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
    /// Defaults to null when omitted.
    pub default_null: bool,
}

/// Executable body filled in by the second phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "body", rename_all = "snake_case")]
pub enum Body {
    /// Containers have no body of their own.
    Empty,
    StringLiteral { value: String },
    ReadArgument {
        key: String,
        ty: QualifiedName,
        nullable: bool,
    },
    CreateScreen {
        key: String,
        owner: QualifiedName,
        parameter: Option<TypeRef>,
    },
    LazyBind { binding: QualifiedName },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "body", rename_all = "snake_case")]
pub enum BodyState {
    Stub,
    Filled(Body),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesizedSymbol {
    pub id: SymbolId,
    #[serde(skip)]
    pub owner: DeclId,
    #[serde(rename = "owner")]
    pub owner_name: QualifiedName,
    pub scope: Scope,
    pub name: String,
    pub kind: SymbolKind,
    /// Property/constant type, or the return type of a function. `None` for containers.
    pub declared_type: Option<TypeRef>,
    pub parameters: Vec<Parameter>,
    pub visibility: Visibility,
    pub body: BodyState,
}

impl SynthesizedSymbol {
    #[must_use]
    pub fn is_filled(&self) -> bool {
        matches!(self.body, BodyState::Filled(_))
    }

    #[must_use]
    pub fn filled_body(&self) -> Option<&Body> {
        match &self.body {
            BodyState::Filled(body) => Some(body),
            BodyState::Stub => None,
        }
    }
}

/// Fields of a symbol about to be pushed; the arena assigns the id and starts it as a stub.
#[derive(Debug, Clone)]
pub struct SymbolSpec {
    pub owner: DeclId,
    pub owner_name: QualifiedName,
    pub scope: Scope,
    pub name: String,
    pub kind: SymbolKind,
    pub declared_type: Option<TypeRef>,
    pub parameters: Vec<Parameter>,
    pub visibility: Visibility,
}

/// Session-owned symbol storage, unique per `(owner, scope, name)`.
#[derive(Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<SynthesizedSymbol>,
    by_name: HashMap<(DeclId, Scope, String), SymbolId>,
}

impl SymbolArena {
    /// Adds a stub unless the name is already taken in that scope.
    pub fn insert(&mut self, spec: SymbolSpec) -> Option<SymbolId> {
        let key = (spec.owner, spec.scope, spec.name.clone());
        if self.by_name.contains_key(&key) {
            return None;
        }
        let id = SymbolId(self.symbols.len());
        self.symbols.push(SynthesizedSymbol {
            id,
            owner: spec.owner,
            owner_name: spec.owner_name,
            scope: spec.scope,
            name: spec.name,
            kind: spec.kind,
            declared_type: spec.declared_type,
            parameters: spec.parameters,
            visibility: spec.visibility,
            body: BodyState::Stub,
        });
        self.by_name.insert(key, id);
        Some(id)
    }

    #[must_use]
    pub fn find(&self, owner: DeclId, scope: Scope, name: &str) -> Option<&SynthesizedSymbol> {
        self.by_name
            .get(&(owner, scope, name.to_owned()))
            .and_then(|id| self.symbols.get(id.0))
    }

    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<&SynthesizedSymbol> {
        self.symbols.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: SymbolId) -> Option<&mut SynthesizedSymbol> {
        self.symbols.get_mut(id.0)
    }

    pub fn for_owner(&self, owner: DeclId) -> impl Iterator<Item = &SynthesizedSymbol> {
        self.symbols.iter().filter(move |s| s.owner == owner)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SynthesizedSymbol> {
        self.symbols.iter()
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = SymbolId> + use<> {
        (0..self.symbols.len()).map(SymbolId)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn spec(scope: Scope, name: &str) -> SymbolSpec {
        SymbolSpec {
            owner: DeclId(0),
            owner_name: "app.Home".into(),
            scope,
            name: name.to_owned(),
            kind: SymbolKind::Constant,
            declared_type: Some(TypeRef::new("kotlin.String")),
            parameters: Vec::new(),
            visibility: Visibility::Public,
        }
    }

    #[test]
    fn names_are_unique_per_scope() {
        let mut arena = SymbolArena::default();
        assert!(arena.insert(spec(Scope::Container, "KEY")).is_some());
        assert!(arena.insert(spec(Scope::Container, "KEY")).is_none());
        assert!(arena.insert(spec(Scope::Owner, "KEY")).is_some());
        assert_eq!(arena.len(), 2);

        let key = arena.find(DeclId(0), Scope::Container, "KEY").unwrap();
        assert_eq!(key.body, BodyState::Stub);
        assert!(!key.is_filled());
    }
}
