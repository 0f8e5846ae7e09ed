//! Phase 1: signature-only stubs, merged against user declarations.

use tracing::debug;

use crate::model::{ClassDecl, DeclId};
use crate::scanner::CandidateDeclaration;
use crate::symbols::{
    Parameter, Scope, SymbolArena, SymbolId, SymbolKind, SymbolSpec, TypeRef, Visibility,
};
use crate::validator::Validation;
use crate::well_known::{ARG, CREATE_SCREEN, DEFAULT_CONTAINER, KEY, NAVIGATION_DESCRIPTOR, STRING};

/// Name of the container members go into: the user's, or the default one.
#[must_use]
pub fn container_name(decl: &ClassDecl) -> &str {
    decl.container
        .as_ref()
        .map_or(DEFAULT_CONTAINER, |c| c.name.as_str())
}

/// Whether `name` is already taken in `scope`, by the user or by an earlier synthesis.
#[must_use]
pub fn is_declared(
    decl_id: DeclId,
    decl: &ClassDecl,
    arena: &SymbolArena,
    scope: Scope,
    name: &str,
) -> bool {
    let by_user = match scope {
        Scope::Owner => decl.has_member(name),
        Scope::Container => decl.container_member(name).is_some(),
    };
    by_user || arena.find(decl_id, scope, name).is_some()
}

/// Emits the container, `KEY`, `arg` and `createScreen` stubs for one valid candidate.
///
/// Every emission is a name lookup first, so running this twice adds nothing the second time.
pub fn synthesize(
    candidate: &CandidateDeclaration,
    decl: &ClassDecl,
    validation: &Validation,
    arena: &mut SymbolArena,
) -> Vec<SymbolId> {
    let mut emitted = Vec::new();
    let owner = candidate.decl;
    let base = SymbolSpec {
        owner,
        owner_name: candidate.owner.clone(),
        scope: Scope::Container,
        name: String::new(),
        kind: SymbolKind::Container,
        declared_type: None,
        parameters: Vec::new(),
        visibility: Visibility::Public,
    };

    let container = container_name(decl);
    // A user member named like the default container leaves nowhere to put KEY and createScreen.
    let container_free = decl.container.is_some() || !decl.has_member(container);
    if !container_free {
        debug!(owner = %candidate.owner, container, "container name taken, skipping container members");
    }
    if decl.container.is_none() && container_free && arena.find(owner, Scope::Owner, container).is_none() {
        emitted.extend(arena.insert(SymbolSpec {
            scope: Scope::Owner,
            name: container.to_owned(),
            ..base.clone()
        }));
    }

    if container_free {
        if is_declared(owner, decl, arena, Scope::Container, KEY) {
            debug!(owner = %candidate.owner, member = KEY, "name taken, skipping");
        } else {
            emitted.extend(arena.insert(SymbolSpec {
                name: KEY.to_owned(),
                kind: SymbolKind::Constant,
                declared_type: Some(TypeRef::new(STRING)),
                ..base.clone()
            }));
        }
    }

    let argument = validation
        .argument
        .as_ref()
        .map(|name| TypeRef::of(name, candidate.marker.nullable()));

    if let Some(ty) = &argument {
        if is_declared(owner, decl, arena, Scope::Owner, ARG) {
            debug!(owner = %candidate.owner, member = ARG, "name taken, skipping");
        } else {
            emitted.extend(arena.insert(SymbolSpec {
                scope: Scope::Owner,
                name: ARG.to_owned(),
                kind: SymbolKind::AccessorProperty,
                declared_type: Some(ty.clone()),
                visibility: Visibility::Private,
                ..base.clone()
            }));
        }
    }

    if container_free {
        if is_declared(owner, decl, arena, Scope::Container, CREATE_SCREEN) {
            debug!(owner = %candidate.owner, member = CREATE_SCREEN, "name taken, skipping");
        } else {
            let parameters = argument
                .map(|ty| Parameter {
                    name: ARG.to_owned(),
                    default_null: ty.nullable,
                    ty,
                })
                .into_iter()
                .collect();
            emitted.extend(arena.insert(SymbolSpec {
                name: CREATE_SCREEN.to_owned(),
                kind: SymbolKind::FactoryFunction,
                declared_type: Some(TypeRef::new(NAVIGATION_DESCRIPTOR)),
                parameters,
                ..base
            }));
        }
    }

    emitted
}
