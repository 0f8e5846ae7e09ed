//! Phase 2: fills the bodies of the stubs created by phase 1.

use tracing::debug;

use crate::model::{ClassDecl, CompilationUnit, Expr};
use crate::symbols::{Body, BodyState, SymbolArena, SymbolKind, SynthesizedSymbol};
use crate::well_known::KEY;

/// Key that `arg` reads and `createScreen` writes under.
///
/// The owner's qualified name, unless the user declared `KEY` with a string literal, in which
/// case that literal is what the container actually exposes.
#[must_use]
pub fn lookup_key(decl: &ClassDecl) -> String {
    match decl.container_member(KEY).and_then(|m| m.value.as_ref()) {
        Some(Expr::Str { value }) => value.clone(),
        _ => decl.qualified_name().to_string(),
    }
}

/// Fills every stub in `arena`. Already filled symbols are left alone.
///
/// Returns how many bodies were filled.
pub fn synthesize(unit: &CompilationUnit, arena: &mut SymbolArena) -> usize {
    let mut filled = 0;
    for id in arena.ids() {
        let Some(symbol) = arena.get(id) else {
            continue;
        };
        if symbol.is_filled() {
            continue;
        }
        let Some(decl) = unit.declaration(symbol.owner) else {
            debug!(owner = %symbol.owner_name, "owner vanished from unit, stub left unfilled");
            continue;
        };
        let body = body_for(symbol, decl);
        if let Some(symbol) = arena.get_mut(id) {
            symbol.body = BodyState::Filled(body);
            filled += 1;
        }
    }
    filled
}

fn body_for(symbol: &SynthesizedSymbol, decl: &ClassDecl) -> Body {
    match symbol.kind {
        SymbolKind::Container => Body::Empty,
        SymbolKind::Constant => Body::StringLiteral {
            value: decl.qualified_name().to_string(),
        },
        SymbolKind::AccessorProperty => match &symbol.declared_type {
            Some(ty) => Body::ReadArgument {
                key: lookup_key(decl),
                ty: ty.name.clone(),
                nullable: ty.nullable,
            },
            None => Body::Empty,
        },
        SymbolKind::FactoryFunction => Body::CreateScreen {
            key: lookup_key(decl),
            owner: decl.qualified_name(),
            parameter: symbol.parameters.first().map(|p| p.ty.clone()),
        },
        SymbolKind::ConditionalAccessorProperty => match &symbol.declared_type {
            Some(ty) => Body::LazyBind {
                binding: ty.name.clone(),
            },
            None => Body::Empty,
        },
    }
}
