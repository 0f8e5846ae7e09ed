//! The `binding` property, generated only when every precondition holds.
//!
//! Missing preconditions are the common case (screens without a layout, builds without a
//! namespace), so suppression is logged at debug level and never reported as a diagnostic.

use tracing::debug;

use crate::config::ScreenConfig;
use crate::model::ClassDecl;
use crate::naming::{SymbolOracle, derive_target_type_name, extract_layout_id, resolve_namespaced_type};
use crate::scanner::CandidateDeclaration;
use crate::signatures::is_declared;
use crate::symbols::{Scope, SymbolArena, SymbolId, SymbolKind, SymbolSpec, TypeRef, Visibility};
use crate::validator::Validation;
use crate::well_known::BINDING;

pub struct BindingGenerator<'a> {
    config: &'a ScreenConfig,
    oracle: &'a dyn SymbolOracle,
}

impl<'a> BindingGenerator<'a> {
    #[must_use]
    pub fn new(config: &'a ScreenConfig, oracle: &'a dyn SymbolOracle) -> Self {
        Self { config, oracle }
    }

    pub fn generate(
        &self,
        candidate: &CandidateDeclaration,
        decl: &ClassDecl,
        validation: &Validation,
        arena: &mut SymbolArena,
    ) -> Option<SymbolId> {
        let owner = &candidate.owner;
        if !validation.on_controller {
            debug!(%owner, "binding suppressed: owner is not a controller");
            return None;
        }
        let Some(binding_namespace) = self.config.binding_namespace() else {
            debug!(%owner, "binding suppressed: no namespace configured");
            return None;
        };
        let Some(layout_id) = extract_layout_id(decl) else {
            debug!(%owner, "binding suppressed: no layout in delegation call");
            return None;
        };
        let type_name = derive_target_type_name(layout_id);
        let Some(binding) =
            resolve_namespaced_type(&type_name, Some(&binding_namespace), self.oracle)
        else {
            debug!(%owner, namespace = %binding_namespace, %type_name, "binding suppressed: type not found");
            return None;
        };
        if is_declared(candidate.decl, decl, arena, Scope::Owner, BINDING) {
            debug!(%owner, "binding suppressed: name taken");
            return None;
        }

        arena.insert(SymbolSpec {
            owner: candidate.decl,
            owner_name: owner.clone(),
            scope: Scope::Owner,
            name: BINDING.to_owned(),
            kind: SymbolKind::ConditionalAccessorProperty,
            declared_type: Some(TypeRef::of(&binding, false)),
            parameters: Vec::new(),
            visibility: Visibility::Private,
        })
    }
}
