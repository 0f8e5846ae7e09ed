//! Executes filled bodies against `screenkit_runtime`.
//!
//! Stands in for the lowered code the host would emit: each method looks up the synthesized
//! member of an owner, checks its body is filled and runs it.

use std::sync::Arc;

use screenkit_runtime::{BinderRegistry, BoundView, Bundle, Controller, NavigationDescriptor, Parcel};
use tracing::debug;

use crate::error::ScreenError;
use crate::model::QualifiedName;
use crate::session::{CompilationSession, Phase};
use crate::symbols::{Body, Scope};
use crate::well_known::{ARG, BINDING, CREATE_SCREEN, KEY};

pub struct ScreenExecutor<'s> {
    session: &'s CompilationSession,
    binders: &'s BinderRegistry,
}

impl<'s> ScreenExecutor<'s> {
    /// # Errors
    /// `PhaseOrder` until phase 2 ran.
    pub fn new(
        session: &'s CompilationSession,
        binders: &'s BinderRegistry,
    ) -> Result<Self, ScreenError> {
        session.require_at_least("execute", Phase::BodiesSynthesized)?;
        Ok(Self { session, binders })
    }

    /// Value of the synthesized `KEY` constant.
    ///
    /// # Errors
    /// When `owner` has no filled `KEY` of its own.
    pub fn key(&self, owner: &QualifiedName) -> Result<String, ScreenError> {
        match self.body(owner, Scope::Container, KEY)? {
            Body::StringLiteral { value } => Ok(value.clone()),
            _ => Err(not_synthesized(owner, KEY)),
        }
    }

    /// Runs `createScreen`, storing `argument` under the key when one is given.
    ///
    /// # Errors
    /// `UnexpectedArgument`, `ArgumentRequired` or `ArgumentType` when `argument` does not fit
    /// the factory's parameter.
    pub fn create_screen(
        &self,
        owner: &QualifiedName,
        argument: Option<Parcel>,
    ) -> Result<NavigationDescriptor, ScreenError> {
        let Body::CreateScreen {
            key,
            owner: class,
            parameter,
        } = self.body(owner, Scope::Container, CREATE_SCREEN)?
        else {
            return Err(not_synthesized(owner, CREATE_SCREEN));
        };

        let mut arguments = Bundle::new();
        match (parameter, argument) {
            (None, Some(_)) => return Err(ScreenError::UnexpectedArgument { owner: owner.clone() }),
            (None, None) => {}
            (Some(ty), None) if !ty.nullable => {
                return Err(ScreenError::ArgumentRequired { owner: owner.clone() });
            }
            (Some(_), None) => debug!(%owner, "null argument, nothing stored"),
            (Some(ty), Some(parcel)) => {
                if !parcel.is_of(ty.name.as_str()) {
                    return Err(ScreenError::ArgumentType {
                        owner: owner.clone(),
                        expected: ty.name.clone(),
                        found: parcel.type_name().to_owned(),
                    });
                }
                arguments.put(key.clone(), parcel);
            }
        }

        let class = class.to_string();
        Ok(NavigationDescriptor::new(key.clone(), move || {
            Controller::new(class.clone()).with_arguments(arguments.clone())
        }))
    }

    /// Reads the private `arg` accessor on `controller`.
    ///
    /// `Ok(None)` only for nullable arguments.
    ///
    /// # Errors
    /// A runtime fault when a non-nullable argument is missing or has the wrong type.
    pub fn read_arg(
        &self,
        owner: &QualifiedName,
        controller: &Controller,
    ) -> Result<Option<Parcel>, ScreenError> {
        let Body::ReadArgument { key, ty, nullable } = self.body(owner, Scope::Owner, ARG)? else {
            return Err(not_synthesized(owner, ARG));
        };
        let bundle = controller.arguments();
        if *nullable {
            return Ok(bundle.get_typed(key, ty.as_str()).cloned());
        }
        Ok(Some(bundle.require(key, ty.as_str())?.clone()))
    }

    /// Reads the `binding` property; binds once per controller, then serves the cached value.
    ///
    /// # Errors
    /// When no binder is registered for the binding type or binding fails.
    pub fn binding(
        &self,
        owner: &QualifiedName,
        controller: &Controller,
    ) -> Result<Arc<BoundView>, ScreenError> {
        let Body::LazyBind { binding } = self.body(owner, Scope::Owner, BINDING)? else {
            return Err(not_synthesized(owner, BINDING));
        };
        let binder = self.binders.get(binding.as_str())?;
        Ok(controller.binding_or_init(binder.as_ref())?)
    }

    fn body(
        &self,
        owner: &QualifiedName,
        scope: Scope,
        member: &str,
    ) -> Result<&'s Body, ScreenError> {
        let session = self.session;
        let decl = session
            .unit()
            .lookup(owner)
            .filter(|decl| session.candidates().is_matched(*decl))
            .ok_or_else(|| ScreenError::UnknownOwner { owner: owner.clone() })?;
        let symbol = session
            .symbols()
            .find(decl, scope, member)
            .ok_or_else(|| not_synthesized(owner, member))?;
        symbol.filled_body().ok_or_else(|| ScreenError::BodyNotFilled {
            owner: owner.clone(),
            member: member.to_owned(),
        })
    }
}

fn not_synthesized(owner: &QualifiedName, member: &str) -> ScreenError {
    ScreenError::MemberNotSynthesized {
        owner: owner.clone(),
        member: member.to_owned(),
    }
}
