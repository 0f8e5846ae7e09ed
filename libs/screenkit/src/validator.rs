//! Structural validation of candidates.

use tracing::debug;

use crate::diagnostics::{ARG_NOT_SERIALIZABLE, DiagnosticSink, NOT_ON_CONTROLLER};
use crate::marker::ArgumentRef;
use crate::model::QualifiedName;
use crate::scanner::CandidateDeclaration;
use crate::supertypes::SupertypeResolver;
use crate::well_known::{CONTROLLER_BASE, TRANSPORT_CAPABILITY};

/// Outcome of validating one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Owner derives from the controller base.
    pub on_controller: bool,
    /// Argument type after same-package fallback; `None` for no argument or when unresolved.
    pub argument: Option<QualifiedName>,
    /// At least one fatal diagnostic was reported; generation is suppressed.
    pub fatal: bool,
}

pub struct Validator<'a> {
    resolver: &'a SupertypeResolver,
    controller_base: QualifiedName,
    capability: QualifiedName,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub fn new(resolver: &'a SupertypeResolver) -> Self {
        Self {
            resolver,
            controller_base: QualifiedName::from(CONTROLLER_BASE),
            capability: QualifiedName::from(TRANSPORT_CAPABILITY),
        }
    }

    /// Runs both checks; neither short-circuits the other.
    pub fn validate(&self, candidate: &CandidateDeclaration, sink: &mut DiagnosticSink) -> Validation {
        let mut fatal = false;

        let on_controller = self
            .resolver
            .is_derived_from(&candidate.owner, &self.controller_base);
        if !on_controller {
            sink.report(NOT_ON_CONTROLLER.at(
                &candidate.owner,
                &candidate.location,
                candidate.owner.as_str(),
            ));
            fatal = true;
        }

        let argument = self.resolve_argument(candidate);
        if let Some(arg) = &argument {
            if !self.resolver.graph().contains(arg) {
                debug!(owner = %candidate.owner, argument = %arg, "argument type unknown, capability check skipped");
            } else if !self.resolver.is_derived_from(arg, &self.capability) {
                sink.report(ARG_NOT_SERIALIZABLE.at(
                    &candidate.owner,
                    &candidate.location,
                    arg.as_str(),
                ));
                fatal = true;
            }
        }

        Validation {
            on_controller,
            argument,
            fatal,
        }
    }

    /// A bare name resolves only if the owner's package declares it; imports are not consulted.
    fn resolve_argument(&self, candidate: &CandidateDeclaration) -> Option<QualifiedName> {
        match candidate.marker.argument() {
            ArgumentRef::Qualified(name) => Some(name.clone()),
            ArgumentRef::Unqualified(short) => {
                let guess = QualifiedName::in_package(candidate.owner.package(), short);
                if self.resolver.graph().contains(&guess) {
                    Some(guess)
                } else {
                    debug!(owner = %candidate.owner, argument = %short, "argument type unresolved");
                    None
                }
            }
            ArgumentRef::NoArgument | ArgumentRef::Absent => None,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{AttributeArgument, AttributeLiteral, ClassDecl, CompilationUnit, Expr, ExternalType};
    use crate::scanner::CandidateIndex;
    use crate::well_known::MARKER;

    fn marked(package: &str, name: &str, argument: Option<&str>) -> ClassDecl {
        let arguments = argument
            .map(|a| AttributeArgument {
                name: None,
                value: Expr::class_ref(a),
            })
            .into_iter()
            .collect();
        ClassDecl::new(package, name).with_annotation(AttributeLiteral {
            name: MARKER.into(),
            arguments,
        })
    }

    fn run(classes: Vec<ClassDecl>) -> (Vec<Validation>, DiagnosticSink) {
        let unit = CompilationUnit::new(
            "unit",
            classes,
            vec![
                ExternalType::new(CONTROLLER_BASE, &[]),
                ExternalType::new(TRANSPORT_CAPABILITY, &[]),
            ],
        )
        .unwrap();
        let index = CandidateIndex::scan(&unit);
        let resolver = SupertypeResolver::new(Arc::new(unit));
        let validator = Validator::new(&resolver);
        let mut sink = DiagnosticSink::default();
        let validations = index.iter().map(|c| validator.validate(c, &mut sink)).collect();
        (validations, sink)
    }

    #[test]
    fn both_checks_report_independently() {
        let (validations, sink) = run(vec![
            marked("app", "Home", Some("app.Arg")),
            ClassDecl::new("app", "Arg"),
        ]);
        assert!(validations[0].fatal);
        let codes: Vec<_> = sink.iter().map(|d| d.code).collect();
        assert_eq!(codes, ["NOT_ON_CONTROLLER", "ARG_NOT_SERIALIZABLE"]);
    }

    #[test]
    fn bare_argument_falls_back_to_owner_package() {
        let (validations, sink) = run(vec![
            marked("app", "Home", Some("Arg")).with_supertype(CONTROLLER_BASE),
            ClassDecl::new("app", "Arg").with_supertype(TRANSPORT_CAPABILITY),
        ]);
        assert!(sink.is_empty());
        assert_eq!(validations[0].argument, Some("app.Arg".into()));
        assert!(!validations[0].fatal);
    }

    #[test]
    fn unresolvable_bare_argument_is_silently_dropped() {
        let (validations, sink) = run(vec![
            marked("app", "Home", Some("Elsewhere")).with_supertype(CONTROLLER_BASE),
        ]);
        assert!(sink.is_empty());
        assert_eq!(validations[0].argument, None);
    }

    #[test]
    fn unknown_qualified_argument_skips_capability_check() {
        let (validations, sink) = run(vec![
            marked("app", "Home", Some("lib.Unknown")).with_supertype(CONTROLLER_BASE),
        ]);
        assert!(sink.is_empty());
        assert_eq!(validations[0].argument, Some("lib.Unknown".into()));
    }
}
