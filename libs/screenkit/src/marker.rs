//! Structural extraction of the marker attribute.

use crate::model::{AttributeLiteral, ClassDecl, Expr, QualifiedName};
use crate::well_known::{MARKER, MARKER_ARGUMENT_TYPE, MARKER_NULLABLE, NO_ARGUMENT};

/// What the `argumentType` argument names, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentRef {
    Qualified(QualifiedName),
    /// A bare name; the validator tries the owner's package.
    Unqualified(String),
    NoArgument,
    /// The expression is not a class reference.
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerAttribute {
    argument: ArgumentRef,
    nullable: bool,
}

impl MarkerAttribute {
    /// The first marker literal on `decl`, if any.
    #[must_use]
    pub fn find(decl: &ClassDecl) -> Option<&AttributeLiteral> {
        decl.annotations.iter().find(|a| a.name.as_str() == MARKER)
    }

    /// Reads `argumentType` (position 0) and `nullable` (position 1). Never fails.
    #[must_use]
    pub fn parse(literal: &AttributeLiteral) -> Self {
        let mut argument = ArgumentRef::NoArgument;
        let mut nullable = false;
        let mut position = 0usize;

        for arg in &literal.arguments {
            let slot = if let Some(name) = arg.name.as_deref() {
                name
            } else {
                position += 1;
                match position {
                    1 => MARKER_ARGUMENT_TYPE,
                    2 => MARKER_NULLABLE,
                    _ => continue,
                }
            };
            match slot {
                MARKER_ARGUMENT_TYPE => argument = classify(&arg.value),
                MARKER_NULLABLE => nullable = matches!(arg.value, Expr::Bool { value: true }),
                _ => {}
            }
        }

        Self { argument, nullable }
    }

    #[must_use]
    pub fn argument(&self) -> &ArgumentRef {
        &self.argument
    }

    #[must_use]
    pub fn nullable(&self) -> bool {
        self.nullable
    }
}

fn classify(expr: &Expr) -> ArgumentRef {
    let Expr::ClassRef { name } = expr else {
        return ArgumentRef::Absent;
    };
    let short_sentinel = QualifiedName::from(NO_ARGUMENT);
    if name == NO_ARGUMENT || name == short_sentinel.short_name() {
        ArgumentRef::NoArgument
    } else if name.contains('.') {
        ArgumentRef::Qualified(QualifiedName::new(name.as_str()))
    } else if name.is_empty() {
        ArgumentRef::Absent
    } else {
        ArgumentRef::Unqualified(name.clone())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::model::AttributeArgument;

    fn literal(arguments: Vec<(Option<&str>, Expr)>) -> AttributeLiteral {
        AttributeLiteral {
            name: MARKER.into(),
            arguments: arguments
                .into_iter()
                .map(|(name, value)| AttributeArgument {
                    name: name.map(str::to_owned),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn defaults_to_no_argument() {
        let marker = MarkerAttribute::parse(&literal(vec![]));
        assert_eq!(marker.argument(), &ArgumentRef::NoArgument);
        assert!(!marker.nullable());
    }

    #[test]
    fn positional_and_named_forms_agree() {
        let positional = MarkerAttribute::parse(&literal(vec![
            (None, Expr::class_ref("app.Arg")),
            (None, Expr::Bool { value: true }),
        ]));
        let named = MarkerAttribute::parse(&literal(vec![
            (Some("nullable"), Expr::Bool { value: true }),
            (Some("argumentType"), Expr::class_ref("app.Arg")),
        ]));
        assert_eq!(positional, named);
        assert_eq!(positional.argument(), &ArgumentRef::Qualified("app.Arg".into()));
        assert!(positional.nullable());
    }

    #[test]
    fn classifies_argument_expressions() {
        let bare = MarkerAttribute::parse(&literal(vec![(None, Expr::class_ref("Arg"))]));
        assert_eq!(bare.argument(), &ArgumentRef::Unqualified("Arg".to_owned()));

        for sentinel in ["NoArgument", "screenkit.NoArgument"] {
            let marker = MarkerAttribute::parse(&literal(vec![(None, Expr::class_ref(sentinel))]));
            assert_eq!(marker.argument(), &ArgumentRef::NoArgument);
        }

        let odd = MarkerAttribute::parse(&literal(vec![(None, Expr::string("app.Arg"))]));
        assert_eq!(odd.argument(), &ArgumentRef::Absent);
    }
}
