//! Errors raised by the pipeline itself, as opposed to user-facing diagnostics.

use screenkit_runtime::RuntimeError;

use crate::model::QualifiedName;
use crate::session::Phase;

#[derive(thiserror::Error, Debug)]
pub enum ScreenError {
    #[error("duplicate declaration '{name}' in compilation unit")]
    DuplicateDeclaration { name: QualifiedName },

    #[error("cannot run {operation} in phase '{actual}', expected '{expected}'")]
    PhaseOrder {
        operation: &'static str,
        expected: Phase,
        actual: Phase,
    },

    #[error("'{name}' is not a valid Rust identifier")]
    InvalidIdentifier { name: String },

    #[error("'{first}' and '{second}' would both render as 'impl {name}'")]
    RenderCollision {
        name: String,
        first: QualifiedName,
        second: QualifiedName,
    },

    #[error("'{owner}' is not a matched declaration of this session")]
    UnknownOwner { owner: QualifiedName },

    #[error("'{owner}' has no synthesized member '{member}'")]
    MemberNotSynthesized { owner: QualifiedName, member: String },

    #[error("body of '{owner}.{member}' has not been filled")]
    BodyNotFilled { owner: QualifiedName, member: String },

    #[error("createScreen of '{owner}' takes no argument")]
    UnexpectedArgument { owner: QualifiedName },

    #[error("createScreen of '{owner}' requires an argument")]
    ArgumentRequired { owner: QualifiedName },

    #[error("createScreen of '{owner}' expects '{expected}', got '{found}'")]
    ArgumentType {
        owner: QualifiedName,
        expected: QualifiedName,
        found: String,
    },

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
