//! Runtime faults raised by generated member bodies.

/// Fault raised while executing a generated body.
///
/// A non-nullable argument that is missing or has the wrong type is a fault, never a default.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("required argument '{key}' is missing from the bundle")]
    MissingArgument { key: String },
    #[error("argument '{key}' has type '{found}', expected '{expected}'")]
    ArgumentTypeMismatch {
        key: String,
        expected: String,
        found: String,
    },
    #[error("controller '{class}' has no root view attached")]
    NoRootView { class: String },
    #[error("no binder registered for '{binding}'")]
    UnknownBinder { binding: String },
    #[error("view '{id}' not found under root '{root}'")]
    MissingView { id: String, root: String },
}
