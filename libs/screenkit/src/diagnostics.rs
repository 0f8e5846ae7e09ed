//! Diagnostic catalog and the per-session sink.

use std::fmt;

use serde::Serialize;

use crate::model::{QualifiedName, SourceLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// Static diagnostic definition from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagDef {
    pub code: &'static str,
    pub severity: Severity,
    pub message: &'static str,
}

impl DiagDef {
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Instantiate this definition for `owner`, naming the offending type in `subject`.
    #[must_use]
    pub fn at(
        &self,
        owner: &QualifiedName,
        location: &SourceLocation,
        subject: impl Into<String>,
    ) -> Diagnostic {
        Diagnostic {
            code: self.code,
            severity: self.severity,
            message: self.message,
            owner: owner.clone(),
            subject: subject.into(),
            location: location.clone(),
        }
    }
}

pub const NOT_ON_CONTROLLER: DiagDef = DiagDef {
    code: "NOT_ON_CONTROLLER",
    severity: Severity::Error,
    message: "@Screen can only be applied to classes deriving from androidx.fragment.app.Fragment",
};

pub const ARG_NOT_SERIALIZABLE: DiagDef = DiagDef {
    code: "ARG_NOT_SERIALIZABLE",
    severity: Severity::Error,
    message: "@Screen argument type must implement android.os.Parcelable",
};

/// Reserved; nothing emits it.
pub const MISSING_LAYOUT: DiagDef = DiagDef {
    code: "MISSING_LAYOUT",
    severity: Severity::Warning,
    message: "Could not determine the layout for view binding generation",
};

pub const CATALOG: &[DiagDef] = &[NOT_ON_CONTROLLER, ARG_NOT_SERIALIZABLE, MISSING_LAYOUT];

#[must_use]
pub fn lookup(code: &str) -> Option<&'static DiagDef> {
    CATALOG.iter().find(|def| def.code == code)
}

/// A reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub owner: QualifiedName,
    /// The type the diagnostic is about (owner or argument type)
    pub subject: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Error
    }

    /// `{file}:{line}:{column}: {severity}[{code}]: {message} [{subject}]`
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!(
            "{}: {}[{}]: {} [{}]",
            self.location, self.severity, self.code, self.message, self.subject
        )
    }
}

/// Diagnostics collected during one session, in report order.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            code = diagnostic.code,
            owner = %diagnostic.owner,
            subject = %diagnostic.subject,
            "diagnostic reported"
        );
        self.diagnostics.push(diagnostic);
    }

    #[must_use]
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn for_owner<'a>(&'a self, owner: &'a QualifiedName) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics.iter().filter(move |d| &d.owner == owner)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
