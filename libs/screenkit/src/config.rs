//! Build-time configuration threaded into a session.

use serde::{Deserialize, Serialize};

use crate::well_known::DEFAULT_BINDING_PACKAGE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    /// Application namespace the build generates binding types under. Absent or blank
    /// disables binding generation.
    pub namespace: Option<String>,
    /// Sub-package of `namespace` holding the binding types.
    pub binding_package: String,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            binding_package: DEFAULT_BINDING_PACKAGE.to_owned(),
        }
    }
}

impl ScreenConfig {
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// The namespace with blank values normalized to `None`.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace
            .as_deref()
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
    }

    /// `{namespace}.{binding_package}`, or just the namespace when the package is blank.
    #[must_use]
    pub fn binding_namespace(&self) -> Option<String> {
        let namespace = self.namespace()?;
        let package = self.binding_package.trim();
        if package.is_empty() {
            Some(namespace.to_owned())
        } else {
            Some(format!("{namespace}.{package}"))
        }
    }
}
