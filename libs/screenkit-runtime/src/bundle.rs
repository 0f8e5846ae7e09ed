//! Generic key-value argument carrier.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;

/// A transport-serializable value tagged with the qualified name of its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    type_name: String,
    payload: serde_json::Value,
}

impl Parcel {
    #[must_use]
    pub fn new(type_name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            type_name: type_name.into(),
            payload,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    #[must_use]
    pub fn is_of(&self, type_name: &str) -> bool {
        self.type_name == type_name
    }
}

/// Ordered string-keyed map of [`Parcel`]s attached to a controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    entries: BTreeMap<String, Parcel>,
}

impl Bundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `parcel` under `key`, returning the value it replaced.
    pub fn put(&mut self, key: impl Into<String>, parcel: Parcel) -> Option<Parcel> {
        self.entries.insert(key.into(), parcel)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Parcel> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Reads the entry under `key` and checks it holds a `type_name` value.
    ///
    /// # Errors
    /// `MissingArgument` when the key is absent, `ArgumentTypeMismatch` when the stored
    /// parcel carries another type.
    pub fn require(&self, key: &str, type_name: &str) -> Result<&Parcel, RuntimeError> {
        let parcel = self
            .entries
            .get(key)
            .ok_or_else(|| RuntimeError::MissingArgument {
                key: key.to_owned(),
            })?;
        if !parcel.is_of(type_name) {
            return Err(RuntimeError::ArgumentTypeMismatch {
                key: key.to_owned(),
                expected: type_name.to_owned(),
                found: parcel.type_name.clone(),
            });
        }
        Ok(parcel)
    }

    /// Lenient counterpart of [`Bundle::require`]: missing and wrong-typed entries read as `None`.
    #[must_use]
    pub fn get_typed(&self, key: &str, type_name: &str) -> Option<&Parcel> {
        self.entries.get(key).filter(|p| p.is_of(type_name))
    }
}
