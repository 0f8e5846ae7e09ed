//! Controller instances that generated members operate on.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::binder::{Binder, BoundView};
use crate::bundle::Bundle;
use crate::error::RuntimeError;
use crate::view::View;

/// A live instance of a CONTROLLER-derived class.
///
/// Holds the argument bundle installed by the screen factory, the root view once the host
/// attaches one, and the lazily created binding.
#[derive(Debug)]
pub struct Controller {
    class_name: String,
    arguments: Bundle,
    root_view: Option<Arc<View>>,
    binding: OnceLock<Arc<BoundView>>,
    /// Serializes first binds; reads after that go through `binding` alone.
    bind_lock: Mutex<()>,
}

impl Controller {
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            arguments: Bundle::new(),
            root_view: None,
            binding: OnceLock::new(),
            bind_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Bundle) -> Self {
        self.arguments = arguments;
        self
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[must_use]
    pub fn arguments(&self) -> &Bundle {
        &self.arguments
    }

    pub fn arguments_mut(&mut self) -> &mut Bundle {
        &mut self.arguments
    }

    pub fn attach_view(&mut self, root: View) {
        self.root_view = Some(Arc::new(root));
    }

    /// # Errors
    /// `NoRootView` before the host attached a view.
    pub fn root_view(&self) -> Result<&Arc<View>, RuntimeError> {
        self.root_view
            .as_ref()
            .ok_or_else(|| RuntimeError::NoRootView {
                class: self.class_name.clone(),
            })
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.binding.get().is_some()
    }

    /// Returns the cached binding, invoking `binder` only on first access.
    ///
    /// Concurrent first reads bind once: the loser waits and gets the winner's value. A failed
    /// bind is not cached, so the next access retries.
    ///
    /// # Errors
    /// `NoRootView` when no view is attached, or whatever the binder reports.
    pub fn binding_or_init(&self, binder: &dyn Binder) -> Result<Arc<BoundView>, RuntimeError> {
        if let Some(bound) = self.binding.get() {
            return Ok(Arc::clone(bound));
        }
        let _guard = self.bind_lock.lock();
        if let Some(bound) = self.binding.get() {
            return Ok(Arc::clone(bound));
        }
        let root = self.root_view()?;
        let bound = Arc::new(binder.bind(root)?);
        tracing::debug!(class = %self.class_name, binding = %binder.binding_type(), "binding created");
        Ok(Arc::clone(self.binding.get_or_init(|| bound)))
    }
}
