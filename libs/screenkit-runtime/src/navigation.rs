//! Navigation descriptor returned by generated `createScreen` factories.

use std::fmt;
use std::sync::Arc;

use crate::controller::Controller;

type ControllerFactory = Arc<dyn Fn() -> Controller + Send + Sync>;

/// Associates a screen key with a factory that instantiates the owner.
///
/// A router keeps the descriptor and calls [`NavigationDescriptor::create`] whenever it needs a
/// fresh controller; every call yields a new instance with its own copy of the arguments.
#[derive(Clone)]
pub struct NavigationDescriptor {
    key: String,
    factory: ControllerFactory,
}

impl NavigationDescriptor {
    #[must_use]
    pub fn new<F>(key: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Controller + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            factory: Arc::new(factory),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn create(&self) -> Controller {
        tracing::trace!(key = %self.key, "instantiating controller from descriptor");
        (self.factory)()
    }
}

impl fmt::Debug for NavigationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationDescriptor")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
