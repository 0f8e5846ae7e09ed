//! Binder functions for generated binding types.
//!
//! A binding type (`FragmentMainBinding`, ...) is produced by the build from a layout file. Its
//! static binder takes the controller's root view, resolves every view the layout declares and
//! hands back a [`BoundView`] whose lookups are served from that one-time resolution.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::RuntimeError;
use crate::view::View;

/// Result of binding a layout against a root view.
#[derive(Debug)]
pub struct BoundView {
    binding_type: String,
    root: Arc<View>,
    views: HashMap<String, View>,
}

impl BoundView {
    #[must_use]
    pub fn new<I>(binding_type: impl Into<String>, root: Arc<View>, views: I) -> Self
    where
        I: IntoIterator<Item = (String, View)>,
    {
        Self {
            binding_type: binding_type.into(),
            root,
            views: views.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn binding_type(&self) -> &str {
        &self.binding_type
    }

    #[must_use]
    pub fn root(&self) -> &View {
        &self.root
    }

    /// Cached lookup; never walks the tree again.
    #[must_use]
    pub fn view(&self, id: &str) -> Option<&View> {
        self.views.get(id)
    }
}

/// Static binder of one binding type.
pub trait Binder: Send + Sync {
    fn binding_type(&self) -> &str;

    /// Binds the layout against `root`.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when the root does not contain a view the layout requires.
    fn bind(&self, root: &Arc<View>) -> Result<BoundView, RuntimeError>;
}

/// Binder for a layout that declares a fixed list of view ids.
#[derive(Debug, Clone)]
pub struct LayoutBinder {
    binding_type: String,
    view_ids: Vec<String>,
}

impl LayoutBinder {
    #[must_use]
    pub fn new<I, S>(binding_type: impl Into<String>, view_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            binding_type: binding_type.into(),
            view_ids: view_ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl Binder for LayoutBinder {
    fn binding_type(&self) -> &str {
        &self.binding_type
    }

    fn bind(&self, root: &Arc<View>) -> Result<BoundView, RuntimeError> {
        let mut views = HashMap::with_capacity(self.view_ids.len());
        for id in &self.view_ids {
            let view = root.find(id).ok_or_else(|| RuntimeError::MissingView {
                id: id.clone(),
                root: root.id().to_owned(),
            })?;
            views.insert(id.clone(), view.clone());
        }
        tracing::debug!(binding = %self.binding_type, views = views.len(), "layout bound");
        Ok(BoundView::new(self.binding_type.clone(), Arc::clone(root), views))
    }
}

/// Binders keyed by the qualified name of their binding type.
#[derive(Clone, Default)]
pub struct BinderRegistry {
    binders: HashMap<String, Arc<dyn Binder>>,
}

impl BinderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, binder: impl Binder + 'static) {
        self.binders
            .insert(binder.binding_type().to_owned(), Arc::new(binder));
    }

    /// # Errors
    /// `UnknownBinder` when nothing was registered for `binding_type`.
    pub fn get(&self, binding_type: &str) -> Result<Arc<dyn Binder>, RuntimeError> {
        self.binders
            .get(binding_type)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownBinder {
                binding: binding_type.to_owned(),
            })
    }
}

impl fmt::Debug for BinderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.binders.keys().collect();
        keys.sort();
        f.debug_struct("BinderRegistry")
            .field("binders", &keys)
            .finish()
    }
}
