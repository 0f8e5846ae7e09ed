//! Minimal view tree that binders look views up in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    id: String,
    #[serde(default)]
    children: Vec<View>,
}

impl View {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: View) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn children(&self) -> &[View] {
        &self.children
    }

    /// Finds the first view with `id` in depth-first order, including `self`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&View> {
        let mut stack = vec![self];
        while let Some(view) = stack.pop() {
            if view.id == id {
                return Some(view);
            }
            stack.extend(view.children.iter().rev());
        }
        None
    }
}
