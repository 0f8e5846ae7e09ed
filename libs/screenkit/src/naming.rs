//! Binding type names derived from layout identifiers, and their existence lookup.

use crate::model::{ClassDecl, CompilationUnit, Expr, QualifiedName};
use crate::well_known::{BINDING_SUFFIX, LAYOUT_RECEIVER};

/// Answers whether a type exists in the compilation's visible symbol set.
pub trait SymbolOracle: Send + Sync {
    fn exists(&self, name: &QualifiedName) -> bool;
}

impl SymbolOracle for CompilationUnit {
    fn exists(&self, name: &QualifiedName) -> bool {
        self.contains_type(name)
    }
}

/// `fragment_sample` becomes `FragmentSampleBinding`.
///
/// Splits on `_` and uppercases the first character of each segment; the rest of a segment is
/// kept as written.
#[must_use]
pub fn derive_target_type_name(layout_id: &str) -> String {
    let mut name = String::with_capacity(layout_id.len() + BINDING_SUFFIX.len());
    for segment in layout_id.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name.push_str(BINDING_SUFFIX);
    name
}

/// `{namespace}.{name}` when the namespace is non-blank and the oracle knows the type.
#[must_use]
pub fn resolve_namespaced_type(
    name: &str,
    namespace: Option<&str>,
    oracle: &dyn SymbolOracle,
) -> Option<QualifiedName> {
    let namespace = namespace.map(str::trim).filter(|ns| !ns.is_empty())?;
    let candidate = QualifiedName::in_package(namespace, name);
    oracle.exists(&candidate).then_some(candidate)
}

/// Layout id from a delegation call whose first positional argument reads `<...>.layout.<id>`.
#[must_use]
pub fn extract_layout_id(decl: &ClassDecl) -> Option<&str> {
    let Some(Expr::Path { path }) = decl.delegation.as_ref()?.arguments.first() else {
        return None;
    };
    let (receiver, id) = path.rsplit_once('.')?;
    let receiver_name = receiver.rsplit('.').next().unwrap_or(receiver);
    (receiver_name == LAYOUT_RECEIVER && !id.is_empty()).then_some(id)
}
