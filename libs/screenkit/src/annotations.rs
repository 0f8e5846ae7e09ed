//! Read-only projection for editor gutter markers.

use serde::Serialize;

use crate::bodies::lookup_key;
use crate::error::ScreenError;
use crate::model::{QualifiedName, SourceLocation};
use crate::session::{CompilationSession, Phase};
use crate::well_known::KEY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineAnnotation {
    pub owner: QualifiedName,
    pub location: SourceLocation,
    pub key: String,
    pub tooltip: String,
}

/// One annotation per matched declaration, in source order.
///
/// # Errors
/// `PhaseOrder` before the unit was scanned.
pub fn annotations(session: &CompilationSession) -> Result<Vec<LineAnnotation>, ScreenError> {
    session.require_at_least("annotations", Phase::Scanned)?;
    let unit = session.unit();
    Ok(session
        .candidates()
        .iter()
        .filter_map(|candidate| {
            let decl = unit.declaration(candidate.decl)?;
            let key = lookup_key(decl);
            Some(LineAnnotation {
                owner: candidate.owner.clone(),
                location: candidate.location.clone(),
                tooltip: format!("Screen generated constants:\n{KEY} = \"{key}\""),
                key,
            })
        })
        .collect())
}
