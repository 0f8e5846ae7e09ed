//! A compilation session: owns every per-unit structure and enforces phase order.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::bodies;
use crate::conditional::BindingGenerator;
use crate::config::ScreenConfig;
use crate::diagnostics::DiagnosticSink;
use crate::error::ScreenError;
use crate::model::{CompilationUnit, QualifiedName};
use crate::naming::SymbolOracle;
use crate::scanner::{CandidateDeclaration, CandidateId, CandidateIndex};
use crate::signatures;
use crate::supertypes::SupertypeResolver;
use crate::symbols::SymbolArena;
use crate::validator::{Validation, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Created,
    Scanned,
    Validated,
    SignaturesSynthesized,
    BodiesSynthesized,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Scanned => "scanned",
            Self::Validated => "validated",
            Self::SignaturesSynthesized => "signatures synthesized",
            Self::BodiesSynthesized => "bodies synthesized",
        })
    }
}

/// Counts reported by [`CompilationSession::run_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub candidates: usize,
    pub diagnostics: usize,
    pub signatures: usize,
    pub bodies: usize,
}

pub struct CompilationSession {
    unit: Arc<CompilationUnit>,
    config: ScreenConfig,
    oracle: Arc<dyn SymbolOracle>,
    resolver: SupertypeResolver,
    candidates: CandidateIndex,
    validations: HashMap<CandidateId, Validation>,
    diagnostics: DiagnosticSink,
    symbols: SymbolArena,
    phase: Phase,
}

impl CompilationSession {
    /// A session whose symbol oracle is the unit itself.
    #[must_use]
    pub fn new(unit: CompilationUnit, config: ScreenConfig) -> Self {
        let unit = Arc::new(unit);
        Self {
            oracle: unit.clone(),
            resolver: SupertypeResolver::new(unit.clone()),
            unit,
            config,
            candidates: CandidateIndex::default(),
            validations: HashMap::new(),
            diagnostics: DiagnosticSink::default(),
            symbols: SymbolArena::default(),
            phase: Phase::Created,
        }
    }

    #[must_use]
    pub fn with_oracle(mut self, oracle: Arc<dyn SymbolOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    /// # Errors
    /// `PhaseOrder` unless the session is freshly created.
    #[instrument(skip(self), fields(unit = %self.unit.name()))]
    pub fn scan(&mut self) -> Result<usize, ScreenError> {
        self.expect_phase("scan", Phase::Created, Phase::Created)?;
        self.candidates = CandidateIndex::scan(&self.unit);
        self.phase = Phase::Scanned;
        info!(candidates = self.candidates.len(), "scan finished");
        Ok(self.candidates.len())
    }

    /// Runs both structural checks on every candidate.
    ///
    /// # Errors
    /// `PhaseOrder` unless the unit was scanned and not yet validated.
    #[instrument(skip(self), fields(unit = %self.unit.name()))]
    pub fn validate(&mut self) -> Result<usize, ScreenError> {
        self.expect_phase("validate", Phase::Scanned, Phase::Scanned)?;
        let validator = Validator::new(&self.resolver);
        for candidate in self.candidates.iter() {
            let validation = validator.validate(candidate, &mut self.diagnostics);
            self.validations.insert(candidate.id, validation);
        }
        self.phase = Phase::Validated;
        info!(
            diagnostics = self.diagnostics.len(),
            fatal = self.diagnostics.has_fatal(),
            "validation finished"
        );
        Ok(self.diagnostics.len())
    }

    /// Phase 1. Re-running it before phase 2 adds nothing.
    ///
    /// # Errors
    /// `PhaseOrder` before validation or after bodies were synthesized.
    #[instrument(skip(self), fields(unit = %self.unit.name()))]
    pub fn synthesize_signatures(&mut self) -> Result<usize, ScreenError> {
        self.expect_phase(
            "synthesize_signatures",
            Phase::Validated,
            Phase::SignaturesSynthesized,
        )?;
        let generator = BindingGenerator::new(&self.config, self.oracle.as_ref());
        let mut emitted = 0;
        for candidate in self.candidates.iter() {
            let Some(validation) = self.validations.get(&candidate.id) else {
                continue;
            };
            if validation.fatal {
                tracing::debug!(owner = %candidate.owner, "fatal diagnostics, generation suppressed");
                continue;
            }
            let Some(decl) = self.unit.declaration(candidate.decl) else {
                continue;
            };
            emitted += signatures::synthesize(candidate, decl, validation, &mut self.symbols).len();
            emitted += usize::from(
                generator
                    .generate(candidate, decl, validation, &mut self.symbols)
                    .is_some(),
            );
        }
        self.phase = Phase::SignaturesSynthesized;
        info!(emitted, total = self.symbols.len(), "signature synthesis finished");
        Ok(emitted)
    }

    /// Phase 2.
    ///
    /// # Errors
    /// `PhaseOrder` before phase 1 finished.
    #[instrument(skip(self), fields(unit = %self.unit.name()))]
    pub fn synthesize_bodies(&mut self) -> Result<usize, ScreenError> {
        self.expect_phase(
            "synthesize_bodies",
            Phase::SignaturesSynthesized,
            Phase::BodiesSynthesized,
        )?;
        let filled = bodies::synthesize(&self.unit, &mut self.symbols);
        self.phase = Phase::BodiesSynthesized;
        info!(filled, "body synthesis finished");
        Ok(filled)
    }

    /// Scan, validate and both synthesis phases, in order.
    ///
    /// # Errors
    /// `PhaseOrder` if any phase already ran.
    pub fn run_all(&mut self) -> Result<SessionSummary, ScreenError> {
        let candidates = self.scan()?;
        let diagnostics = self.validate()?;
        let signatures = self.synthesize_signatures()?;
        let bodies = self.synthesize_bodies()?;
        Ok(SessionSummary {
            candidates,
            diagnostics,
            signatures,
            bodies,
        })
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn unit(&self) -> &CompilationUnit {
        &self.unit
    }

    #[must_use]
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    #[must_use]
    pub fn candidates(&self) -> &CandidateIndex {
        &self.candidates
    }

    #[must_use]
    pub fn candidate(&self, owner: &QualifiedName) -> Option<&CandidateDeclaration> {
        let decl = self.unit.lookup(owner)?;
        self.candidates.for_declaration(decl)
    }

    #[must_use]
    pub fn validation(&self, id: CandidateId) -> Option<&Validation> {
        self.validations.get(&id)
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.diagnostics
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    #[must_use]
    pub fn resolver(&self) -> &SupertypeResolver {
        &self.resolver
    }

    #[must_use]
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.has_fatal()
    }

    /// # Errors
    /// `PhaseOrder` while the session has not reached `phase`.
    pub(crate) fn require_at_least(
        &self,
        operation: &'static str,
        phase: Phase,
    ) -> Result<(), ScreenError> {
        if self.phase >= phase {
            Ok(())
        } else {
            Err(ScreenError::PhaseOrder {
                operation,
                expected: phase,
                actual: self.phase,
            })
        }
    }

    /// Accepts `from` (first run) up to `rerun` (idempotent repeat).
    fn expect_phase(
        &self,
        operation: &'static str,
        from: Phase,
        rerun: Phase,
    ) -> Result<(), ScreenError> {
        if self.phase == from || self.phase == rerun {
            Ok(())
        } else {
            Err(ScreenError::PhaseOrder {
                operation,
                expected: from,
                actual: self.phase,
            })
        }
    }
}

impl fmt::Debug for CompilationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilationSession")
            .field("unit", &self.unit.name())
            .field("phase", &self.phase)
            .field("candidates", &self.candidates.len())
            .field("diagnostics", &self.diagnostics.len())
            .field("symbols", &self.symbols.len())
            .finish_non_exhaustive()
    }
}
