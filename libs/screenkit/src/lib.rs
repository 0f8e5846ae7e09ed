//! Marker-driven synthesis of screen members.
//!
//! A declaration marked `@screenkit.Screen(argumentType, nullable)` gets, in its companion
//! container, a `KEY` constant and a `createScreen` factory, plus a private `arg` accessor when it
//! takes an argument and a private `binding` property when a generated binding type exists for its
//! layout. The pipeline runs in strictly ordered phases owned by a [`CompilationSession`]:
//!
//! 1. [`scanner`]: index every declaration carrying the marker
//! 2. [`validator`]: owner lineage and argument capability checks, reported as [`diagnostics`]
//! 3. [`signatures`] and [`conditional`]: phase 1, signature-only stubs merged against user code
//! 4. [`bodies`]: phase 2, fills the stubs once every signature exists
//!
//! Filled bodies can be executed with [`exec::ScreenExecutor`] or rendered as Rust with
//! [`codegen`].
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod annotations;
pub mod bodies;
pub mod codegen;
pub mod conditional;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod exec;
pub mod marker;
pub mod model;
pub mod naming;
pub mod scanner;
pub mod session;
pub mod signatures;
pub mod supertypes;
pub mod symbols;
pub mod validator;
pub mod well_known;

pub use annotations::{LineAnnotation, annotations};
pub use config::ScreenConfig;
pub use diagnostics::{Diagnostic, Severity};
pub use error::ScreenError;
pub use exec::ScreenExecutor;
pub use model::{ClassDecl, CompilationUnit, QualifiedName};
pub use naming::SymbolOracle;
pub use session::{CompilationSession, Phase, SessionSummary};
pub use supertypes::TypeGraph;
