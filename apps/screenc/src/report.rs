//! Human and JSON renderings of a run.

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use screenkit::codegen::render_unit;
use screenkit::symbols::{BodyState, Scope, SymbolKind, SynthesizedSymbol};
use screenkit::{CompilationSession, Diagnostic, LineAnnotation, Severity, annotations};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UnitReport {
    pub path: PathBuf,
    pub unit: String,
    pub candidates: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub symbols: Vec<SynthesizedSymbol>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<LineAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
    pub fatal: bool,
}

impl UnitReport {
    /// # Errors
    /// When the session is not far enough along for the requested projections, or rendering
    /// meets a name that is not a Rust identifier.
    pub fn collect(
        path: &Path,
        session: &CompilationSession,
        with_annotations: bool,
        render: bool,
    ) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            unit: session.unit().name().to_owned(),
            candidates: session.candidates().len(),
            diagnostics: session.diagnostics().as_slice().to_vec(),
            symbols: session.symbols().iter().cloned().collect(),
            annotations: if with_annotations {
                annotations(session)?
            } else {
                Vec::new()
            },
            rendered: if render {
                Some(render_unit(session)?)
            } else {
                None
            },
            fatal: session.has_fatal(),
        })
    }
}

/// # Errors
/// When serialization fails.
pub fn print_json(reports: &[UnitReport]) -> Result<()> {
    let failed = reports.iter().filter(|r| r.fatal).count();
    let output = serde_json::json!({
        "units": reports.len(),
        "failed": failed,
        "ok": failed == 0,
        "reports": reports,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_human(reports: &[UnitReport]) {
    for report in reports {
        println!("{}", "=".repeat(80));
        println!(
            "{} {} ({})",
            "UNIT".bold(),
            report.unit.cyan(),
            report.path.display()
        );
        println!("{}", "=".repeat(80));
        println!("  Marked declarations: {}", report.candidates);

        for diagnostic in &report.diagnostics {
            let line = diagnostic.format_human_readable();
            match diagnostic.severity {
                Severity::Error => println!("  {}", line.red()),
                Severity::Warning => println!("  {}", line.yellow()),
            }
        }
        for symbol in &report.symbols {
            println!("  {}", describe(symbol));
        }
        for annotation in &report.annotations {
            println!(
                "  {}: {}",
                annotation.location,
                annotation.tooltip.replace('\n', " ").dimmed()
            );
        }
        if let Some(rendered) = &report.rendered {
            println!();
            print!("{rendered}");
        }
        println!();
    }

    let failed = reports.iter().filter(|r| r.fatal).count();
    if failed == 0 {
        println!("{} {} unit(s) processed", "OK".green().bold(), reports.len());
    } else {
        println!(
            "{} {failed} of {} unit(s) have errors",
            "FAILED".red().bold(),
            reports.len()
        );
    }
}

fn describe(symbol: &SynthesizedSymbol) -> String {
    let path = match symbol.scope {
        Scope::Owner => format!("{}.{}", symbol.owner_name, symbol.name),
        Scope::Container => format!("{}.<container>.{}", symbol.owner_name, symbol.name),
    };
    let state = match &symbol.body {
        BodyState::Stub => "stub".yellow(),
        BodyState::Filled(_) => "filled".green(),
    };
    format!("+ {path} [{}] {state}", kind_label(symbol.kind))
}

fn kind_label(kind: SymbolKind) -> &'static str {
    match kind {
        SymbolKind::Container => "container",
        SymbolKind::Constant => "constant",
        SymbolKind::AccessorProperty => "accessor",
        SymbolKind::FactoryFunction => "factory",
        SymbolKind::ConditionalAccessorProperty => "binding",
    }
}
