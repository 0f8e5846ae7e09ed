#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;
mod input;
mod logging;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use screenkit::CompilationSession;

use crate::config::AppConfig;
use crate::report::UnitReport;

/// Runs marker-driven screen synthesis over declaration units
#[derive(Parser, Debug)]
#[command(name = "screenc", author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Namespace generated binding types are looked up in
    #[arg(long, global = true)]
    namespace: Option<String>,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run every phase and report synthesized members (default)
    Generate(GenerateArgs),
    /// Scan and validate only
    Check(UnitArgs),
    /// Print editor line annotations for marked declarations
    Annotate(UnitArgs),
}

#[derive(Args, Debug, Default)]
struct UnitArgs {
    /// Unit files (.yaml, .yml or .json)
    #[arg(value_name = "UNIT")]
    units: Vec<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    #[command(flatten)]
    units: UnitArgs,

    /// Also print synthesized members as source
    #[arg(long, value_enum)]
    emit: Option<Emit>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Emit {
    Rust,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Generate,
    Check,
    Annotate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.namespace.as_deref(), cli.verbose);
    logging::init(&config.logging);

    let (mode, units, emit) = match cli.command {
        None => (Mode::Generate, cli.generate.units.units, cli.generate.emit),
        Some(Commands::Generate(args)) => (Mode::Generate, args.units.units, args.emit),
        Some(Commands::Check(args)) => (Mode::Check, args.units, None),
        Some(Commands::Annotate(args)) => (Mode::Annotate, args.units, None),
    };
    if units.is_empty() {
        bail!("no unit files given");
    }

    let mut reports = Vec::with_capacity(units.len());
    for path in &units {
        let unit = input::load_unit(path)?;
        let mut session = CompilationSession::new(unit, config.screen.clone());
        match mode {
            Mode::Generate => {
                let summary = session.run_all()?;
                tracing::info!(
                    unit = %path.display(),
                    candidates = summary.candidates,
                    signatures = summary.signatures,
                    bodies = summary.bodies,
                    "unit synthesized"
                );
            }
            Mode::Check => {
                session.scan()?;
                session.validate()?;
            }
            Mode::Annotate => {
                session.scan()?;
            }
        }
        reports.push(UnitReport::collect(
            path,
            &session,
            mode == Mode::Annotate,
            emit == Some(Emit::Rust),
        )?);
    }

    if cli.json {
        report::print_json(&reports)?;
    } else {
        report::print_human(&reports);
    }

    Ok(if reports.iter().any(|r| r.fatal) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
