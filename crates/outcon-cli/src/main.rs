//! Output-consistency command-line interface

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::info;
use outcon_catalog::OperationCatalog;
use outcon_diagnostics::{Diagnostic, OC0401, OC0402, OC0406, render_colored};
use outcon_resolve::{
    BatchReport, ComparisonStrategy, ResolveConfig, candidates_from_json, representative_literals,
    resolve_batch,
};
use outcon_types::ResolvedType;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Output-consistency type resolution tool
#[derive(Parser)]
#[command(name = "outcon")]
#[command(
    author,
    version,
    about = "Return-type resolution for generated SQL test expressions",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an operation catalog and print its signatures
    Catalog {
        /// Catalog file (default: builtin catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Resolve the return types of candidate expressions
    Resolve {
        /// JSON file holding one expression or an array of them
        file: PathBuf,
        /// Catalog file (default: builtin catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Resolve settings file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Number of worker threads
        #[arg(short, long)]
        workers: Option<usize>,
        /// Skip checking arguments against declared parameters
        #[arg(long)]
        no_argument_checks: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print representative SQL literals for a resolved type
    Values {
        /// Resolved type as JSON, e.g. '{"category": "map", "inner": {"value": "text"}}'
        resolved: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::FAILURE
        }
    }
}

/// Library crates log through `log`; the subscriber bridges those records
/// and lets `RUST_LOG` override the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Catalog { catalog, format } => {
            let Some(catalog) = load_catalog(catalog.as_deref()) else {
                return Ok(ExitCode::FAILURE);
            };
            match format {
                OutputFormat::Text => println!("{}", catalog.describe()),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&catalog.to_file())?)
                }
            }
            info!("{} operation(s) valid", catalog.len());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve {
            file,
            catalog,
            config,
            workers,
            no_argument_checks,
            format,
        } => {
            let Some(catalog) = load_catalog(catalog.as_deref()) else {
                return Ok(ExitCode::FAILURE);
            };
            let Some(mut config) = load_config(config.as_deref()) else {
                return Ok(ExitCode::FAILURE);
            };
            if let Some(workers) = workers {
                config.workers = workers;
            }
            if no_argument_checks {
                config.check_arguments = false;
            }

            let Some(json) = read_input(&file) else {
                return Ok(ExitCode::FAILURE);
            };
            let candidates = match candidates_from_json(&json) {
                Ok(candidates) => candidates,
                Err(err) => {
                    report(
                        &Diagnostic::error(OC0406, err.to_string())
                            .with_subject(file.display().to_string()),
                    );
                    return Ok(ExitCode::FAILURE);
                }
            };
            if candidates.is_empty() {
                report(
                    &Diagnostic::warning(OC0406, "No candidate expressions to resolve")
                        .with_subject(file.display().to_string()),
                );
            }

            let batch = resolve_batch(&catalog, &candidates, &config);
            print_batch(&batch, format)?;
            batch.diagnostics().iter().for_each(report);
            Ok(if batch.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Values { resolved } => {
            let resolved: ResolvedType = match serde_json::from_str(&resolved) {
                Ok(resolved) => resolved,
                Err(err) => {
                    report(
                        &Diagnostic::error(OC0406, err.to_string()).with_subject("resolved type"),
                    );
                    return Ok(ExitCode::FAILURE);
                }
            };
            match representative_literals(&resolved) {
                Ok(literals) => {
                    literals.iter().for_each(|literal| println!("{}", literal));
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    report(&err.to_diagnostic());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

/// Load the catalog at `path`, or the builtin one; reports and returns
/// `None` when it is invalid
fn load_catalog(path: Option<&Path>) -> Option<OperationCatalog> {
    let loaded = match path {
        Some(path) => OperationCatalog::from_path(path),
        None => OperationCatalog::builtin(),
    };
    loaded.map_err(|err| report(&err.to_diagnostic())).ok()
}

fn load_config(path: Option<&Path>) -> Option<ResolveConfig> {
    let Some(path) = path else {
        return Some(ResolveConfig::default());
    };
    let json = read_input(path)?;
    serde_json::from_str(&json)
        .map_err(|err| {
            report(
                &Diagnostic::error(OC0402, err.to_string())
                    .with_subject(path.display().to_string()),
            )
        })
        .ok()
}

/// Read an input file; reports and returns `None` when it cannot be read
fn read_input(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .map_err(|err| {
            report(
                &Diagnostic::error(OC0401, err.to_string())
                    .with_subject(path.display().to_string()),
            )
        })
        .ok()
}

fn print_batch(batch: &BatchReport, format: OutputFormat) -> Result<()> {
    for (candidate, tree) in &batch.resolved {
        let resolved = tree.root_type();
        let comparison = ComparisonStrategy::for_type(resolved);
        match format {
            OutputFormat::Text => println!(
                "#{}\t{}\t{}\t[{}{}]",
                candidate,
                resolved,
                tree.to_sql(),
                comparison,
                if comparison.is_exact() { "" } else { ", tolerant" }
            ),
            OutputFormat::Json => {
                let line = serde_json::json!({
                    "candidate": candidate,
                    "type": resolved,
                    "display": resolved.to_string(),
                    "sql": tree.to_sql(),
                    "comparison": comparison.to_string(),
                    "exact": comparison.is_exact(),
                });
                println!("{}", serde_json::to_string(&line)?);
            }
        }
    }
    Ok(())
}

fn report(diagnostic: &Diagnostic) {
    eprintln!("{}", render_colored(diagnostic));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_flags() {
        let cli = Cli::parse_from([
            "outcon", "-vv", "resolve", "exprs.json", "--workers", "3", "--format", "json",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Resolve { workers, format, .. } = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(workers, Some(3));
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_unreadable_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(read_input(&missing), None);
        assert!(load_config(Some(&missing)).is_none());
    }

    #[test]
    fn test_malformed_config_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"{\"workers\": \"many\"}").unwrap();
        assert!(load_config(Some(file.path())).is_none());
        assert!(load_config(None).is_some());
    }
}
