//! CLI definition and entry point

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config;
use crate::pipeline::Pipeline;
use crate::reporters::{self, OutputFormat};

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Entwine - map type relationships across a Ruby codebase
#[derive(Parser, Debug)]
#[command(name = "entwine")]
#[command(
    version,
    about = "Build a graph of classes, modules, and their associations from Ruby sources",
    long_about = "Entwine parses Ruby sources and links every class and module to the \
types it references: plain constant usage plus belongs_to, has_one, has_many, and \
has_and_belongs_to_many declarations, resolved with Rails naming conventions.\n\n\
Run against a directory or a single file:\n  \
entwine app/models",
    after_help = "\
Examples:
  entwine .                        Analyze current directory
  entwine app/models               Analyze one directory
  entwine . --format json          JSON output for scripting
  entwine . -f html -o graph.html  Standalone HTML report
  entwine . -f csv                 One row per edge

Defaults and exclusions are read from entwine.toml in the analyzed root."
)]
pub struct Cli {
    /// Path to analyze (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format: text, json, csv, html
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64, default: all cores)
    #[arg(long, value_parser = parse_workers)]
    pub workers: Option<usize>,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if let Some(workers) = cli.workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .ok();
    }

    let config = config::load_config(config_root(&cli.path));

    // CLI flag wins over the project default
    let format_name = cli
        .format
        .as_deref()
        .or(config.defaults.format.as_deref())
        .unwrap_or("text")
        .to_string();
    let format = OutputFormat::from_str(&format_name)?;

    let pipeline = Pipeline::new(&cli.path, config);
    let (graph, stats) = pipeline.run()?;

    let rendered = reporters::report_with_format(&graph, format)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Report written to: {}", style(path.display()).cyan());
        }
        None => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }

    eprintln!("{}", style(stats.summary(&graph.stats())).dim());

    Ok(())
}

/// Project config lives next to the analyzed sources; for a file root
/// that is the containing directory.
fn config_root(path: &Path) -> &Path {
    if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path
    }
}
