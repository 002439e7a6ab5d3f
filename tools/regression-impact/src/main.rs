//! Binary entrypoint: analyze changed files given as arguments or stdin lines.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use regression_impact::config::{DEFAULT_RULES_PATH, RULES_PATH_ENV};
use regression_impact::{report, Config, OutputFormat};

/// Detect impacted components and recommend regression testing level.
#[derive(Debug, Parser)]
#[command(name = "regression-impact", version)]
struct Args {
  /// Path to component mapping rules (JSON).
  #[arg(long, env = RULES_PATH_ENV, default_value = DEFAULT_RULES_PATH)]
  rules: PathBuf,

  /// Changed files (space-separated). If omitted, reads from stdin.
  #[arg(long, num_args = 0..)]
  changed: Option<Vec<String>>,

  /// Output format.
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,
}

fn main() -> ExitCode {
  // Log to stderr; stdout carries the report.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .init();

  match run_binary() {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      let _ = writeln!(io::stderr(), "regression-impact error: {}", e);
      ExitCode::FAILURE
    }
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let args = Args::parse();
  let config = Config {
    rules_path: args.rules,
    format: args.format,
  };

  let changed_files = match args.changed.filter(|files| !files.is_empty()) {
    Some(files) => files,
    None => {
      let mut raw = String::new();
      io::stdin().lock().read_to_string(&mut raw)?;
      report::parse_changed_files(&raw)
    }
  };
  tracing::debug!(rules = %config.rules_path.display(), files = changed_files.len(), "starting analysis");

  let result = regression_impact::analyze_change_set(&config.rules_path, &changed_files)?;
  let out = report::render(&result, config.format)?;
  io::stdout().write_all(out.as_bytes())?;
  Ok(())
}
