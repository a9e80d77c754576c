//! CLI for the vmodc compiler.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.
//!
//! Fatal diagnostics print one `ERROR: ...` line to stderr and exit 1;
//! non-fatal diagnostics print `WARNING: ...` and only abort the run when
//! the affected entity cannot be emitted.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod output;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Compiler for VMOD interface descriptions
#[derive(Parser, Debug)]
#[command(name = "vmodc")]
#[command(version = VERSION)]
#[command(about = "Compiler for VMOD interface descriptions", long_about = None)]
pub struct Cli {
    /// Input interface description (default: vmod.vcc)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Be strict when parsing the input file
    #[arg(short = 'N', long = "strict")]
    pub strict: bool,

    /// Output file prefix
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PREFIX",
        default_value = "vcc_if"
    )]
    pub output: String,

    /// Where to save the generated RST files
    #[arg(
        short = 'w',
        long = "rstdir",
        value_name = "DIRECTORY",
        default_value = "."
    )]
    pub rstdir: PathBuf,

    /// Also emit automake boilerplate
    #[arg(short = 'b', long = "boilerplate")]
    pub boilerplate: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. The compile
/// implementation returns `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match commands::compile(&cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["vmodc"]).unwrap();
        assert_eq!(cli.file, None);
        assert!(!cli.strict);
        assert_eq!(cli.output, "vcc_if");
        assert_eq!(cli.rstdir, PathBuf::from("."));
        assert!(!cli.boilerplate);
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::try_parse_from([
            "vmodc",
            "-N",
            "-o",
            "demo_if",
            "-w",
            "docs",
            "-b",
            "vmod.vcc",
        ])
        .unwrap();
        assert!(cli.strict);
        assert_eq!(cli.output, "demo_if");
        assert_eq!(cli.rstdir, PathBuf::from("docs"));
        assert!(cli.boilerplate);
        assert_eq!(cli.file, Some(PathBuf::from("vmod.vcc")));
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::try_parse_from(["vmodc", "--strict", "--boilerplate", "--output", "x"])
            .unwrap();
        assert!(cli.strict);
        assert!(cli.boilerplate);
        assert_eq!(cli.output, "x");
    }
}
