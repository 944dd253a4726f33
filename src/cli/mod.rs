//! CLI module for ejr-devtools
//!
//! ## Commands
//!
//! - `register-tests` - Sync CMake test targets and the runner script, then build
//! - `embed-assets` - Embed JS assets as C++ raw string headers
//!
//! Both commands run with no required arguments; optional flags override
//! the default ejr project conventions.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

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
    /// Create a new CLI error with a message and exit code.
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

    /// Create an error with a custom exit code.
    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self::new(message, ExitCode(code))
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

/// Build-time code generators for the ejr native library
#[derive(Parser, Debug)]
#[command(name = "ejr-devtools")]
#[command(version = VERSION)]
#[command(about = "Build-time code generators for the ejr native library", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sync CMake test targets and the runner script with tests/*.c, then build
    RegisterTests {
        /// Test-source directory (default: tests)
        #[arg(long, value_name = "DIR")]
        tests_dir: Option<PathBuf>,
        /// Build-configuration file (default: CMakeLists.txt)
        #[arg(long, value_name = "FILE")]
        build_file: Option<PathBuf>,
        /// Runner-script output path (default: scripts/run_tests.py)
        #[arg(long, value_name = "FILE")]
        runner_script: Option<PathBuf>,
        /// Build working directory (default: build)
        #[arg(long, value_name = "DIR")]
        build_dir: Option<PathBuf>,
        /// Regenerate artifacts without invoking the build tool
        #[arg(long)]
        no_build: bool,
    },

    /// Embed js/*.js assets as include-guarded C++ raw string headers
    EmbedAssets {
        /// Asset directory (default: js)
        #[arg(long, value_name = "DIR")]
        asset_dir: Option<PathBuf>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
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

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::RegisterTests {
            tests_dir,
            build_file,
            runner_script,
            build_dir,
            no_build,
        } => commands::register_tests(tests_dir, build_file, runner_script, build_dir, no_build),
        Command::EmbedAssets { asset_dir } => commands::embed_assets(asset_dir),
    }
}

// ============================================================================
// Tests
// ============================================================================
