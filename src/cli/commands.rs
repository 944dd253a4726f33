//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::PathBuf;

use crate::config::ToolConfig;
use crate::embedder::AssetEmbedder;
use crate::error::GenError;
use crate::registrar::TestRegistrar;

use super::{CliError, CliResult, ExitCode};

/// Build the shared convention set, applying any CLI overrides.
fn configure(
    tests_dir: Option<PathBuf>,
    build_file: Option<PathBuf>,
    runner_script: Option<PathBuf>,
    build_dir: Option<PathBuf>,
    asset_dir: Option<PathBuf>,
) -> ToolConfig {
    let mut config = ToolConfig::default();
    if let Some(dir) = tests_dir {
        config = config.with_tests_dir(dir);
    }
    if let Some(path) = build_file {
        config = config.with_build_file(path);
    }
    if let Some(path) = runner_script {
        config = config.with_runner_script(path);
    }
    if let Some(dir) = build_dir {
        config = config.with_build_dir(dir);
    }
    if let Some(dir) = asset_dir {
        config = config.with_asset_dir(dir);
    }
    config
}

/// `register-tests`: discover test sources, rewrite the build file's
/// generated region, emit the runner script, and trigger the build.
///
/// The build tool's exit status becomes the process exit status.
pub fn register_tests(
    tests_dir: Option<PathBuf>,
    build_file: Option<PathBuf>,
    runner_script: Option<PathBuf>,
    build_dir: Option<PathBuf>,
    no_build: bool,
) -> CliResult<ExitCode> {
    let config = configure(tests_dir, build_file, runner_script, build_dir, None);
    let registrar = TestRegistrar::new(config);

    let build_exit = registrar.run(no_build).map_err(into_cli_error)?;
    Ok(ExitCode(build_exit))
}

/// `embed-assets`: wrap every asset in an include-guarded raw string
/// header. Completes silently apart from per-asset progress lines.
pub fn embed_assets(asset_dir: Option<PathBuf>) -> CliResult<ExitCode> {
    let config = configure(None, None, None, None, asset_dir);
    let embedder = AssetEmbedder::new(config);

    embedder.run().map_err(into_cli_error)?;
    Ok(ExitCode::SUCCESS)
}

/// Map generator failures onto user-facing CLI errors. Every variant is
/// fatal with exit code 1; a build tool that ran but failed is reported
/// through the `Ok(exit_code)` path instead.
fn into_cli_error(err: GenError) -> CliError {
    CliError::failure(format!("Error: {}", err))
}
