//! Shared conventions for both generators.
//!
//! The registration and embedding tools only cooperate through filesystem
//! conventions: where test sources live, what the build file's sentinel line
//! says, which exit code means "pass". Historically those were duplicated
//! literals scattered across scripts; here they are a single [`ToolConfig`]
//! value constructed once and passed into both generators.

use std::path::PathBuf;

/// Bumped whenever a convention in [`ToolConfig`] changes meaning, so that
/// generated artifacts can be traced back to the convention set that
/// produced them.
pub const CONFIG_VERSION: u32 = 1;

/// The convention set shared by [`TestRegistrar`](crate::TestRegistrar) and
/// [`AssetEmbedder`](crate::AssetEmbedder).
///
/// `Default` gives the ejr project layout. Builder-style setters exist for
/// the fields the CLI lets callers override.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Directory scanned for test sources
    pub tests_dir: PathBuf,
    /// Extension (without dot) a file must have to count as a test source
    pub test_extension: String,
    /// Build-configuration file owning the generated region
    pub build_file: PathBuf,
    /// Substring identifying the line where the generated region begins
    pub sentinel: String,
    /// Line closing the generated region
    pub region_terminator: String,
    /// Prefix of every generated test executable target
    pub target_prefix: String,
    /// Library every test target links against
    pub library_name: String,
    /// Path the runner script is written to
    pub runner_script: PathBuf,
    /// Working directory for the build subprocess
    pub build_dir: PathBuf,
    /// Build tool executable
    pub build_tool: String,
    /// Arguments for the build tool's incremental build
    pub build_args: Vec<String>,
    /// Environment variable telling the build file to include test targets
    pub env_flag: String,
    /// Environment variable the runner script checks before re-registering
    pub regen_flag: String,
    /// Exit code a test binary must return to count as passing
    pub expected_exit_code: i32,
    /// Directory scanned for embeddable assets
    pub asset_dir: PathBuf,
    /// Extension (without dot) a file must have to count as an asset
    pub asset_extension: String,
    /// Length of the raw-literal boundary token
    pub delimiter_length: usize,
    /// How many candidate delimiters to try before failing closed
    pub delimiter_retries: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tests_dir: PathBuf::from("tests"),
            test_extension: "c".to_string(),
            build_file: PathBuf::from("CMakeLists.txt"),
            sentinel: "DEFINED ENV{EJR_TESTS}".to_string(),
            region_terminator: "endif()".to_string(),
            target_prefix: "libejr_".to_string(),
            library_name: "ejr".to_string(),
            runner_script: PathBuf::from("scripts/run_tests.py"),
            build_dir: PathBuf::from("build"),
            build_tool: "cmake".to_string(),
            build_args: vec!["--build".to_string(), ".".to_string()],
            env_flag: "EJR_TESTS".to_string(),
            regen_flag: "EJR_REGEN".to_string(),
            expected_exit_code: 0,
            asset_dir: PathBuf::from("js"),
            asset_extension: "js".to_string(),
            delimiter_length: 5,
            delimiter_retries: 64,
        }
    }
}

impl ToolConfig {
    /// Override the test-source directory.
    pub fn with_tests_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tests_dir = dir.into();
        self
    }

    /// Override the build-configuration file.
    pub fn with_build_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.build_file = path.into();
        self
    }

    /// Override the runner-script output path.
    pub fn with_runner_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.runner_script = path.into();
        self
    }

    /// Override the build working directory.
    pub fn with_build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = dir.into();
        self
    }

    /// Override the asset directory.
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }
}
