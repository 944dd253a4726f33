//! Test registration generator.
//!
//! Keeps two artifacts in sync with the contents of the test-source
//! directory: the generated region of the CMake build file (one executable
//! target per test source) and the Python runner script (one test case per
//! test source). Both are regenerated wholesale on every run, in the same
//! traversal order, so the target names referenced by the runner always
//! match the targets the build file declares.

pub mod build_file;
pub mod runner;

use std::fs;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::ToolConfig;
use crate::error::{GenError, GenResult};

use self::build_file::BuildFileDocument;

/// One discovered test source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDescriptor {
    /// Base name without extension; unique per run, used in generated
    /// identifiers (`libejr_{name}`, `test_{name}`)
    pub name: String,
    /// File name including extension, relative to the tests directory
    pub source_file_name: String,
}

/// The test registration generator.
pub struct TestRegistrar {
    config: ToolConfig,
}

impl TestRegistrar {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Run the full registration pipeline: discover, rewrite the build
    /// file, emit the runner script, and (unless `no_build`) trigger an
    /// incremental build. Returns the build subprocess's exit code, or 0
    /// when the build is skipped.
    pub fn run(&self, no_build: bool) -> GenResult<i32> {
        let descriptors = self.discover()?;
        debug!(count = descriptors.len(), "discovered test sources");

        self.rewrite_build_file(&descriptors)?;
        self.emit_runner_script(&descriptors)?;

        if no_build {
            return Ok(0);
        }
        self.trigger_build()
    }

    /// List the test-source directory and derive one descriptor per file
    /// matching the configured extension. Enumeration order is made
    /// deterministic by sorting on file name, and the same descriptor
    /// slice feeds both artifact emitters.
    pub fn discover(&self) -> GenResult<Vec<TestDescriptor>> {
        let entries = fs::read_dir(&self.config.tests_dir).map_err(|e| GenError::Discovery {
            dir: self.config.tests_dir.clone(),
            source: e,
        })?;

        let mut descriptors = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| GenError::Discovery {
                dir: self.config.tests_dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(self.config.test_extension.as_str()) {
                continue;
            }
            // Normalize separators so derived names are identical on
            // Windows and Unix
            let normalized = path.to_string_lossy().replace('\\', "/");
            let Some(source_file_name) = normalized.rsplit('/').next().map(str::to_string) else {
                continue;
            };
            let Some(name) = source_file_name.split('.').next().map(str::to_string) else {
                continue;
            };
            descriptors.push(TestDescriptor {
                name,
                source_file_name,
            });
        }

        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(descriptors)
    }

    /// Rewrite the build file's generated region with one registration
    /// block per descriptor, preserving everything up to and including the
    /// sentinel line byte-for-byte. Fails with a configuration error (and
    /// no write) if the sentinel is absent.
    pub fn rewrite_build_file(&self, descriptors: &[TestDescriptor]) -> GenResult<()> {
        let mut document = BuildFileDocument::read(&self.config.build_file)?;
        document.splice_registrations(descriptors, &self.config)?;
        document.write(&self.config.build_file)?;
        debug!(path = %self.config.build_file.display(), "rewrote build file");
        Ok(())
    }

    /// Assemble and write the Python runner script, one test case per
    /// descriptor in the same order the build file saw them.
    pub fn emit_runner_script(&self, descriptors: &[TestDescriptor]) -> GenResult<()> {
        let script = runner::render(descriptors, &self.config);
        fs::write(&self.config.runner_script, script)
            .map_err(|e| GenError::io(&self.config.runner_script, e))?;
        debug!(path = %self.config.runner_script.display(), "emitted runner script");
        Ok(())
    }

    /// Invoke the build tool's incremental build in the build directory,
    /// blocking until it finishes. The tests-enabled flag is injected into
    /// the subprocess environment so the build file's guarded region is
    /// active. The tool's exit code is returned unchanged; interpreting it
    /// is the caller's business.
    pub fn trigger_build(&self) -> GenResult<i32> {
        let status = Command::new(&self.config.build_tool)
            .args(&self.config.build_args)
            .current_dir(&self.config.build_dir)
            .env(&self.config.env_flag, "1")
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| GenError::Subprocess(format!("failed to run {}: {}", self.config.build_tool, e)))?;

        // A killed-by-signal build has no code; report it as plain failure
        Ok(status.code().unwrap_or(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn registrar_for(dir: &std::path::Path) -> TestRegistrar {
        TestRegistrar::new(ToolConfig::default().with_tests_dir(dir))
    }

    #[test]
    fn discover_derives_names_and_skips_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("test_eval.c"), "int main() { return 0; }").unwrap();
        fs::write(dir.path().join("test_repl.c"), "int main() { return 0; }").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a test").unwrap();

        let descriptors = registrar_for(dir.path()).discover().unwrap();
        assert_eq!(
            descriptors,
            vec![
                TestDescriptor {
                    name: "test_eval".into(),
                    source_file_name: "test_eval.c".into(),
                },
                TestDescriptor {
                    name: "test_repl".into(),
                    source_file_name: "test_repl.c".into(),
                },
            ]
        );
    }

    #[test]
    fn discover_missing_directory_is_a_discovery_error() {
        let registrar = registrar_for(&PathBuf::from("no/such/dir"));
        let err = registrar.discover().unwrap_err();
        assert!(matches!(err, GenError::Discovery { .. }));
    }

    #[test]
    fn discover_empty_directory_yields_no_descriptors() {
        let dir = tempfile::tempdir().unwrap();
        let descriptors = registrar_for(dir.path()).discover().unwrap();
        assert!(descriptors.is_empty());
    }
}
