//! Line-oriented model of the build-configuration file.
//!
//! The file is split at its sentinel line into a human-owned prefix and a
//! machine-owned suffix. Everything up to and including the sentinel is
//! preserved verbatim; everything after is discarded and regenerated from
//! the current descriptor set on every run.

use std::fs;
use std::path::Path;

use crate::config::ToolConfig;
use crate::error::{GenError, GenResult};

use super::TestDescriptor;

/// An ordered sequence of non-blank lines from the build file.
#[derive(Debug, Clone)]
pub struct BuildFileDocument {
    lines: Vec<String>,
}

impl BuildFileDocument {
    /// Read the build file, dropping blank lines.
    pub fn read(path: &Path) -> GenResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        Ok(Self::from_source(&raw))
    }

    pub fn from_source(raw: &str) -> Self {
        let lines = raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    /// Index of the sentinel line, by substring match.
    ///
    /// A match on the very first line is rejected the same as no match: a
    /// well-formed build file always has at least its project preamble
    /// before the guarded test section, so a line-0 hit means the file is
    /// malformed rather than usable.
    pub fn sentinel_index(&self, sentinel: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.contains(sentinel))
            .filter(|&index| index >= 1)
    }

    /// Truncate to the preserved prefix (sentinel inclusive) and append one
    /// registration block per descriptor, followed by the region
    /// terminator. Nothing is mutated when the sentinel is missing.
    pub fn splice_registrations(
        &mut self,
        descriptors: &[TestDescriptor],
        config: &ToolConfig,
    ) -> GenResult<()> {
        let Some(sentinel_index) = self.sentinel_index(&config.sentinel) else {
            return Err(GenError::Configuration(format!(
                "sentinel line containing {:?} not found in {}",
                config.sentinel,
                config.build_file.display()
            )));
        };

        self.lines.truncate(sentinel_index + 1);
        for descriptor in descriptors {
            for line in registration_block(descriptor, config).lines() {
                self.lines.push(line.to_string());
            }
        }
        self.lines.push(config.region_terminator.clone());
        Ok(())
    }

    /// Render the document back to text.
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    pub fn write(&self, path: &Path) -> GenResult<()> {
        fs::write(path, self.render()).map_err(|e| GenError::io(path, e))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// One CMake registration block: an executable target for the test source,
/// the public include path, and a link against the library under test.
fn registration_block(descriptor: &TestDescriptor, config: &ToolConfig) -> String {
    format!(
        r#"    # ------------------------------
    # Test {name}
    # ------------------------------
    add_executable({prefix}{name} {tests_dir}/{file})
    target_include_directories({prefix}{name} PRIVATE ${{PROJECT_SOURCE_DIR}}/include)
    target_link_libraries({prefix}{name} PRIVATE {library})"#,
        name = descriptor.name,
        file = descriptor.source_file_name,
        prefix = config.target_prefix,
        tests_dir = config.tests_dir.display(),
        library = config.library_name,
    )
}
