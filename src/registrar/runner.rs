//! Runner-script assembly.
//!
//! Emits a self-contained Python `unittest` script with one test case per
//! descriptor. Each case runs the matching compiled test binary and asserts
//! its exit status against the configured pass convention (0 for ejr — the
//! repository's test binaries return 0 on success, and that contract is
//! stated explicitly per test case rather than assumed).
//!
//! The script can regenerate itself: when the regen flag is present in the
//! environment, its `__main__` block re-invokes the registration step
//! (without triggering a build) before running.

use crate::config::ToolConfig;

use super::TestDescriptor;

/// Render the complete runner script for this run's descriptors.
pub fn render(descriptors: &[TestDescriptor], config: &ToolConfig) -> String {
    let mut cases: String = descriptors
        .iter()
        .map(|descriptor| test_case(descriptor, config))
        .collect();
    if cases.is_empty() {
        // A class body cannot be empty in Python
        cases.push_str("    pass");
    }

    format!(
        r#"# Generated by ejr-devtools; do not edit.
import os
import subprocess
import unittest


class Test(unittest.TestCase):
{cases}

if __name__ == "__main__":
    if os.environ.get("{regen_flag}"):
        subprocess.call(["ejr-devtools", "register-tests", "--no-build"])
    os.chdir("{build_dir}/")
    unittest.main()
"#,
        cases = cases.trim_end(),
        regen_flag = config.regen_flag,
        build_dir = config.build_dir.display(),
    )
}

/// One test case: run the binary, check the exit code.
fn test_case(descriptor: &TestDescriptor, config: &ToolConfig) -> String {
    format!(
        r#"    def test_{name}(self):
        # {prefix}{name} exits {expected} on pass
        code = subprocess.call(["{prefix}{name}"])
        self.assertEqual(code, {expected}, "{name} failed")

"#,
        name = descriptor.name,
        prefix = config.target_prefix,
        expected = config.expected_exit_code,
    )
}
