//! Integration tests for the test registration generator
//!
//! Each test builds a throwaway project layout (tests dir, CMakeLists.txt,
//! scripts dir) in a tempdir and runs the registrar's non-build pipeline
//! against it.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use ejr_devtools::registrar::TestRegistrar;
use ejr_devtools::{GenError, ToolConfig};

const BUILD_FILE: &str = "\
cmake_minimum_required(VERSION 3.20)
project(ejr)
add_library(ejr src/ejr.cpp)
if (DEFINED ENV{EJR_TESTS})
endif()
";

/// Lay out a minimal project and return a config pointing into it.
fn project_with_tests(test_names: &[&str]) -> (TempDir, ToolConfig) {
    let dir = TempDir::new().unwrap();
    let tests_dir = dir.path().join("tests");
    fs::create_dir(&tests_dir).unwrap();
    for name in test_names {
        fs::write(tests_dir.join(format!("{}.c", name)), "int main() { return 0; }").unwrap();
    }

    let build_file = dir.path().join("CMakeLists.txt");
    fs::write(&build_file, BUILD_FILE).unwrap();

    fs::create_dir(dir.path().join("scripts")).unwrap();
    let runner_script = dir.path().join("scripts/run_tests.py");

    let config = ToolConfig::default()
        .with_tests_dir(tests_dir)
        .with_build_file(build_file)
        .with_runner_script(runner_script);
    (dir, config)
}

fn regenerate(config: &ToolConfig) {
    let registrar = TestRegistrar::new(config.clone());
    let descriptors = registrar.discover().unwrap();
    registrar.rewrite_build_file(&descriptors).unwrap();
    registrar.emit_runner_script(&descriptors).unwrap();
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn registers_every_test_exactly_once() {
    let (_dir, config) = project_with_tests(&["alpha", "beta"]);
    regenerate(&config);

    let build = read(&config.build_file);
    assert_eq!(build.matches("add_executable(libejr_alpha ").count(), 1);
    assert_eq!(build.matches("add_executable(libejr_beta ").count(), 1);
    assert_eq!(build.matches("add_executable(").count(), 2);
    assert_eq!(build.matches("target_link_libraries(").count(), 2);

    let runner = read(&config.runner_script);
    assert_eq!(runner.matches("def test_alpha(self):").count(), 1);
    assert_eq!(runner.matches("def test_beta(self):").count(), 1);
    assert_eq!(runner.matches("def test_").count(), 2);
}

#[test]
fn build_entries_and_runner_cases_share_one_order() {
    let (_dir, config) = project_with_tests(&["beta", "alpha", "gamma"]);
    regenerate(&config);

    let build = read(&config.build_file);
    let runner = read(&config.runner_script);

    let build_order: Vec<usize> = ["libejr_alpha", "libejr_beta", "libejr_gamma"]
        .iter()
        .map(|t| build.find(&format!("add_executable({} ", t)).unwrap())
        .collect();
    let runner_order: Vec<usize> = ["test_alpha", "test_beta", "test_gamma"]
        .iter()
        .map(|t| runner.find(&format!("def {}(self):", t)).unwrap())
        .collect();

    assert!(build_order.is_sorted());
    assert!(runner_order.is_sorted());
}

#[test]
fn rewrite_is_idempotent() {
    let (_dir, config) = project_with_tests(&["alpha", "beta"]);
    regenerate(&config);
    let build_first = read(&config.build_file);
    let runner_first = read(&config.runner_script);

    regenerate(&config);
    assert_eq!(read(&config.build_file), build_first);
    assert_eq!(read(&config.runner_script), runner_first);
}

#[test]
fn prefix_before_sentinel_is_preserved_verbatim() {
    let (_dir, config) = project_with_tests(&["alpha"]);
    regenerate(&config);

    let build = read(&config.build_file);
    let sentinel_line = build
        .lines()
        .find(|l| l.contains("DEFINED ENV{EJR_TESTS}"))
        .unwrap();
    let prefix_end = build.find(sentinel_line).unwrap() + sentinel_line.len();
    let prefix = &build[..prefix_end];

    assert!(prefix.starts_with("cmake_minimum_required(VERSION 3.20)"));
    assert!(prefix.contains("add_library(ejr src/ejr.cpp)"));
    // The prefix holds no generated content
    assert!(!prefix.contains("libejr_"));
}

#[test]
fn stale_entries_are_dropped_when_a_test_is_removed() {
    let (_dir, config) = project_with_tests(&["alpha", "beta"]);
    regenerate(&config);

    fs::remove_file(config.tests_dir.join("beta.c")).unwrap();
    regenerate(&config);

    let build = read(&config.build_file);
    assert!(build.contains("libejr_alpha"));
    assert!(!build.contains("libejr_beta"));
    let runner = read(&config.runner_script);
    assert!(!runner.contains("test_beta"));
}

#[test]
fn missing_sentinel_fails_without_modifying_the_file() {
    let (_dir, config) = project_with_tests(&["alpha"]);
    fs::write(&config.build_file, "project(ejr)\nadd_library(ejr src/ejr.cpp)\n").unwrap();
    let before = read(&config.build_file);

    let registrar = TestRegistrar::new(config.clone());
    let descriptors = registrar.discover().unwrap();
    let err = registrar.rewrite_build_file(&descriptors).unwrap_err();

    assert!(matches!(err, GenError::Configuration(_)));
    assert_eq!(read(&config.build_file), before);
}

#[test]
fn sentinel_on_the_first_line_counts_as_missing() {
    let (_dir, config) = project_with_tests(&["alpha"]);
    fs::write(&config.build_file, "if (DEFINED ENV{EJR_TESTS})\nendif()\n").unwrap();

    let registrar = TestRegistrar::new(config.clone());
    let descriptors = registrar.discover().unwrap();
    let err = registrar.rewrite_build_file(&descriptors).unwrap_err();
    assert!(matches!(err, GenError::Configuration(_)));
}

#[test]
fn generated_region_ends_with_the_terminator() {
    let (_dir, config) = project_with_tests(&["alpha"]);
    regenerate(&config);
    assert!(read(&config.build_file).trim_end().ends_with("endif()"));
}

#[test]
fn runner_asserts_exit_code_zero_for_every_case() {
    let (_dir, config) = project_with_tests(&["alpha", "beta"]);
    regenerate(&config);

    let runner = read(&config.runner_script);
    assert_eq!(runner.matches("self.assertEqual(code, 0,").count(), 2);
    assert!(runner.contains(r#"subprocess.call(["libejr_alpha"])"#));
    assert!(runner.contains(r#"subprocess.call(["libejr_beta"])"#));
}
