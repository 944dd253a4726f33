#![forbid(unsafe_code)]
//! Build-time code generators for the ejr native library.
//!
//! ejr keeps two kinds of generated glue in its tree: the CMake registration
//! entries for its C test binaries (plus a Python runner script that executes
//! them), and C++ headers that embed the runtime's JS assets as raw string
//! constants. This crate regenerates both, wholesale, from the current
//! on-disk state:
//!
//! - [`TestRegistrar`] — sync the build file's generated region and the
//!   runner script with `tests/*.c`, then trigger an incremental build.
//! - [`AssetEmbedder`] — wrap each `js/*.js` asset in an include-guarded
//!   raw string literal header, with a collision-checked delimiter.
//!
//! All shared conventions (directories, sentinel text, exit-code contract)
//! live in one [`ToolConfig`] value handed to both generators.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//!   The `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: the generators emit CMake, Python, and C++ text;
//!   anything inside those templates is output, not calls made by this crate.

pub mod cli;
pub mod config;
pub mod embedder;
pub mod error;
pub mod registrar;

pub use config::ToolConfig;
pub use embedder::AssetEmbedder;
pub use error::{GenError, GenResult};
pub use registrar::TestRegistrar;
