//! Asset embedding generator.
//!
//! Turns every JS asset into a C++ header exposing the asset's verbatim
//! contents as an `inline constexpr` raw string constant, so the runtime
//! can compile its script assets straight into the library. The raw
//! literal's boundary token is synthesized once per run and checked against
//! every asset's contents before use (see [`delimiter`]).

pub mod delimiter;

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::config::ToolConfig;
use crate::error::{GenError, GenResult};

/// One discovered asset: base name plus its full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// File base name without extension; drives the guard symbol, the
    /// constant name, and the output header name
    pub name: String,
    /// Verbatim file contents, embedded byte-for-byte
    pub raw_contents: String,
}

impl AssetDescriptor {
    /// `foo` → `INCLUDE_FOO`
    pub fn guard_symbol(&self) -> String {
        format!("INCLUDE_{}", self.name.to_uppercase())
    }

    /// `foo` → `foo_contents`
    pub fn constant_name(&self) -> String {
        format!("{}_contents", self.name)
    }
}

/// The asset embedding generator.
pub struct AssetEmbedder {
    config: ToolConfig,
}

impl AssetEmbedder {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Embed every discovered asset with one shared delimiter. Reports each
    /// asset on stdout as it is processed; the first I/O failure aborts the
    /// rest of the run.
    pub fn run(&self) -> GenResult<()> {
        let assets = self.discover()?;
        debug!(count = assets.len(), "discovered assets");

        let payloads: Vec<&str> = assets.iter().map(|a| a.raw_contents.as_str()).collect();
        let delimiter = delimiter::synthesize(
            &payloads,
            self.config.delimiter_length,
            self.config.delimiter_retries,
        )?;

        for asset in &assets {
            println!("Creating header for {}", asset.name);
            self.embed(asset, &delimiter)?;
        }
        Ok(())
    }

    /// List the asset directory and load one descriptor per file matching
    /// the configured extension, in sorted name order.
    pub fn discover(&self) -> GenResult<Vec<AssetDescriptor>> {
        let entries = fs::read_dir(&self.config.asset_dir).map_err(|e| GenError::Discovery {
            dir: self.config.asset_dir.clone(),
            source: e,
        })?;

        let mut assets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| GenError::Discovery {
                dir: self.config.asset_dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(self.config.asset_extension.as_str()) {
                continue;
            }
            let Some(name) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
            else {
                continue;
            };
            let raw_contents = fs::read_to_string(&path).map_err(|e| GenError::io(&path, e))?;
            assets.push(AssetDescriptor { name, raw_contents });
        }

        assets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(assets)
    }

    /// Write the header artifact for one asset, overwriting any previous
    /// version.
    pub fn embed(&self, asset: &AssetDescriptor, delimiter: &str) -> GenResult<()> {
        let path = self.header_path(asset);
        fs::write(&path, render_header(asset, delimiter)).map_err(|e| GenError::io(&path, e))?;
        debug!(path = %path.display(), "wrote header");
        Ok(())
    }

    /// `<asset_dir>/include_<name>.h`
    pub fn header_path(&self, asset: &AssetDescriptor) -> PathBuf {
        self.config.asset_dir.join(format!("include_{}.h", asset.name))
    }
}

/// Render the include-guarded header body for one asset.
pub fn render_header(asset: &AssetDescriptor, delimiter: &str) -> String {
    format!(
        r##"#ifndef {guard}
#define {guard}

inline constexpr const char* {constant} = R"{delim}({contents}){delim}";

#endif // {guard}
"##,
        guard = asset.guard_symbol(),
        constant = asset.constant_name(),
        delim = delimiter,
        contents = asset.raw_contents,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, contents: &str) -> AssetDescriptor {
        AssetDescriptor {
            name: name.to_string(),
            raw_contents: contents.to_string(),
        }
    }

    #[test]
    fn guard_and_constant_derivation() {
        let asset = asset("foo", "");
        assert_eq!(asset.guard_symbol(), "INCLUDE_FOO");
        assert_eq!(asset.constant_name(), "foo_contents");
    }

    #[test]
    fn header_wraps_contents_verbatim() {
        let asset = asset("console", "globalThis.console = {};\n");
        let header = render_header(&asset, "qwleg");
        assert!(header.contains("#ifndef INCLUDE_CONSOLE"));
        assert!(header.contains("#define INCLUDE_CONSOLE"));
        assert!(header.contains(
            "inline constexpr const char* console_contents = R\"qwleg(globalThis.console = {};\n)qwleg\";"
        ));
        assert!(header.contains("#endif // INCLUDE_CONSOLE"));
    }

    #[test]
    fn contents_are_not_escaped() {
        // Quotes, backslashes, and braces ride through untouched
        let asset = asset("tricky", r#"say("a\"b\\c", `${x}`);"#);
        let header = render_header(&asset, "abcde");
        assert!(header.contains(r#"R"abcde(say("a\"b\\c", `${x}`);)abcde""#));
    }
}
