//! Catalogue parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::Catalogue;
use crate::{Error, Result, error::SourceContext};

const PRELUDE: &str = include_str!("../prelude.toml");

/// Catalogue name of the bundled prelude.
pub const PRELUDE_NAME: &str = "Std.Prelude";

impl FromStr for Catalogue {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_catalogue(s, "catalogue.toml")
    }
}

impl Catalogue {
    /// Parse a catalogue file. Files ending in `.json` are read as JSON,
    /// everything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if is_json {
            Self::from_json_str(&content, &filename)
        } else {
            parse_catalogue(&content, &filename)
        }
    }

    /// Parse a TOML catalogue with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_catalogue(content, filename)
    }

    /// Parse a JSON catalogue with a custom filename for error reporting.
    pub fn from_json_str(content: &str, filename: &str) -> Result<Self> {
        let source_ctx = SourceContext::new(content, filename);
        let catalogue: Catalogue =
            serde_json::from_str(content).map_err(|e| source_ctx.json_error(e))?;
        tracing::debug!(filename, types = catalogue.len(), "parsed JSON catalogue");
        Ok(catalogue)
    }

    /// The bundled helper types (`Flag`, `Text`, `Maybe`).
    pub fn prelude() -> Result<Self> {
        parse_catalogue(PRELUDE, "prelude.toml")
    }
}

/// Parse a TOML catalogue with the given filename for error reporting.
pub fn parse_catalogue(content: &str, filename: &str) -> Result<Catalogue> {
    let source_ctx = SourceContext::new(content, filename);
    let catalogue: Catalogue = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    tracing::debug!(filename, types = catalogue.len(), "parsed catalogue");
    Ok(catalogue)
}
