//! Catalogue tables: the raw, unparsed definitions a host registers at startup.

mod compile;
mod parse;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use parse::{PRELUDE_NAME, parse_catalogue};

/// Key holding generic parameters (`NAME` or `NAME=DEFAULT`).
pub const MACRO_KEY: &str = "$macro";
/// Key holding the supertype expression of a struct.
pub const SUPER_KEY: &str = "$super";
/// Key turning a table into a (possibly generic) alias.
pub const TYPE_KEY: &str = "$type";
/// Alias text denoting a struct with no fields.
pub const EMPTY_STRUCT: &str = "{}";

/// A catalogue document.
///
/// ```toml
/// [catalogue]
/// name = "Std.UI.Types"
///
/// [types]
/// "UI.Size" = "UI.Length|number"
///
/// [types."UI.Decorator"]
/// "$macro" = ["W=UI.Widget"]
/// "$super" = "UI.Widget"
/// subject = "W?"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Catalogue {
    /// Catalogue metadata
    #[serde(rename = "catalogue", default)]
    pub meta: CatalogueMeta,

    /// Type definitions in declaration order
    #[serde(default)]
    pub types: IndexMap<String, RawDefinition>,
}

/// Catalogue metadata.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogueMeta {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

/// A definition as written in a catalogue, before any parsing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawDefinition {
    /// Alias expression, or `{}` for an empty struct.
    Expr(String),
    /// Struct fields plus `$`-prefixed directives.
    Table(IndexMap<String, RawEntry>),
}

/// A value inside a definition table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawEntry {
    Text(String),
    List(Vec<String>),
}

impl RawDefinition {
    /// Build a table definition from `(key, text)` pairs.
    pub fn table<K: Into<String>, V: Into<String>>(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        RawDefinition::Table(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), RawEntry::Text(v.into())))
                .collect(),
        )
    }

    /// Add generic parameters to a table definition.
    pub fn with_macro<S: Into<String>>(self, params: impl IntoIterator<Item = S>) -> Self {
        let params = RawEntry::List(params.into_iter().map(Into::into).collect());
        match self {
            RawDefinition::Table(mut entries) => {
                entries.shift_insert(0, MACRO_KEY.to_string(), params);
                RawDefinition::Table(entries)
            }
            RawDefinition::Expr(expr) => RawDefinition::Table(IndexMap::from([
                (MACRO_KEY.to_string(), params),
                (TYPE_KEY.to_string(), RawEntry::Text(expr)),
            ])),
        }
    }
}

impl From<&str> for RawDefinition {
    fn from(expr: &str) -> Self {
        RawDefinition::Expr(expr.to_string())
    }
}

impl Catalogue {
    /// Create an empty catalogue with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            meta: CatalogueMeta {
                name: name.into(),
                description: None,
            },
            types: IndexMap::new(),
        }
    }

    /// Append a definition, replacing one with the same name.
    pub fn define(mut self, name: impl Into<String>, raw: impl Into<RawDefinition>) -> Self {
        self.types.insert(name.into(), raw.into());
        self
    }

    /// Definitions in declaration order.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &RawDefinition)> {
        self.types.iter().map(|(name, raw)| (name.as_str(), raw))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
