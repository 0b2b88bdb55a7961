//! Explain command report data structures.

use serde::Serialize;
use uischema_engine::CacheStats;

use super::output::{Output, Report};

/// Report data from explaining one type.
#[derive(Debug, Serialize)]
pub struct ExplainReport {
    /// The requested type name.
    pub target: String,
    /// Catalogue that declared the type.
    pub catalogue: Option<String>,
    pub shape: Shape,
    /// Resolution cache after explaining.
    pub cache: CacheStats,
}

/// What a type resolved to.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Struct {
        /// Instantiation with default arguments filled in.
        instance: String,
        lineage: Vec<String>,
        fields: Vec<FieldInfo>,
    },
    Alias {
        expands_to: String,
    },
}

/// One flattened field.
#[derive(Debug, Serialize)]
pub struct FieldInfo {
    pub name: String,
    pub ty: String,
    /// Instantiation that declared the field.
    pub origin: String,
    /// Annotation tags, empty for plain data.
    pub annotations: String,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.target);
        if let Some(catalogue) = &self.catalogue {
            out.key_value("Catalogue", catalogue);
        }

        match &self.shape {
            Shape::Alias { expands_to } => {
                out.key_value("Alias of", expands_to);
            }
            Shape::Struct {
                instance,
                lineage,
                fields,
            } => {
                out.key_value("Instance", instance);
                out.newline();

                out.section("Lineage");
                for ancestor in lineage {
                    out.list_item(ancestor);
                }
                out.newline();

                out.section("Fields");
                for field in fields {
                    let mut line = format!("{}: {}", field.name, field.ty);
                    if !field.annotations.is_empty() {
                        line.push(' ');
                        line.push_str(&field.annotations);
                    }
                    if field.origin != *instance {
                        line.push_str(&format!(" (from {})", field.origin));
                    }
                    out.list_item(&line);
                }
            }
        }

        out.newline();
        out.key_value(
            "Cache",
            &format!(
                "{} entries, {} hits, {} misses",
                self.cache.entries, self.cache.hits, self.cache.misses
            ),
        );
    }
}
