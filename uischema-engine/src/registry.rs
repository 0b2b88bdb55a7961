//! The type registry: one immutable definition per qualified name.

use indexmap::IndexMap;
use uischema_catalogue::{Catalogue, RawDefinition};
use uischema_ir::TypeDefinition;

use crate::{Error, Result};

/// Catalogue name recorded for definitions registered without one.
const ANONYMOUS: &str = "<anonymous>";

#[derive(Debug)]
struct Registered {
    definition: TypeDefinition,
    catalogue: String,
}

/// Mapping from qualified type name to its parsed definition.
///
/// Registration parses every expression up front, so later resolution never
/// touches raw text. Once the registry is handed to an [`Engine`](crate::Engine)
/// it is frozen behind an `Arc`.
#[derive(Debug, Default)]
pub struct Registry {
    definitions: IndexMap<String, Registered>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the bundled prelude (`Flag`, `Text`, `Maybe`).
    pub fn with_prelude() -> Result<Self> {
        let prelude = Catalogue::prelude().map_err(|e| {
            Box::new(Error::Definition {
                name: "prelude".to_string(),
                source: *e,
            })
        })?;
        let mut registry = Self::new();
        registry.register_all(&prelude)?;
        Ok(registry)
    }

    /// Parse and register one definition.
    pub fn register(&mut self, name: &str, raw: &RawDefinition) -> Result<()> {
        self.register_from(name, raw, ANONYMOUS)
    }

    fn register_from(&mut self, name: &str, raw: &RawDefinition, catalogue: &str) -> Result<()> {
        if self.definitions.contains_key(name) {
            return Err(Box::new(Error::DuplicateDefinition {
                name: name.to_string(),
            }));
        }
        let definition = raw.compile(name).map_err(|e| {
            Box::new(Error::Definition {
                name: name.to_string(),
                source: *e,
            })
        })?;
        self.insert_from(definition, catalogue)
    }

    /// Register an already parsed definition.
    pub fn insert(&mut self, definition: TypeDefinition) -> Result<()> {
        self.insert_from(definition, ANONYMOUS)
    }

    fn insert_from(&mut self, definition: TypeDefinition, catalogue: &str) -> Result<()> {
        if self.definitions.contains_key(&definition.name) {
            return Err(Box::new(Error::DuplicateDefinition {
                name: definition.name,
            }));
        }
        tracing::debug!(name = %definition.name, catalogue, "registered type");
        self.definitions.insert(
            definition.name.clone(),
            Registered {
                definition,
                catalogue: catalogue.to_string(),
            },
        );
        Ok(())
    }

    /// Register every definition of a catalogue in declaration order.
    ///
    /// Each definition is registered or rejected on its own; all failures are
    /// reported together once the whole catalogue has been visited.
    pub fn register_all(&mut self, catalogue: &Catalogue) -> Result<()> {
        let source = if catalogue.meta.name.is_empty() {
            ANONYMOUS
        } else {
            catalogue.meta.name.as_str()
        };

        let mut errors = Vec::new();
        for (name, raw) in catalogue.definitions() {
            if let Err(e) = self.register_from(name, raw, source) {
                tracing::warn!(name, error = %e, "rejected definition");
                errors.push(*e);
            }
        }

        match Error::collect(errors) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Look up a definition by qualified name.
    pub fn lookup(&self, name: &str) -> Result<&TypeDefinition> {
        self.get(name).ok_or_else(|| Error::unknown_type(name))
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.definitions.get(name).map(|r| &r.definition)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Name of the catalogue a definition came from.
    pub fn catalogue_of(&self, name: &str) -> Option<&str> {
        self.definitions.get(name).map(|r| r.catalogue.as_str())
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.definitions.values().map(|r| &r.definition)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        registry
            .register("UI.Size", &RawDefinition::from("UI.Length|number"))
            .expect("register");

        assert!(registry.contains("UI.Size"));
        assert!(!registry.lookup("UI.Size").expect("lookup").is_struct());
        assert_eq!(registry.catalogue_of("UI.Size"), Some(ANONYMOUS));
    }

    #[test]
    fn test_duplicate_definition() {
        let mut registry = Registry::new();
        registry.register("UI.Size", &RawDefinition::from("number")).expect("register");
        let err = registry.register("UI.Size", &RawDefinition::from("string")).unwrap_err();
        assert!(matches!(*err, Error::DuplicateDefinition { ref name } if name == "UI.Size"));

        // the first definition is untouched
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("UI.Size").is_ok());
    }

    #[test]
    fn test_unknown_type() {
        let registry = Registry::new();
        let err = registry.lookup("UI.Missing").unwrap_err();
        assert_eq!(err.to_string(), "unknown type 'UI.Missing'");
    }

    #[test]
    fn test_syntax_error_rejects_only_that_definition() {
        let catalogue = Catalogue::named("broken")
            .define("UI.Good", "number")
            .define("UI.Bad", "[number")
            .define("UI.AlsoGood", "string");

        let mut registry = Registry::new();
        let err = registry.register_all(&catalogue).unwrap_err();
        assert!(matches!(*err, Error::Definition { ref name, .. } if name == "UI.Bad"));

        assert!(registry.contains("UI.Good"));
        assert!(registry.contains("UI.AlsoGood"));
        assert!(!registry.contains("UI.Bad"));
        assert_eq!(registry.catalogue_of("UI.Good"), Some("broken"));
    }

    #[test]
    fn test_multiple_failures_are_collected() {
        let catalogue = Catalogue::named("broken")
            .define("A", "[")
            .define("B", "<");
        let err = Registry::new().register_all(&catalogue).unwrap_err();
        match *err {
            Error::Build { count, errors } => {
                assert_eq!(count, 2);
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_prelude() {
        let registry = Registry::with_prelude().expect("prelude");
        assert!(registry.contains("Flag"));
        assert!(registry.contains("Text"));
        assert!(registry.lookup("Maybe").expect("Maybe").is_generic());
    }
}
