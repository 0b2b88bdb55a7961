//! The boundary API offered to rendering and transport code.

use std::sync::Arc;

use serde::Deserialize;
use uischema_catalogue::Catalogue;
use uischema_ir::{AnnotationSet, Resolved, ResolvedSchema, TypeExpression, Value};

use crate::{
    Error, Registry, Result,
    compose::{CacheStats, Composer},
    lint::{self, Diagnostic},
    validate::{self, Target, ValidationResult},
};

const DEFAULT_MAX_DEPTH: usize = 64;

/// Engine settings. Hosts can embed this in their own configuration files.
///
/// ```toml
/// max-depth = 32
/// prelude = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Deepest supertype nesting, and longest alias chain for one value.
    pub max_depth: usize,
    /// Register `Flag`, `Text` and `Maybe` before any catalogue.
    pub prelude: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            prelude: true,
        }
    }
}

/// A frozen registry plus its resolution cache.
///
/// `Engine` is `Send + Sync`; share it behind an `Arc` and resolve from any
/// thread.
#[derive(Debug)]
pub struct Engine {
    registry: Arc<Registry>,
    composer: Composer,
    config: EngineConfig,
}

impl Engine {
    pub fn new(registry: Registry) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    pub fn with_config(registry: Registry, config: EngineConfig) -> Self {
        let registry = Arc::new(registry);
        let composer = Composer::new(Arc::clone(&registry), config.max_depth);
        Self {
            registry,
            composer,
            config,
        }
    }

    /// Build an engine from catalogues, registering them in order.
    ///
    /// Every catalogue is visited even after a failure; the returned error
    /// carries all rejected definitions.
    pub fn load(catalogues: &[Catalogue], config: EngineConfig) -> Result<Self> {
        let mut registry = if config.prelude {
            Registry::with_prelude()?
        } else {
            Registry::new()
        };

        let mut errors = Vec::new();
        for catalogue in catalogues {
            if let Err(e) = registry.register_all(catalogue) {
                match *e {
                    Error::Build { errors: inner, .. } => errors.extend(inner),
                    other => errors.push(other),
                }
            }
        }
        if let Some(error) = Error::collect(errors) {
            return Err(error);
        }

        tracing::info!(types = registry.len(), "engine built");
        Ok(Self::with_config(registry, config))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.composer.stats()
    }

    /// Resolve a widget type applied to `args` (defaults fill the rest).
    pub fn resolve_widget(&self, name: &str, args: &[TypeExpression]) -> Result<Arc<Resolved>> {
        self.composer.resolve(name, args)
    }

    /// Resolve a type that must be struct-shaped.
    pub fn resolve_struct(&self, name: &str, args: &[TypeExpression]) -> Result<Arc<ResolvedSchema>> {
        self.composer.resolve_struct(name, args)
    }

    /// Check `value` against a schema or expression.
    pub fn validate<'a>(
        &self,
        value: &Value,
        target: impl Into<Target<'a>>,
    ) -> Result<ValidationResult> {
        validate::validate(&self.composer, self.config.max_depth, value, target.into())
    }

    /// Annotations of one field of a resolved schema.
    pub fn field_annotations<'s>(
        &self,
        schema: &'s ResolvedSchema,
        field: &str,
    ) -> Result<&'s AnnotationSet> {
        schema.annotations(field).ok_or_else(|| {
            Box::new(Error::UnknownField {
                schema: schema.name.clone(),
                field: field.to_string(),
            })
        })
    }

    /// Resolve every definition with default arguments and check that every
    /// name mentioned anywhere is registered.
    ///
    /// Definitions whose parameters have no default are only checked for
    /// dangling names.
    pub fn check_all(&self) -> Result<()> {
        let mut errors = Vec::new();
        for def in self.registry.iter() {
            for expr in def.expressions() {
                for name in expr.referenced_names() {
                    let is_param = def.params.iter().any(|p| p.name == name);
                    if !is_param && !self.registry.contains(name) {
                        errors.push(Error::UnknownType {
                            name: name.to_string(),
                        });
                    }
                }
            }

            let instantiable = def.params.iter().all(|p| p.default.is_some());
            if instantiable {
                if let Err(e) = self.composer.resolve(&def.name, &[]) {
                    errors.push(*e);
                }
            }
        }

        // a dangling supertype shows up both as a reference and a failed resolve
        errors.dedup_by(|a, b| a.to_string() == b.to_string());
        match Error::collect(errors) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Non-fatal catalogue diagnostics.
    pub fn lint(&self) -> Vec<Diagnostic> {
        lint::run(&self.registry, &self.composer)
    }
}

#[cfg(test)]
mod tests {
    use uischema_catalogue::RawDefinition;

    use super::*;

    #[test]
    fn test_config_defaults_and_overrides() {
        let config: EngineConfig = toml::from_str("").expect("empty");
        assert_eq!(config, EngineConfig::default());

        let config: EngineConfig = toml::from_str("max-depth = 8").expect("config");
        assert_eq!(config.max_depth, 8);
        assert!(config.prelude);

        assert!(toml::from_str::<EngineConfig>("depth = 8").is_err());
    }

    #[test]
    fn test_load_without_prelude() {
        let catalogue = Catalogue::named("test").define("UI.Flag", "Flag");
        let engine = Engine::load(
            &[catalogue],
            EngineConfig {
                prelude: false,
                ..Default::default()
            },
        )
        .expect("load");
        assert!(!engine.registry().contains("Flag"));
        assert!(engine.check_all().is_err());
    }

    #[test]
    fn test_load_collects_across_catalogues() {
        let first = Catalogue::named("a").define("A", "[");
        let second = Catalogue::named("b").define("B", "<").define("A", "number");
        let err = Engine::load(&[first, second], EngineConfig::default()).unwrap_err();
        assert!(matches!(*err, Error::Build { count: 2, .. }));
    }

    #[test]
    fn test_check_all_reports_dangling_field_reference() {
        let catalogue = Catalogue::named("test")
            .define("UI.Widget", RawDefinition::table([("parent", "UI.Missing?")]));
        let engine = Engine::load(&[catalogue], EngineConfig::default()).expect("load");

        // resolving works: fields are not dereferenced
        assert!(engine.resolve_struct("UI.Widget", &[]).is_ok());

        let err = engine.check_all().unwrap_err();
        assert_eq!(err.to_string(), "unknown type 'UI.Missing'");
    }

    #[test]
    fn test_field_annotations() {
        let catalogue = Catalogue::named("test").define(
            "UI.Button",
            RawDefinition::table([("click", "boolean? @event=client @delay=flush")]),
        );
        let engine = Engine::load(&[catalogue], EngineConfig::default()).expect("load");
        let button = engine.resolve_struct("UI.Button", &[]).expect("button");

        let tags = engine.field_annotations(&button, "click").expect("click");
        assert_eq!(tags.get("event"), Some("client"));

        let err = engine.field_annotations(&button, "press").unwrap_err();
        assert_eq!(err.to_string(), "'UI.Button' has no field 'press'");
    }
}
