//! Supertype composition and generic instantiation.

mod bindings;
mod cache;
mod merge;
mod trail;

use std::sync::Arc;

use uischema_ir::{
    DefinitionBody, InstanceKey, Resolved, ResolvedField, ResolvedSchema, TypeDefinition,
    TypeExpression,
};

use crate::{Error, Registry, Result};

pub use bindings::Bindings;
pub use cache::{CacheStats, ResolutionCache};
use merge::Merge;
use trail::Trail;

/// Resolves names against a frozen registry, memoizing every instantiation.
#[derive(Debug)]
pub struct Composer {
    registry: Arc<Registry>,
    cache: ResolutionCache,
    max_depth: usize,
}

impl Composer {
    pub fn new(registry: Arc<Registry>, max_depth: usize) -> Self {
        Self {
            registry,
            cache: ResolutionCache::new(),
            max_depth,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Resolve `name` applied to `args`.
    ///
    /// Struct definitions and aliases of intersections yield a flattened
    /// schema; other aliases yield their substituted expression.
    pub fn resolve(&self, name: &str, args: &[TypeExpression]) -> Result<Arc<Resolved>> {
        self.resolve_in(name, args, &mut Trail::new(self.max_depth))
    }

    /// Resolve a name that must be struct-shaped, following plain aliases.
    pub fn resolve_struct(&self, name: &str, args: &[TypeExpression]) -> Result<Arc<ResolvedSchema>> {
        let head = match args {
            [] => TypeExpression::reference(name),
            _ => TypeExpression::Generic(name.to_string(), args.to_vec()),
        };
        self.struct_of(&head, &mut Trail::new(self.max_depth))
    }

    /// Compose an anonymous intersection such as `UI.Image+UI.Text`.
    ///
    /// The result is not cached; its members are.
    pub fn compose(&self, members: &[TypeExpression]) -> Result<Arc<ResolvedSchema>> {
        let name = TypeExpression::Intersection(members.to_vec()).to_string();
        let mut trail = Trail::new(self.max_depth);
        self.compose_members(&name, members, &[], &mut trail)
            .map(Arc::new)
    }

    fn resolve_in(
        &self,
        name: &str,
        args: &[TypeExpression],
        trail: &mut Trail,
    ) -> Result<Arc<Resolved>> {
        let def = self.registry.lookup(name)?;
        let bindings = Bindings::bind(def, args)?;
        let key = InstanceKey::new(name, bindings.args());

        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        trail.enter(&key)?;
        let composed = self.instantiate(def, &key, &bindings, trail);
        trail.exit();

        let resolved = composed?;
        tracing::debug!(instance = %key, depth = trail.depth(), "resolved");
        Ok(self.cache.insert(key, resolved))
    }

    fn instantiate(
        &self,
        def: &TypeDefinition,
        key: &InstanceKey,
        bindings: &Bindings,
        trail: &mut Trail,
    ) -> Result<Resolved> {
        let name = key.to_string();
        match &def.body {
            DefinitionBody::Struct(own) => {
                let members = match def.supertype.as_ref().map(|s| bindings.substitute(s)) {
                    Some(TypeExpression::Intersection(members)) => members,
                    Some(single) => vec![single],
                    None => Vec::new(),
                };
                let own: Vec<(&str, ResolvedField)> = own
                    .iter()
                    .map(|(field, declared)| {
                        let resolved = ResolvedField {
                            ty: bindings.substitute(&declared.ty),
                            annotations: declared.annotations.clone(),
                            origin: name.clone(),
                        };
                        (field.as_str(), resolved)
                    })
                    .collect();
                let schema = self.compose_members(&name, &members, &own, trail)?;
                Ok(Resolved::Struct(Arc::new(schema)))
            }
            DefinitionBody::Alias(expr) => match bindings.substitute(expr) {
                TypeExpression::Intersection(members) => {
                    let schema = self.compose_members(&name, &members, &[], trail)?;
                    Ok(Resolved::Struct(Arc::new(schema)))
                }
                other => Ok(Resolved::Alias(other)),
            },
        }
    }

    fn compose_members(
        &self,
        name: &str,
        members: &[TypeExpression],
        own: &[(&str, ResolvedField)],
        trail: &mut Trail,
    ) -> Result<ResolvedSchema> {
        let peers = members
            .iter()
            .map(|member| self.struct_of(member, trail))
            .collect::<Result<Vec<_>>>()?;

        let mut merge = Merge::new(name);
        for peer in &peers {
            merge.peer(peer)?;
        }
        for (field, resolved) in own {
            merge.own(field, resolved.clone());
        }
        Ok(merge.finish())
    }

    /// Resolve a supertype member to a schema, following aliases of names.
    fn struct_of(&self, member: &TypeExpression, trail: &mut Trail) -> Result<Arc<ResolvedSchema>> {
        let mut current = member.clone();
        let mut followed = Vec::new();
        loop {
            let resolved = match &current {
                TypeExpression::Reference(name) => self.resolve_in(name, &[], trail)?,
                TypeExpression::Generic(name, args) => self.resolve_in(name, args, trail)?,
                _ => return Err(Error::not_a_struct(member.to_string())),
            };
            match &*resolved {
                Resolved::Struct(schema) => return Ok(Arc::clone(schema)),
                Resolved::Alias(target) if target.head_name().is_some() => {
                    if followed.contains(target) {
                        followed.push(target.clone());
                        let cycle = followed
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(" -> ");
                        return Err(Box::new(Error::CyclicSupertype { cycle }));
                    }
                    followed.push(target.clone());
                    current = target.clone();
                }
                Resolved::Alias(_) => return Err(Error::not_a_struct(member.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uischema_catalogue::{Catalogue, RawDefinition};
    use uischema_ir::Primitive;

    use super::*;

    fn composer(catalogue: Catalogue) -> Composer {
        let mut registry = Registry::with_prelude().expect("prelude");
        registry.register_all(&catalogue).expect("register");
        Composer::new(Arc::new(registry), 64)
    }

    fn widgets() -> Catalogue {
        Catalogue::named("test")
            .define(
                "UI.Widget",
                RawDefinition::table([("hidden", "Flag"), ("status", "Text?")]),
            )
            .define(
                "UI.Decorator",
                RawDefinition::table([("$super", "UI.Widget"), ("subject", "W?")])
                    .with_macro(["W=UI.Widget"]),
            )
            .define(
                "UI.Sizeable",
                RawDefinition::table([("height", "number?"), ("width", "number?")]),
            )
            .define(
                "UI.Frame",
                RawDefinition::table([("$super", "UI.Decorator(W)+UI.Sizeable")])
                    .with_macro(["W=UI.Widget"]),
            )
    }

    #[test]
    fn test_diamond_inherits_once() {
        let composer = composer(widgets());
        let frame = composer.resolve_struct("UI.Frame", &[]).expect("frame");

        assert_eq!(frame.name, "UI.Frame(UI.Widget)");
        assert_eq!(
            frame.field_names().collect::<Vec<_>>(),
            vec!["hidden", "status", "subject", "height", "width"]
        );
        assert_eq!(frame.fields["subject"].ty.to_string(), "UI.Widget?");
        assert_eq!(frame.fields["subject"].origin, "UI.Decorator(UI.Widget)");
        assert!(frame.inherits("UI.Widget"));
    }

    #[test]
    fn test_generic_argument_flows_into_supertype() {
        let composer = composer(widgets());
        let frame = composer
            .resolve_struct("UI.Frame", &[TypeExpression::reference("UI.Sizeable")])
            .expect("frame");
        assert_eq!(frame.fields["subject"].ty.to_string(), "UI.Sizeable?");
    }

    #[test]
    fn test_alias_resolves_to_substituted_expression() {
        let composer = composer(widgets());
        let maybe = composer
            .resolve("Maybe", &[Primitive::Number.into()])
            .expect("maybe");
        assert_eq!(maybe.as_alias().map(ToString::to_string).as_deref(), Some("number?"));

        let default = composer.resolve("Maybe", &[]).expect("maybe");
        assert_eq!(default.as_alias().map(ToString::to_string).as_deref(), Some("none?"));
    }

    #[test]
    fn test_alias_of_intersection_is_a_struct() {
        let composer = composer(widgets().define("UI.Box", "UI.Widget+UI.Sizeable"));
        let resolved = composer.resolve("UI.Box", &[]).expect("box");
        let schema = resolved.as_struct().expect("struct");
        assert_eq!(schema.fields.len(), 4);

        // and it can itself be a supertype
        let composer = self::composer(
            widgets()
                .define("UI.Box", "UI.Widget+UI.Sizeable")
                .define("UI.Panel", RawDefinition::table([("$super", "UI.Box"), ("title", "string")])),
        );
        let panel = composer.resolve_struct("UI.Panel", &[]).expect("panel");
        assert_eq!(panel.fields.len(), 5);
    }

    #[test]
    fn test_supertype_through_plain_alias() {
        let composer = composer(widgets().define("UI.Base", "UI.Widget"));
        let base = composer.resolve_struct("UI.Base", &[]).expect("base");
        assert_eq!(base.name, "UI.Widget");
    }

    #[test]
    fn test_not_a_struct() {
        let composer = composer(widgets().define(
            "UI.Odd",
            RawDefinition::table([("$super", "Text"), ("x", "number")]),
        ));
        let err = composer.resolve("UI.Odd", &[]).unwrap_err();
        assert_eq!(err.to_string(), "'Text' is not a struct type and cannot be composed");
    }

    #[test]
    fn test_unknown_supertype() {
        let composer = composer(Catalogue::named("test").define(
            "UI.Orphan",
            RawDefinition::table([("$super", "UI.Missing")]),
        ));
        let err = composer.resolve("UI.Orphan", &[]).unwrap_err();
        assert!(matches!(*err, Error::UnknownType { ref name } if name == "UI.Missing"));
        // nothing partial was cached
        assert_eq!(composer.stats().entries, 0);
    }

    #[test]
    fn test_cyclic_supertype() {
        let composer = composer(
            Catalogue::named("test")
                .define("A", RawDefinition::table([("$super", "B")]))
                .define("B", RawDefinition::table([("$super", "A")])),
        );
        let err = composer.resolve("A", &[]).unwrap_err();
        assert_eq!(err.to_string(), "supertype cycle: A -> B -> A");

        let composer = self::composer(
            Catalogue::named("test")
                .define("A", "B")
                .define("B", "A")
                .define("C", RawDefinition::table([("$super", "A")])),
        );
        assert!(matches!(
            *composer.resolve("C", &[]).unwrap_err(),
            Error::CyclicSupertype { .. }
        ));
    }

    #[test]
    fn test_runaway_generic_hits_depth_limit() {
        let catalogue = Catalogue::named("test").define(
            "Nest",
            RawDefinition::table([("$super", "Nest([T])"), ("leaf", "T?")]).with_macro(["T=number"]),
        );
        let mut registry = Registry::new();
        registry.register_all(&catalogue).expect("register");
        let composer = Composer::new(Arc::new(registry), 16);

        let err = composer.resolve("Nest", &[]).unwrap_err();
        assert!(matches!(*err, Error::DepthLimit { limit: 16, .. }));
    }

    #[test]
    fn test_anonymous_intersection() {
        let composer = composer(widgets());
        let members = [
            TypeExpression::reference("UI.Widget"),
            TypeExpression::reference("UI.Sizeable"),
        ];
        let schema = composer.compose(&members).expect("compose");
        assert_eq!(schema.name, "UI.Widget+UI.Sizeable");
        assert_eq!(schema.fields.len(), 4);
    }
}
