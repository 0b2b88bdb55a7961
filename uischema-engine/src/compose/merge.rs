//! Field-set union for composed structs.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use uischema_ir::{ResolvedField, ResolvedSchema};

use crate::{Error, Result};

/// Accumulates the fields of peer supertypes, then the own fields.
///
/// Peers have no precedence over each other. When two peers disagree on a
/// field, the one whose lineage contains the other field's declaring
/// instantiation has overridden it and wins; any other disagreement is a
/// conflict.
pub struct Merge<'a> {
    name: String,
    fields: IndexMap<String, ResolvedField>,
    lineage: IndexSet<String>,
    supplier: HashMap<String, &'a ResolvedSchema>,
}

impl<'a> Merge<'a> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            lineage: IndexSet::new(),
            supplier: HashMap::new(),
        }
    }

    /// Add every field of one peer supertype.
    pub fn peer(&mut self, peer: &'a ResolvedSchema) -> Result<()> {
        for (name, field) in &peer.fields {
            let Some(existing) = self.fields.get(name) else {
                self.fields.insert(name.clone(), field.clone());
                self.supplier.insert(name.clone(), peer);
                continue;
            };
            if existing.agrees_with(field) {
                continue;
            }

            let overridden_by_peer = peer.inherits(&existing.origin);
            let overridden_by_supplier = self
                .supplier
                .get(name)
                .is_some_and(|supplier| supplier.inherits(&field.origin));

            match (overridden_by_peer, overridden_by_supplier) {
                (true, false) => {
                    tracing::trace!(field = %name, from = %existing.origin, to = %field.origin, "peer overrides field");
                    self.fields.insert(name.clone(), field.clone());
                    self.supplier.insert(name.clone(), peer);
                }
                (false, true) => {}
                _ => {
                    return Err(Box::new(Error::CompositionConflict {
                        field: name.clone(),
                        first: existing.origin.clone(),
                        first_type: existing.ty.to_string(),
                        second: field.origin.clone(),
                        second_type: field.ty.to_string(),
                    }));
                }
            }
        }
        self.lineage.extend(peer.lineage.iter().cloned());
        Ok(())
    }

    /// Add an own field. Shadows silently and keeps the inherited position.
    pub fn own(&mut self, name: &str, field: ResolvedField) {
        self.fields.insert(name.to_string(), field);
    }

    pub fn finish(mut self) -> ResolvedSchema {
        self.lineage.insert(self.name.clone());
        ResolvedSchema {
            name: self.name,
            fields: self.fields,
            lineage: self.lineage,
        }
    }
}
