//! Component instantiation.

use crate::container::catalog::{Catalog, TypeIdentifier};
use crate::container::descriptor::Stereotype;
use crate::container::naming::lower_first;
use crate::container::registry::{Registration, Registry};
use crate::lifecycle::BootError;

/// Instantiates every tagged candidate and binds it in a fresh registry.
///
/// Controllers are bound under their lower-camel-cased type name. Services
/// are bound under their explicit bean name (or the lower-camel-cased type
/// name) and additionally under the lower-camel-cased name of every
/// interface they implement. Untagged candidates are skipped. Any name
/// collision fails the whole call; no partial registry is returned.
pub fn instantiate(catalog: &Catalog, candidates: &[TypeIdentifier]) -> Result<Registry, BootError> {
    let mut registry = Registry::new();

    for id in candidates {
        let Some(descriptor) = catalog.descriptor(id) else {
            tracing::warn!(type_name = %id, "Candidate has no descriptor, skipping");
            continue;
        };

        let name = match &descriptor.stereotype {
            None => {
                tracing::trace!(type_name = %id, "Untagged type ignored");
                continue;
            }
            Some(Stereotype::Controller) => lower_first(descriptor.type_name),
            Some(Stereotype::Service { name: Some(explicit) }) if !explicit.is_empty() => explicit.clone(),
            Some(Stereotype::Service { .. }) => lower_first(descriptor.type_name),
        };

        let (instance, concrete) = descriptor.construct();
        let aliases: Vec<_> = match descriptor.stereotype {
            Some(Stereotype::Service { .. }) => descriptor
                .interfaces
                .iter()
                .map(|iface| (lower_first(iface.name), iface.view(&instance)))
                .collect(),
            _ => Vec::new(),
        };

        let index = registry.add(Registration {
            name: name.clone(),
            descriptor: descriptor.clone(),
            instance,
        });
        registry.bind(name.clone(), index, concrete)?;

        for (alias, view) in aliases {
            let Some(view) = view else {
                tracing::warn!(bean = %name, alias = %alias, "Interface view failed, alias skipped");
                continue;
            };
            registry.bind(alias, index, view)?;
        }

        tracing::debug!(bean = %name, type_name = %id, "Component instantiated");
    }

    Ok(registry)
}
