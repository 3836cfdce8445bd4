//! Name-keyed bean registry.
//!
//! Built once by the factory, wired by the injector, then shared read-only
//! across request threads.

use std::collections::HashMap;
use std::sync::Arc;

use crate::container::descriptor::{ComponentDescriptor, Instance};
use crate::lifecycle::BootError;

/// One instantiated component.
#[derive(Debug)]
pub struct Registration {
    /// Primary bean name.
    pub name: String,
    pub descriptor: ComponentDescriptor,
    pub instance: Instance,
}

#[derive(Debug)]
struct Bean {
    component: usize,
    /// `Arc<U>` boxed as `Any`, where `U` is the type exposed under this name.
    view: Instance,
}

/// Mapping from bean name to instance.
#[derive(Debug, Default)]
pub struct Registry {
    components: Vec<Registration>,
    beans: HashMap<String, Bean>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, registration: Registration) -> usize {
        self.components.push(registration);
        self.components.len() - 1
    }

    /// Binds `name` to the component at `component`.
    pub(crate) fn bind(&mut self, name: String, component: usize, view: Instance) -> Result<(), BootError> {
        if let Some(existing) = self.beans.get(&name) {
            return Err(BootError::DuplicateBinding {
                existing: self.components[existing.component].descriptor.qualified_name(),
                incoming: self.components[component].descriptor.qualified_name(),
                name,
            });
        }
        self.beans.insert(name, Bean { component, view });
        Ok(())
    }

    pub(crate) fn view(&self, name: &str) -> Option<&Instance> {
        self.beans.get(name).map(|b| &b.view)
    }

    /// Resolves `name` as `Arc<U>`.
    ///
    /// `U` is the concrete type for primary names and the interface object
    /// type for interface aliases.
    pub fn resolve<U: ?Sized + 'static>(&self, name: &str) -> Option<Arc<U>> {
        self.view(name)?.downcast_ref::<Arc<U>>().cloned()
    }

    /// The component a name is bound to.
    pub fn component(&self, name: &str) -> Option<&Registration> {
        self.beans.get(name).map(|b| &self.components[b.component])
    }

    /// Whether `name` is bound to a bean.
    pub fn contains(&self, name: &str) -> bool {
        self.beans.contains_key(name)
    }

    /// Instantiated components in discovery order.
    pub fn components(&self) -> &[Registration] {
        &self.components
    }

    /// Controller components in discovery order.
    pub fn controllers(&self) -> impl Iterator<Item = &Registration> {
        self.components.iter().filter(|c| c.descriptor.is_controller())
    }

    /// All bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.beans.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of bound names (aliases included).
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// Whether no names are bound.
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}
