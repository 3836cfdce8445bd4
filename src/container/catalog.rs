//! Component discovery.
//!
//! The catalog is the registration table every component type is entered
//! into. Dotted namespaces form a hierarchy; [`Catalog::scan`] yields the
//! type identifiers at or beneath a root namespace, in registration order.

use std::collections::HashMap;
use std::fmt;

use crate::container::descriptor::ComponentDescriptor;
use crate::lifecycle::BootError;

/// Fully qualified name of a registered component type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeIdentifier(String);

impl TypeIdentifier {
    /// The qualified name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn segments(namespace: &str) -> impl Iterator<Item = &str> {
    namespace.split('.').filter(|s| !s.is_empty())
}

/// Whether `namespace` is `root` or lies beneath it, segment-wise.
fn within(namespace: &str, root: &str) -> bool {
    let mut inner = segments(namespace);
    segments(root).all(|segment| inner.next() == Some(segment))
}

/// Registration table of component types.
#[derive(Debug, Default)]
pub struct Catalog {
    descriptors: Vec<ComponentDescriptor>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a type into the table.
    ///
    /// A second registration under the same qualified name is ignored.
    pub fn register(&mut self, descriptor: ComponentDescriptor) -> &mut Self {
        let qualified = descriptor.qualified_name();
        if self.index.contains_key(&qualified) {
            tracing::warn!(type_name = %qualified, "Component type registered twice, keeping the first");
            return self;
        }

        self.index.insert(qualified, self.descriptors.len());
        self.descriptors.push(descriptor);
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, descriptor: ComponentDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Collects every type identifier at or under `root_namespace`.
    ///
    /// Types come back in registration order regardless of nesting depth.
    /// An empty root selects everything; a root no type lives under fails.
    pub fn scan(&self, root_namespace: &str) -> Result<Vec<TypeIdentifier>, BootError> {
        let found: Vec<TypeIdentifier> = self
            .descriptors
            .iter()
            .filter(|d| within(&d.namespace, root_namespace))
            .map(|d| TypeIdentifier(d.qualified_name()))
            .collect();

        if found.is_empty() && segments(root_namespace).next().is_some() {
            return Err(BootError::NamespaceNotFound(root_namespace.to_string()));
        }
        tracing::debug!(root = %root_namespace, count = found.len(), "Namespace scanned");
        Ok(found)
    }

    /// The descriptor registered under `id`.
    pub fn descriptor(&self, id: &TypeIdentifier) -> Option<&ComponentDescriptor> {
        self.index.get(id.as_str()).map(|&i| &self.descriptors[i])
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Dummy;

    fn entry(name: &'static str, namespace: &str) -> ComponentDescriptor {
        ComponentDescriptor::plain::<Dummy>(name).namespace(namespace)
    }

    fn names(ids: &[TypeIdentifier]) -> Vec<&str> {
        ids.iter().map(TypeIdentifier::as_str).collect()
    }

    #[test]
    fn test_scan_recurses_in_registration_order() {
        let catalog = Catalog::new()
            .with(entry("A", "app.web"))
            .with(entry("B", "app"))
            .with(entry("C", "app.web.admin"))
            .with(entry("D", "app.web"))
            .with(entry("E", "other"));

        let found = catalog.scan("app").unwrap();
        assert_eq!(
            names(&found),
            ["app.web.A", "app.B", "app.web.admin.C", "app.web.D"]
        );

        let web = catalog.scan("app.web").unwrap();
        assert_eq!(names(&web), ["app.web.A", "app.web.admin.C", "app.web.D"]);

        let admin = catalog.scan("app.web.admin").unwrap();
        assert_eq!(names(&admin), ["app.web.admin.C"]);
    }

    #[test]
    fn test_scan_unknown_root_fails() {
        let catalog = Catalog::new().with(entry("A", "app"));
        let err = catalog.scan("missing.pkg").unwrap_err();
        assert!(matches!(err, BootError::NamespaceNotFound(ns) if ns == "missing.pkg"));
    }

    #[test]
    fn test_scan_does_not_match_name_prefixes() {
        let catalog = Catalog::new().with(entry("A", "application"));
        assert!(catalog.scan("app").is_err());
    }

    #[test]
    fn test_scan_ignores_empty_segments() {
        let catalog = Catalog::new().with(entry("A", "app.web"));
        assert_eq!(names(&catalog.scan("app..web.").unwrap()), ["app.web.A"]);
    }

    #[test]
    fn test_scan_empty_root_returns_everything() {
        let catalog = Catalog::new().with(entry("A", "x")).with(entry("Top", ""));
        assert_eq!(names(&catalog.scan("").unwrap()), ["x.A", "Top"]);
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let mut catalog = Catalog::new();
        catalog.register(entry("A", "app")).register(entry("A", "app"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.scan("app").unwrap().len(), 1);
    }
}
