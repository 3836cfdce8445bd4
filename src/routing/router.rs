//! Route table compilation and lookup.
//!
//! # Responsibilities
//! - Compile controller route markers into an ordered route list
//! - Resolve each handler argument to a positional binding
//! - Look up the first route whose pattern matches a path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan; first match wins
//! - Evaluation order is controller discovery order, then method
//!   declaration order

use crate::container::descriptor::ArgumentSpec;
use crate::container::registry::{Registration, Registry};
use crate::lifecycle::BootError;
use crate::routing::matcher::{normalize, RoutePattern};
use crate::routing::route::{BindingSource, ParameterBinding, RouteEntry};

/// Ordered collection of compiled routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Compiles the routes of every controller in the registry.
    pub fn build(registry: &Registry) -> Result<Self, BootError> {
        let mut routes = Vec::new();
        for controller in registry.controllers() {
            compile_controller(controller, &mut routes)?;
        }
        Ok(Self { routes })
    }

    /// First route matching an already normalized path.
    pub fn find(&self, path: &str) -> Option<&RouteEntry> {
        self.routes.iter().find(|route| route.matches(path))
    }

    /// Routes in evaluation order.
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Joins a type-level and method-level route value into one path.
pub fn compose(base: &str, method_path: &str) -> String {
    normalize(&format!("/{}/{}", base, method_path))
}

fn compile_controller(controller: &Registration, routes: &mut Vec<RouteEntry>) -> Result<(), BootError> {
    let descriptor = &controller.descriptor;

    for method in &descriptor.methods {
        let path = compose(&descriptor.base_path, &method.path);
        let handler = format!("{}.{}", controller.name, method.name);
        let pattern = RoutePattern::compile(&path).map_err(|source| BootError::InvalidRoutePattern {
            pattern: path.clone(),
            handler: handler.clone(),
            source,
        })?;

        let bindings = method
            .arguments
            .iter()
            .enumerate()
            .map(|(index, arg)| ParameterBinding {
                index,
                source: match arg {
                    ArgumentSpec::Request => BindingSource::RequestContext,
                    ArgumentSpec::Response => BindingSource::ResponseContext,
                    ArgumentSpec::Query { name, target } => BindingSource::QueryParam {
                        name: name.clone(),
                        target: *target,
                    },
                },
            })
            .collect();

        tracing::info!(path = %path, handler = %method.signature(), controller = %controller.name, "Mapped");
        routes.push(RouteEntry {
            pattern,
            controller: controller.name.clone(),
            method: method.clone(),
            bindings,
            instance: controller.instance.clone(),
        });
    }

    Ok(())
}
