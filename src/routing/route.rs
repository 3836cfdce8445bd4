//! Compiled route entries.

use crate::container::descriptor::{HandlerMethod, Instance, ScalarType};
use crate::routing::matcher::RoutePattern;

/// Where a handler argument takes its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingSource {
    /// Named query parameter, converted to `target`.
    QueryParam { name: String, target: ScalarType },
    RequestContext,
    ResponseContext,
}

/// Positional binding of one handler argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterBinding {
    pub index: usize,
    pub source: BindingSource,
}

/// A path pattern bound to a handler method on a controller instance.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub pattern: RoutePattern,
    /// Bean name of the controller.
    pub controller: String,
    pub method: HandlerMethod,
    pub bindings: Vec<ParameterBinding>,
    pub(crate) instance: Instance,
}

impl RouteEntry {
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.matches(path)
    }

    /// Number of handler arguments.
    pub fn arity(&self) -> usize {
        self.method.arity()
    }

    /// `controller.method`, for logs.
    pub fn handler_name(&self) -> String {
        format!("{}.{}", self.controller, self.method.name)
    }

    pub(crate) fn instance(&self) -> &Instance {
        &self.instance
    }
}
