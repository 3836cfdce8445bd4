//! Startup failure conditions.

use thiserror::Error;

use crate::config::loader::ConfigError;

/// A condition that aborts startup before any request is served.
#[derive(Debug, Error)]
pub enum BootError {
    #[error("root namespace '{0}' cannot be resolved")]
    NamespaceNotFound(String),

    #[error("bean name '{name}' is already bound to {existing}, cannot bind it to {incoming}")]
    DuplicateBinding {
        name: String,
        existing: String,
        incoming: String,
    },

    #[error("field '{field}' of {component} cannot hold bean '{bean}' (type mismatch)")]
    InjectionTypeMismatch {
        component: String,
        field: String,
        bean: String,
    },

    #[error("no bean named '{bean}' for field '{field}' of {component}")]
    UnresolvedDependency {
        component: String,
        field: String,
        bean: String,
    },

    #[error("invalid route pattern '{pattern}' for {handler}: {source}")]
    InvalidRoutePattern {
        pattern: String,
        handler: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
