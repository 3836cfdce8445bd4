//! Startup orchestration.
//!
//! # Responsibilities
//! - Run discovery, instantiation, injection and route compilation once
//! - Freeze the registry and route table for concurrent reads
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is served
//! - Stages run in order on the calling thread, never concurrently

use std::fmt;
use std::sync::Arc;

use crate::config::ContextConfig;
use crate::container::catalog::Catalog;
use crate::container::factory::instantiate;
use crate::container::injector::{inject, InjectionReport};
use crate::container::registry::Registry;
use crate::dispatch::context::RequestContext;
use crate::dispatch::dispatcher::{DispatchOutcome, Dispatcher};
use crate::lifecycle::BootError;
use crate::routing::router::RouteTable;

/// Startup state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStage {
    Scan,
    Instantiate,
    Inject,
    CompileRoutes,
    Ready,
}

impl fmt::Display for StartupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StartupStage::Scan => "SCAN",
            StartupStage::Instantiate => "INSTANTIATE",
            StartupStage::Inject => "INJECT",
            StartupStage::CompileRoutes => "COMPILE_ROUTES",
            StartupStage::Ready => "READY",
        };
        f.write_str(name)
    }
}

/// A fully started application: frozen registry plus dispatcher.
#[derive(Debug, Clone)]
pub struct Application {
    registry: Arc<Registry>,
    dispatcher: Dispatcher,
    injection: InjectionReport,
}

impl Application {
    /// Runs SCAN → INSTANTIATE → INJECT → COMPILE_ROUTES → READY.
    pub fn bootstrap(catalog: &Catalog, config: &ContextConfig) -> Result<Self, BootError> {
        let stage = |s: StartupStage| tracing::debug!(stage = %s, "Startup stage");

        stage(StartupStage::Scan);
        let candidates = catalog.scan(&config.scan_package)?;

        stage(StartupStage::Instantiate);
        let registry = instantiate(catalog, &candidates)?;

        stage(StartupStage::Inject);
        let injection = inject(&registry, config.strict_injection)?;
        if !injection.unresolved.is_empty() {
            tracing::warn!(fields = ?injection.unresolved, "Injection points left unset");
        }

        stage(StartupStage::CompileRoutes);
        let routes = RouteTable::build(&registry)?;

        stage(StartupStage::Ready);
        tracing::info!(
            scanned = candidates.len(),
            beans = registry.len(),
            routes = routes.len(),
            "Initialization complete"
        );

        Ok(Self {
            registry: Arc::new(registry),
            dispatcher: Dispatcher::new(Arc::new(routes), config.context_path.clone()),
            injection,
        })
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn routes(&self) -> &RouteTable {
        self.dispatcher.routes()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn injection_report(&self) -> &InjectionReport {
        &self.injection
    }

    pub fn dispatch(&self, request: &RequestContext) -> DispatchOutcome {
        self.dispatcher.dispatch(request)
    }
}
