//! Component container subsystem.
//!
//! # Data Flow
//! ```text
//! Catalog (registered ComponentDescriptors)
//!     → catalog.rs  scan(root namespace) → [TypeIdentifier]
//!     → factory.rs  instantiate(candidates) → Registry
//!     → injector.rs inject(registry), fills Autowired slots in place
//!     → Registry (frozen, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - No runtime reflection: descriptors carry typed closures built at
//!   registration time, erased to `Arc<dyn Any>` for the pipeline
//! - Every bound name is unique; any collision aborts startup
//! - Injection slots are write-once cells, so the registry needs no locks
//!   once startup completes

pub mod catalog;
pub mod descriptor;
pub mod factory;
pub mod injector;
pub mod naming;
pub mod registry;

pub use catalog::{Catalog, TypeIdentifier};
pub use descriptor::{
    ArgumentSpec, Autowired, ComponentDescriptor, HandlerMethod, HandlerResult, Instance,
    ReturnKind, ScalarType, Stereotype,
};
pub use factory::instantiate;
pub use injector::{inject, InjectionReport};
pub use registry::{Registration, Registry};
