//! # Singleton Inject
//!
//! A dependency-injection container that turns types into lazily constructed,
//! process-wide singletons whose constructor dependencies are resolved by type.
//!
//! A type opts in by implementing [`Injectable`]: it declares its constructor
//! parameters in a [`Signature`] and builds itself from the resolved
//! [`Arguments`]. Resolving the type constructs its dependencies first, caches
//! every instance by type, and hands out shared `Arc`s from then on.
//!
//! ## Quick Start
//!
//! ```rust
//! use singleton_inject::{Arguments, InjectError, Injectable, Signature, Singleton};
//! use std::sync::Arc;
//!
//! struct PersonService;
//!
//! impl Injectable for PersonService {
//!     fn construct(_: &Arguments) -> Result<Self, InjectError> {
//!         Ok(PersonService)
//!     }
//! }
//!
//! struct GroupService {
//!     person_service: Arc<PersonService>,
//! }
//!
//! impl Injectable for GroupService {
//!     fn signature() -> Signature {
//!         Signature::new().dependency::<PersonService>("person_service")
//!     }
//!
//!     fn construct(args: &Arguments) -> Result<Self, InjectError> {
//!         Ok(GroupService { person_service: args.get("person_service")? })
//!     }
//! }
//!
//! let group = GroupService::instance().unwrap();
//! let person = PersonService::instance().unwrap();
//! assert!(Arc::ptr_eq(&group.person_service, &person));
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: a type is constructed at most once even when threads race for it
//! - **Cycle detection**: self-referencing dependency chains fail fast with the cycle path
//! - **Explicit overrides**: positional or named arguments replace resolution for one call
//! - **Test isolation**: [`reset`] drops every instance but keeps registrations
//! - **Isolated containers**: [`define_container!`] creates independent containers
//!
//! ## Main Functions
//!
//! - [`inject`] - Mark a type injectable in the global container
//! - [`resolve`] - Retrieve the singleton of a type, constructing it on first use
//! - [`resolve_with`] - Construct a type with explicit arguments
//! - [`provide`] - Place a prebuilt instance in the cache
//! - [`reset`] - Drop all cached instances
//! - [`set_trace_callback`] - Observe container operations

mod macros;

mod container;
mod container_api;
mod container_event;
mod inject_error;
mod injectable;
mod registry;
mod resolver;

pub use container::{Container, TraceCallback};
pub use container_api::ContainerApi;
pub use container_event::ContainerEvent;
pub use inject_error::{BoxError, InjectError};
pub use injectable::{
    Arguments, ExplicitArguments, Injectable, Parameter, ParameterInfo, Signature,
};

define_container!(global);

// Re-export the global container's API
pub use global::{
    clear_trace_callback, container, dependencies_of, inject, is_cached, is_registered, provide,
    provide_arc, reset, resolve, resolve_with, set_trace_callback,
};

use std::sync::Arc;

/// Constructor-style access to the global container, available on every
/// [`Injectable`] type.
pub trait Singleton: Injectable {
    /// Returns the global singleton of `Self`.
    fn instance() -> Result<Arc<Self>, InjectError> {
        resolve::<Self>()
    }

    /// Constructs `Self` with explicit arguments; the result becomes the
    /// global singleton.
    fn instance_with(explicit: ExplicitArguments) -> Result<Arc<Self>, InjectError> {
        resolve_with::<Self>(explicit)
    }
}

impl<T: Injectable> Singleton for T {}
