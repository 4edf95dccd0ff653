//! Core trait binding the public operations to a process-wide container.
//!
//! This module provides the `ContainerApi` trait. An implementor only names
//! the `'static` [`Container`] it serves; every operation is a default method.
//! The `define_container!` macro generates such an implementor, and the crate
//! root uses one for the default global container.

use std::sync::Arc;

use crate::{Container, ContainerEvent, ExplicitArguments, InjectError, Injectable, ParameterInfo};

/// Core trait defining the container surface.
///
/// Provides default implementations for all operations, requiring only the
/// `container` accessor to be implemented.
pub trait ContainerApi {
    /// Access the container static.
    fn container() -> &'static Container;

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for container operations.
    ///
    /// The callback must NOT call into the same container.
    fn set_trace_callback(&self, callback: impl Fn(&ContainerEvent) + Send + Sync + 'static) {
        Self::container().set_trace_callback(callback)
    }

    /// Clear the tracing callback.
    fn clear_trace_callback(&self) {
        Self::container().clear_trace_callback()
    }

    // -------------------------------------------------------------------------------------------------
    // Container
    // -------------------------------------------------------------------------------------------------

    /// Mark `T` injectable.
    fn inject<T: Injectable>(&self) {
        Self::container().inject::<T>()
    }

    /// Resolve the singleton of `T`.
    fn resolve<T: Injectable>(&self) -> Result<Arc<T>, InjectError> {
        Self::container().resolve::<T>()
    }

    /// Construct `T` with explicit arguments; the result becomes the singleton.
    fn resolve_with<T: Injectable>(
        &self,
        explicit: ExplicitArguments,
    ) -> Result<Arc<T>, InjectError> {
        Self::container().resolve_with::<T>(explicit)
    }

    /// Seed the cache with a prebuilt instance.
    fn provide<T: Injectable>(&self, value: T) {
        Self::container().provide(value)
    }

    /// Seed the cache with a shared instance.
    fn provide_arc<T: Injectable>(&self, value: Arc<T>) {
        Self::container().provide_arc(value)
    }

    fn is_registered<T: Injectable>(&self) -> bool {
        Self::container().is_registered::<T>()
    }

    fn is_cached<T: Injectable>(&self) -> bool {
        Self::container().is_cached::<T>()
    }

    fn dependencies_of<T: Injectable>(&self) -> Option<Vec<ParameterInfo>> {
        Self::container().dependencies_of::<T>()
    }

    /// Drop every cached instance; registrations are kept.
    fn reset(&self) {
        Self::container().reset()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
