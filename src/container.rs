//! The process-scoped container that owns registry and singleton cache.

use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::registry::{Registered, Registration, State};
use crate::resolver::{ResolutionFrame, Resolver};
use crate::{ContainerEvent, ExplicitArguments, InjectError, Injectable, ParameterInfo};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `ContainerEvent` every time the
/// container is interacted with. It must be thread-safe because containers
/// are shared process-wide.
pub type TraceCallback = dyn Fn(&ContainerEvent) + Send + Sync + 'static;

/// Registry of injectable types plus the cache of their singletons.
///
/// One lock guards the whole of a top-level resolution, so racing callers
/// never construct the same type twice and `reset` never interleaves with a
/// resolution in flight.
///
/// # Safety Restrictions
///
/// Constructors and trace callbacks run while the container lock is held.
/// They must NOT call back into the same container, as this will deadlock.
///
/// # Examples
///
/// ```rust
/// use singleton_inject::{Arguments, Container, InjectError, Injectable};
/// use std::sync::Arc;
///
/// struct Clock;
///
/// impl Injectable for Clock {
///     fn construct(_: &Arguments) -> Result<Self, InjectError> {
///         Ok(Clock)
///     }
/// }
///
/// let container = Container::new();
/// let a: Arc<Clock> = container.resolve().unwrap();
/// let b: Arc<Clock> = container.resolve().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Default)]
pub struct Container {
    state: Mutex<State>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Sets a tracing callback invoked for every container operation.
    pub fn set_trace_callback(&self, callback: impl Fn(&ContainerEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clears the tracing callback. Cached instances are not affected.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    fn emit_event(&self, event: &ContainerEvent) {
        let callback = self
            .trace
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    // Poisoning only happens when a constructor panics mid-resolution; the
    // frame is dropped with the unwinding stack and nothing partial was cached.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Marks `T` injectable, recording its dependency list.
    ///
    /// Re-registering an unchanged signature is a no-op. Registration never
    /// touches cached instances.
    pub fn inject<T: Injectable>(&self) {
        let outcome = self.lock().registry.register(Registration::of::<T>());
        if outcome != Registered::Unchanged {
            self.emit_event(&ContainerEvent::Register {
                type_name: std::any::type_name::<T>(),
            });
        }
    }

    /// Whether `T` has been marked injectable in this container.
    pub fn is_registered<T: Injectable>(&self) -> bool {
        self.lock().registry.contains(&TypeId::of::<T>())
    }

    /// The recorded dependency list of `T`, if registered.
    pub fn dependencies_of<T: Injectable>(&self) -> Option<Vec<ParameterInfo>> {
        self.lock()
            .registry
            .get(&TypeId::of::<T>())
            .map(Registration::dependency_list)
    }

    // -------------------------------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------------------------------

    /// Returns the singleton of `T`, constructing it and its dependencies on
    /// first use.
    ///
    /// # Errors
    ///
    /// - [`InjectError::MissingDependency`] for a leaf parameter with no default
    /// - [`InjectError::Cycle`] when `T` transitively depends on itself
    /// - [`InjectError::Construction`] when a constructor fails
    pub fn resolve<T: Injectable>(&self) -> Result<Arc<T>, InjectError> {
        self.resolve_internal::<T>(None)
    }

    /// Constructs `T` with `explicit` overriding the matching parameters.
    ///
    /// The fresh instance replaces the cached singleton of `T`. Empty
    /// arguments behave exactly like [`Container::resolve`].
    pub fn resolve_with<T: Injectable>(
        &self,
        explicit: ExplicitArguments,
    ) -> Result<Arc<T>, InjectError> {
        self.resolve_internal::<T>(Some(&explicit))
    }

    fn resolve_internal<T: Injectable>(
        &self,
        explicit: Option<&ExplicitArguments>,
    ) -> Result<Arc<T>, InjectError> {
        let emit = |event: &ContainerEvent| self.emit_event(event);
        let mut state = self.lock();
        let mut resolver = Resolver::new(&mut state, &emit);

        let target = resolver.registration(TypeId::of::<T>(), Registration::of::<T>);
        let mut frame = ResolutionFrame::default();
        let resolved = resolver.resolve(&target, explicit, &mut frame);
        debug_assert!(frame.is_empty());
        drop(state);

        let instance = resolved?;

        instance
            .downcast::<T>()
            .map_err(|_| InjectError::TypeMismatch {
                type_name: std::any::type_name::<T>(),
            })
    }

    /// Places a prebuilt instance in the cache, replacing any previous one.
    pub fn provide<T: Injectable>(&self, value: T) {
        self.provide_arc(Arc::new(value));
    }

    /// Places a shared instance in the cache, replacing any previous one.
    pub fn provide_arc<T: Injectable>(&self, value: Arc<T>) {
        let emit = |event: &ContainerEvent| self.emit_event(event);
        let mut state = self.lock();
        Resolver::new(&mut state, &emit).registration(TypeId::of::<T>(), Registration::of::<T>);
        state.cache.insert(TypeId::of::<T>(), value);
        drop(state);

        debug!(type_name = std::any::type_name::<T>(), "provided singleton");
        self.emit_event(&ContainerEvent::Provide {
            type_name: std::any::type_name::<T>(),
        });
    }

    /// Whether a live instance of `T` is cached.
    pub fn is_cached<T: Injectable>(&self) -> bool {
        self.lock().cache.contains(&TypeId::of::<T>())
    }

    // -------------------------------------------------------------------------------------------------
    // Reset
    // -------------------------------------------------------------------------------------------------

    /// Drops every cached instance.
    ///
    /// Registrations survive, so types do not need to be injected again.
    /// Instances already handed out stay valid; no cleanup hooks run.
    pub fn reset(&self) {
        self.lock().cache.clear();
        debug!("reset singleton cache");
        self.emit_event(&ContainerEvent::Reset {});
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container").finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------


// -------------------------------------------------------------------------------------------------
// Tests sharing construction counters
// -------------------------------------------------------------------------------------------------
