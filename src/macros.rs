//! Macros for creating isolated containers.

/// Creates a process-wide container module with a single macro invocation.
///
/// The macro generates a module containing:
/// - The container static (hidden)
/// - An `Api` struct that implements `ContainerApi`
/// - Free functions for every container operation
///
/// # Examples
///
/// ```rust
/// use singleton_inject::{define_container, Arguments, InjectError, Injectable};
/// use std::sync::Arc;
///
/// struct Config;
///
/// impl Injectable for Config {
///     fn construct(_: &Arguments) -> Result<Self, InjectError> {
///         Ok(Config)
///     }
/// }
///
/// define_container!(app);
///
/// let a: Arc<Config> = app::resolve().unwrap();
/// let b: Arc<Config> = app::resolve().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// app::reset();
/// let c: Arc<Config> = app::resolve().unwrap();
/// assert!(!Arc::ptr_eq(&a, &c));
/// ```
///
/// # Multiple Containers
///
/// Each invocation owns its own registry and cache:
///
/// ```rust
/// use singleton_inject::{define_container, Arguments, InjectError, Injectable};
/// use std::sync::Arc;
///
/// struct Pool;
///
/// impl Injectable for Pool {
///     fn construct(_: &Arguments) -> Result<Self, InjectError> {
///         Ok(Pool)
///     }
/// }
///
/// define_container!(primary);
/// define_container!(replica);
///
/// let p: Arc<Pool> = primary::resolve().unwrap();
/// let r: Arc<Pool> = replica::resolve().unwrap();
/// assert!(!Arc::ptr_eq(&p, &r));
/// ```
#[macro_export]
macro_rules! define_container {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock};

            // The container instance (module-private)
            static CONTAINER: LazyLock<$crate::Container> = LazyLock::new($crate::Container::new);

            /// Zero-sized type that implements the container API.
            struct Api;

            impl $crate::ContainerApi for Api {
                fn container() -> &'static $crate::Container {
                    &CONTAINER
                }
            }

            const API: Api = Api;

            /// The container behind this module.
            pub fn container() -> &'static $crate::Container {
                &CONTAINER
            }

            /// Mark `T` injectable, recording its dependency list.
            pub fn inject<T: $crate::Injectable>() {
                use $crate::ContainerApi;
                API.inject::<T>()
            }

            /// Resolve the singleton of `T`, constructing it on first use.
            pub fn resolve<T: $crate::Injectable>() -> Result<Arc<T>, $crate::InjectError> {
                use $crate::ContainerApi;
                API.resolve::<T>()
            }

            /// Construct `T` with explicit arguments; the result becomes the singleton.
            pub fn resolve_with<T: $crate::Injectable>(
                explicit: $crate::ExplicitArguments,
            ) -> Result<Arc<T>, $crate::InjectError> {
                use $crate::ContainerApi;
                API.resolve_with::<T>(explicit)
            }

            /// Place a prebuilt instance in the cache.
            pub fn provide<T: $crate::Injectable>(value: T) {
                use $crate::ContainerApi;
                API.provide(value)
            }

            /// Place a shared instance in the cache.
            pub fn provide_arc<T: $crate::Injectable>(value: Arc<T>) {
                use $crate::ContainerApi;
                API.provide_arc(value)
            }

            /// Check if `T` is marked injectable.
            pub fn is_registered<T: $crate::Injectable>() -> bool {
                use $crate::ContainerApi;
                API.is_registered::<T>()
            }

            /// Check if a live instance of `T` is cached.
            pub fn is_cached<T: $crate::Injectable>() -> bool {
                use $crate::ContainerApi;
                API.is_cached::<T>()
            }

            /// The recorded dependency list of `T`, if registered.
            pub fn dependencies_of<T: $crate::Injectable>() -> Option<Vec<$crate::ParameterInfo>> {
                use $crate::ContainerApi;
                API.dependencies_of::<T>()
            }

            /// Drop every cached instance; registrations are kept.
            pub fn reset() {
                use $crate::ContainerApi;
                API.reset()
            }

            /// Set a tracing callback for container operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::ContainerEvent) + Send + Sync + 'static,
            ) {
                use $crate::ContainerApi;
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                use $crate::ContainerApi;
                API.clear_trace_callback()
            }
        }
    };
}
