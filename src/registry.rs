//! Registration metadata and the singleton cache.
//!
//! The [`Registry`] records which types are injectable and what each
//! constructor needs. The [`SingletonCache`] owns the live instances. Both
//! live inside one [`State`] guarded by the container's lock, and `reset`
//! only ever touches the cache.

use std::{any::TypeId, collections::HashMap, sync::Arc};

use tracing::debug;

use crate::injectable::{Arguments, Parameter, SharedAny};
use crate::{InjectError, Injectable, ParameterInfo};

type ConstructFn = fn(&Arguments) -> Result<SharedAny, InjectError>;

fn construct_erased<T: Injectable>(args: &Arguments) -> Result<SharedAny, InjectError> {
    let instance = T::construct(args)?;
    Ok(Arc::new(instance) as SharedAny)
}

/// Everything the resolver needs to know about one injectable type.
#[derive(Clone)]
pub(crate) struct Registration {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub name: Option<&'static str>,
    pub parameters: Arc<[Parameter]>,
    pub construct: ConstructFn,
}

impl Registration {
    pub fn of<T: Injectable>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            name: T::NAME,
            parameters: T::signature().into_parameters().into(),
            construct: construct_erased::<T>,
        }
    }

    /// Name used in diagnostics.
    pub fn label(&self) -> &'static str {
        self.name.unwrap_or(self.type_name)
    }

    pub fn dependency_list(&self) -> Vec<ParameterInfo> {
        self.parameters.iter().map(Parameter::info).collect()
    }

    fn same_signature(&self, other: &Registration) -> bool {
        self.name == other.name && self.dependency_list() == other.dependency_list()
    }
}

/// Outcome of [`Registry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Registered {
    New,
    Updated,
    Unchanged,
}

/// The set of types marked injectable.
#[derive(Default)]
pub(crate) struct Registry {
    types: HashMap<TypeId, Registration>,
}

impl Registry {
    /// Records a type. Registering an identical signature again is a no-op; a
    /// different signature replaces the stored one without touching the cache.
    pub fn register(&mut self, registration: Registration) -> Registered {
        match self.types.get_mut(&registration.type_id) {
            Some(existing) if existing.same_signature(&registration) => Registered::Unchanged,
            Some(existing) => {
                debug!(type_name = registration.type_name, "updated injectable signature");
                *existing = registration;
                Registered::Updated
            }
            None => {
                debug!(
                    type_name = registration.type_name,
                    parameters = registration.parameters.len(),
                    "registered injectable type"
                );
                self.types.insert(registration.type_id, registration);
                Registered::New
            }
        }
    }

    pub fn get(&self, type_id: &TypeId) -> Option<&Registration> {
        self.types.get(type_id)
    }

    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.types.contains_key(type_id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.types.len()
    }
}

/// Live instances keyed by type; at most one per type.
#[derive(Default)]
pub(crate) struct SingletonCache {
    instances: HashMap<TypeId, SharedAny>,
}

impl SingletonCache {
    pub fn get(&self, type_id: &TypeId) -> Option<SharedAny> {
        self.instances.get(type_id).cloned()
    }

    /// Publishes an instance, replacing any previous one for the same type.
    pub fn insert(&mut self, type_id: TypeId, instance: SharedAny) {
        self.instances.insert(type_id, instance);
    }

    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.instances.contains_key(type_id)
    }

    /// Drops every instance. Outstanding `Arc`s held by callers stay valid.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.instances.len()
    }
}

/// Registry and cache, always locked together.
#[derive(Default)]
pub(crate) struct State {
    pub registry: Registry,
    pub cache: SingletonCache,
}

impl State {
    /// Returns the stored registration for a type, registering it first via
    /// `registration` if it is unknown.
    pub fn registration(
        &mut self,
        type_id: TypeId,
        registration: fn() -> Registration,
    ) -> (Registration, Registered) {
        if let Some(existing) = self.registry.get(&type_id) {
            return (existing.clone(), Registered::Unchanged);
        }
        let registration = registration();
        let outcome = self.registry.register(registration.clone());
        (registration, outcome)
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
