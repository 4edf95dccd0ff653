//! Dependency resolution.
//!
//! A [`Resolver`] borrows the locked container state for one top-level call
//! and walks the target's dependency list depth-first. The
//! [`ResolutionFrame`] mirrors the recursion so a type that is revisited
//! before its own construction finishes is reported as a cycle.

use std::any::TypeId;

use tracing::{debug, trace, warn};

use crate::injectable::{Arguments, ParameterKind, SharedAny};
use crate::registry::{Registered, Registration, State};
use crate::{ContainerEvent, ExplicitArguments, InjectError};

/// Types currently under construction within one top-level resolution.
#[derive(Debug, Default)]
pub(crate) struct ResolutionFrame {
    stack: Vec<(TypeId, &'static str)>,
}

impl ResolutionFrame {
    /// Marks `registration` as in progress.
    ///
    /// # Errors
    ///
    /// [`InjectError::Cycle`] if the type is already in progress; the path
    /// runs from its first occurrence back to itself.
    pub fn enter(&mut self, registration: &Registration) -> Result<(), InjectError> {
        if let Some(start) = self
            .stack
            .iter()
            .position(|(type_id, _)| *type_id == registration.type_id)
        {
            let mut path: Vec<_> = self.stack[start..].iter().map(|(_, label)| *label).collect();
            path.push(registration.label());
            return Err(InjectError::Cycle { path });
        }
        self.stack.push((registration.type_id, registration.label()));
        Ok(())
    }

    pub fn leave(&mut self) {
        self.stack.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

pub(crate) struct Resolver<'a> {
    state: &'a mut State,
    emit: &'a dyn Fn(&ContainerEvent),
}

impl<'a> Resolver<'a> {
    pub fn new(state: &'a mut State, emit: &'a dyn Fn(&ContainerEvent)) -> Self {
        Self { state, emit }
    }

    /// Looks up a registration, registering the type first if it is unknown.
    pub fn registration(
        &mut self,
        type_id: TypeId,
        registration: fn() -> Registration,
    ) -> Registration {
        let (registration, outcome) = self.state.registration(type_id, registration);
        if outcome != Registered::Unchanged {
            (self.emit)(&ContainerEvent::Register {
                type_name: registration.type_name,
            });
        }
        registration
    }

    /// Returns the cached instance of `target`, or constructs, caches and
    /// returns a new one.
    ///
    /// Non-empty `explicit` arguments always construct `target` afresh and
    /// replace its cache entry; its dependencies are still served from the
    /// cache. Nothing is cached when any step fails.
    pub fn resolve(
        &mut self,
        target: &Registration,
        explicit: Option<&ExplicitArguments>,
        frame: &mut ResolutionFrame,
    ) -> Result<SharedAny, InjectError> {
        let explicit = explicit.filter(|args| !args.is_empty());

        if explicit.is_none() {
            if let Some(instance) = self.state.cache.get(&target.type_id) {
                trace!(type_name = target.type_name, "singleton cache hit");
                (self.emit)(&ContainerEvent::Resolve {
                    type_name: target.type_name,
                    found: true,
                });
                return Ok(instance);
            }
        }

        (self.emit)(&ContainerEvent::Resolve {
            type_name: target.type_name,
            found: false,
        });

        if let Err(err) = frame.enter(target) {
            warn!(error = %err, "refusing to resolve dependency cycle");
            return Err(err);
        }
        let constructed = self
            .assemble(target, explicit, frame)
            .and_then(|args| (target.construct)(&args));
        frame.leave();
        let instance = constructed?;

        self.state.cache.insert(target.type_id, instance.clone());
        debug!(
            type_name = target.type_name,
            explicit = explicit.is_some(),
            "constructed singleton"
        );
        (self.emit)(&ContainerEvent::Construct {
            type_name: target.type_name,
        });

        Ok(instance)
    }

    /// Builds the argument list for `target`, parameter by parameter:
    /// explicit value, then container resolution, then default.
    fn assemble(
        &mut self,
        target: &Registration,
        explicit: Option<&ExplicitArguments>,
        frame: &mut ResolutionFrame,
    ) -> Result<Arguments, InjectError> {
        if let Some(explicit) = explicit {
            check_explicit(target, explicit)?;
        }

        let mut values = Vec::with_capacity(target.parameters.len());
        for (position, parameter) in target.parameters.iter().enumerate() {
            let supplied = explicit.and_then(|args| {
                args.positional()
                    .get(position)
                    .or_else(|| args.lookup_named(parameter.name))
            });

            let value = match (supplied, &parameter.kind) {
                (Some(value), _) => {
                    if !(parameter.accepts)(value) {
                        return Err(InjectError::ArgumentTypeMismatch {
                            type_name: target.label(),
                            parameter: parameter.name,
                            expected: parameter.type_name,
                        });
                    }
                    value.clone()
                }
                (None, ParameterKind::Dependency(registration)) => {
                    let dependency = self.registration(parameter.type_id, *registration);
                    self.resolve(&dependency, None, frame)?
                }
                (None, ParameterKind::Leaf(Some(default))) => default(),
                (None, ParameterKind::Leaf(None)) => {
                    return Err(InjectError::MissingDependency {
                        type_name: target.label(),
                        parameter: parameter.name,
                        parameter_type: parameter.type_name,
                    });
                }
            };
            values.push((parameter.name, value));
        }

        Ok(Arguments::new(target.label(), values))
    }
}

/// Rejects explicit arguments that name no parameter, overflow the parameter
/// list, or target one parameter twice.
fn check_explicit(target: &Registration, explicit: &ExplicitArguments) -> Result<(), InjectError> {
    let positional = explicit.positional().len();
    if positional > target.parameters.len() {
        return Err(InjectError::UnexpectedArgument {
            type_name: target.label(),
            argument: format!("#{}", target.parameters.len()),
        });
    }

    for (name, _) in explicit.named_values() {
        match target.parameters.iter().position(|p| p.name == name) {
            None => {
                return Err(InjectError::UnexpectedArgument {
                    type_name: target.label(),
                    argument: name.to_string(),
                })
            }
            Some(index) if index < positional => {
                return Err(InjectError::DuplicateArgument {
                    type_name: target.label(),
                    parameter: target.parameters[index].name,
                })
            }
            Some(_) => {}
        }
    }

    Ok(())
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
