//! Declaring injectable types.
//!
//! A type becomes injectable by implementing [`Injectable`]: it lists its
//! constructor parameters in a [`Signature`] and builds itself from the
//! assembled [`Arguments`]. Callers may override parameters for a single
//! construction call with [`ExplicitArguments`].

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::registry::Registration;
use crate::InjectError;

/// Type-erased shared instance, the unit stored in the singleton cache.
pub(crate) type SharedAny = Arc<dyn Any + Send + Sync>;

type DefaultFn = Arc<dyn Fn() -> SharedAny + Send + Sync>;

/// A type the container can construct, cache and inject.
///
/// # Examples
///
/// ```rust
/// use singleton_inject::{Arguments, InjectError, Injectable, Signature};
/// use std::sync::Arc;
///
/// struct PersonService;
///
/// impl Injectable for PersonService {
///     fn construct(_: &Arguments) -> Result<Self, InjectError> {
///         Ok(PersonService)
///     }
/// }
///
/// struct GroupService {
///     person_service: Arc<PersonService>,
/// }
///
/// impl Injectable for GroupService {
///     fn signature() -> Signature {
///         Signature::new().dependency::<PersonService>("person_service")
///     }
///
///     fn construct(args: &Arguments) -> Result<Self, InjectError> {
///         Ok(GroupService {
///             person_service: args.get("person_service")?,
///         })
///     }
/// }
/// ```
pub trait Injectable: Send + Sync + Sized + 'static {
    /// Human-readable name used in diagnostics instead of the type path.
    const NAME: Option<&'static str> = None;

    /// Constructor parameters in declaration order.
    fn signature() -> Signature {
        Signature::new()
    }

    /// Builds the instance. Application failures are reported with
    /// [`InjectError::construction`] and reach the caller unchanged.
    fn construct(args: &Arguments) -> Result<Self, InjectError>;
}

/// What kind of value a parameter expects.
#[derive(Clone)]
pub(crate) enum ParameterKind {
    /// Another injectable type, resolved through the container.
    Dependency(fn() -> Registration),
    /// Any other type; supplied explicitly or taken from the default.
    Leaf(Option<DefaultFn>),
}

/// One declared constructor parameter.
#[derive(Clone)]
pub struct Parameter {
    pub(crate) name: &'static str,
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) kind: ParameterKind,
    pub(crate) accepts: fn(&SharedAny) -> bool,
}

fn accepts<P: Any + Send + Sync>(value: &SharedAny) -> bool {
    value.is::<P>()
}

impl Parameter {
    fn new<P: Any + Send + Sync>(name: &'static str, kind: ParameterKind) -> Self {
        Self {
            name,
            type_id: TypeId::of::<P>(),
            type_name: std::any::type_name::<P>(),
            kind,
            accepts: accepts::<P>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn info(&self) -> ParameterInfo {
        let (injectable, has_default) = match &self.kind {
            ParameterKind::Dependency(_) => (true, false),
            ParameterKind::Leaf(default) => (false, default.is_some()),
        };
        ParameterInfo {
            name: self.name,
            type_id: self.type_id,
            type_name: self.type_name,
            injectable,
            has_default,
        }
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.info(), f)
    }
}

/// Diagnostic view of a declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: &'static str,
    pub type_id: TypeId,
    pub type_name: &'static str,
    /// Whether the parameter is auto-resolved from the container
    pub injectable: bool,
    pub has_default: bool,
}

/// Ordered list of constructor parameters.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    parameters: Vec<Parameter>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a parameter resolved from the container as a shared `Arc<D>`.
    pub fn dependency<D: Injectable>(mut self, name: &'static str) -> Self {
        let kind = ParameterKind::Dependency(Registration::of::<D>);
        self.parameters.push(Parameter::new::<D>(name, kind));
        self
    }

    /// Declares a parameter that must be passed explicitly.
    pub fn leaf<P: Any + Send + Sync>(mut self, name: &'static str) -> Self {
        self.parameters
            .push(Parameter::new::<P>(name, ParameterKind::Leaf(None)));
        self
    }

    /// Declares a parameter that falls back to `default()` when not passed.
    pub fn leaf_or<P: Any + Send + Sync>(
        mut self,
        name: &'static str,
        default: impl Fn() -> P + Send + Sync + 'static,
    ) -> Self {
        let default: DefaultFn = Arc::new(move || Arc::new(default()) as SharedAny);
        self.parameters
            .push(Parameter::new::<P>(name, ParameterKind::Leaf(Some(default))));
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub(crate) fn into_parameters(self) -> Vec<Parameter> {
        self.parameters
    }
}

/// Values assembled for one constructor call, looked up by parameter name.
pub struct Arguments {
    type_name: &'static str,
    values: Vec<(&'static str, SharedAny)>,
}

impl Arguments {
    pub(crate) fn new(type_name: &'static str, values: Vec<(&'static str, SharedAny)>) -> Self {
        Self { type_name, values }
    }

    /// Returns the shared value of parameter `name`.
    ///
    /// # Errors
    ///
    /// - `name` is not declared in the signature
    /// - `P` is not the declared parameter type
    pub fn get<P: Any + Send + Sync>(&self, name: &str) -> Result<Arc<P>, InjectError> {
        let (parameter, value) = self
            .values
            .iter()
            .find(|(parameter, _)| *parameter == name)
            .map(|(parameter, value)| (*parameter, value))
            .ok_or_else(|| InjectError::MissingArgument {
                type_name: self.type_name,
                parameter: name.to_string(),
            })?;

        value
            .clone()
            .downcast::<P>()
            .map_err(|_| InjectError::ArgumentTypeMismatch {
                type_name: self.type_name,
                parameter,
                expected: std::any::type_name::<P>(),
            })
    }

    /// Returns an owned clone of the value of parameter `name`.
    pub fn get_cloned<P: Any + Send + Sync + Clone>(&self, name: &str) -> Result<P, InjectError> {
        let arc = self.get::<P>(name)?;
        Ok((*arc).clone())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Caller-supplied values that override automatic resolution for one call.
///
/// Positional values target parameters by declaration index, named values by
/// parameter name. Nothing here is cached; the values apply to a single
/// construction.
///
/// ```rust
/// use singleton_inject::ExplicitArguments;
///
/// let args = ExplicitArguments::new()
///     .arg("smtp.example.com".to_string())
///     .named("retries", 5u32);
/// assert_eq!(args.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct ExplicitArguments {
    positional: Vec<SharedAny>,
    named: Vec<(String, SharedAny)>,
}

impl ExplicitArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next positional value.
    pub fn arg<P: Any + Send + Sync>(self, value: P) -> Self {
        self.arg_arc(Arc::new(value))
    }

    /// Appends the next positional value, keeping the caller's `Arc` identity.
    pub fn arg_arc<P: Any + Send + Sync>(mut self, value: Arc<P>) -> Self {
        self.positional.push(value);
        self
    }

    /// Sets the value of the parameter called `name`.
    pub fn named<P: Any + Send + Sync>(self, name: impl Into<String>, value: P) -> Self {
        self.named_arc(name, Arc::new(value))
    }

    /// Sets the value of the parameter called `name`, keeping the caller's `Arc` identity.
    pub fn named_arc<P: Any + Send + Sync>(
        mut self,
        name: impl Into<String>,
        value: Arc<P>,
    ) -> Self {
        let name = name.into();
        self.named.retain(|(existing, _)| *existing != name);
        self.named.push((name, value));
        self
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    pub(crate) fn positional(&self) -> &[SharedAny] {
        &self.positional
    }

    pub(crate) fn named_values(&self) -> impl Iterator<Item = (&str, &SharedAny)> {
        self.named.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub(crate) fn lookup_named(&self, name: &str) -> Option<&SharedAny> {
        self.named
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Debug for ExplicitArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplicitArguments")
            .field("positional", &self.positional.len())
            .field(
                "named",
                &self.named.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
