use thiserror::Error;

/// Boxed application error returned by an injectable type's constructor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while registering or resolving injectable types.
#[derive(Debug, Error)]
pub enum InjectError {
    /// A leaf parameter had no explicit argument and no default value.
    #[error("missing dependency `{parameter}: {parameter_type}` while constructing {type_name}")]
    MissingDependency {
        type_name: &'static str,
        parameter: &'static str,
        parameter_type: &'static str,
    },

    /// A type transitively depends on itself.
    ///
    /// `path` starts and ends with the type that was revisited.
    #[error("dependency cycle detected: {}", .path.join(" -> "))]
    Cycle { path: Vec<&'static str> },

    /// The constructor of an injectable type failed. Display and `source()`
    /// forward to the application error; `into_construction_error` returns it.
    #[error(transparent)]
    Construction(BoxError),

    /// An explicit argument did not match any constructor parameter.
    #[error("unexpected argument `{argument}` for {type_name}")]
    UnexpectedArgument {
        type_name: &'static str,
        argument: String,
    },

    /// Both a positional and a named explicit argument targeted one parameter.
    #[error("parameter `{parameter}` of {type_name} was supplied more than once")]
    DuplicateArgument {
        type_name: &'static str,
        parameter: &'static str,
    },

    /// An explicit argument had a different type than the declared parameter.
    #[error("argument `{parameter}` of {type_name} expects a value of type {expected}")]
    ArgumentTypeMismatch {
        type_name: &'static str,
        parameter: &'static str,
        expected: &'static str,
    },

    /// A constructor asked for an argument its signature does not declare.
    #[error("{type_name} has no parameter named `{parameter}`")]
    MissingArgument {
        type_name: &'static str,
        parameter: String,
    },

    /// A cached instance could not be downcast to the requested type.
    ///
    /// Should not occur: instances are only cached under their own `TypeId`.
    /// Kept so a broken invariant surfaces as an error instead of a panic.
    #[error("type mismatch in container for type: {type_name}")]
    TypeMismatch { type_name: &'static str },
}

impl InjectError {
    /// Wraps an application error raised inside a constructor.
    pub fn construction(err: impl Into<BoxError>) -> Self {
        InjectError::Construction(err.into())
    }

    /// Returns `true` for [`InjectError::Cycle`].
    pub fn is_cycle(&self) -> bool {
        matches!(self, InjectError::Cycle { .. })
    }

    /// Returns `true` for [`InjectError::MissingDependency`].
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, InjectError::MissingDependency { .. })
    }

    /// Unwraps the application error of a failed constructor.
    pub fn into_construction_error(self) -> Result<BoxError, Self> {
        match self {
            InjectError::Construction(err) => Ok(err),
            other => Err(other),
        }
    }
}
