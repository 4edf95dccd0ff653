/// Events emitted by a container during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
///
/// # Examples
///
/// ```rust
/// use singleton_inject::ContainerEvent;
///
/// let event = ContainerEvent::Register { type_name: "app::Mailer" };
/// assert_eq!(event.to_string(), "register { type_name: app::Mailer }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerEvent {
    /// A type was marked injectable, or its dependency list changed.
    Register {
        /// The type name of the injectable type
        type_name: &'static str,
    },

    /// A type was requested from the container.
    Resolve {
        /// The requested type name
        type_name: &'static str,
        /// Whether a cached instance was returned
        found: bool,
    },

    /// A fresh instance was constructed and published to the cache.
    Construct {
        /// The constructed type name
        type_name: &'static str,
    },

    /// A prebuilt instance was placed in the cache.
    Provide {
        /// The provided type name
        type_name: &'static str,
    },

    /// Every cached instance was dropped.
    Reset {},
}

impl std::fmt::Display for ContainerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerEvent::Register { type_name } => {
                write!(f, "register {{ type_name: {} }}", type_name)
            }
            ContainerEvent::Resolve { type_name, found } => {
                write!(f, "resolve {{ type_name: {}, found: {} }}", type_name, found)
            }
            ContainerEvent::Construct { type_name } => {
                write!(f, "construct {{ type_name: {} }}", type_name)
            }
            ContainerEvent::Provide { type_name } => {
                write!(f, "provide {{ type_name: {} }}", type_name)
            }
            ContainerEvent::Reset {} => write!(f, "Resetting the Container"),
        }
    }
}
