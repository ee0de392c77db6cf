//! Error handling types

use thiserror::Error;

/// Result type alias for harness operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Error raised by the code under test
///
/// Handlers return their own error types boxed; the harness never inspects
/// them beyond downcasting in `assert_raises`.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the controller-spec harness
#[derive(Error, Debug)]
pub enum Error {
    /// Action name outside the fixed verb table
    #[error("Unknown action: {action}")]
    UnknownAction {
        /// The offending action name
        action: String,
    },

    /// Entity reference that cannot be resolved to a class descriptor
    #[error("Invalid model reference: {reference}")]
    InvalidModelReference {
        /// The reference as given by the test author
        reference: String,
    },

    /// Dispatch attempted before any action was declared
    #[error("No action set for this example")]
    NoActionSet,

    /// A double received a message nobody stubbed
    #[error("{target} received unexpected message :{method}")]
    UnstubbedMethod {
        /// Label of the receiving double
        target: String,
        /// The message name
        method: String,
    },

    /// A stubbed message was sent with arguments no stub matches
    #[error("{target} received :{method} with unexpected arguments ({args})")]
    UnexpectedArguments {
        /// Label of the receiving double
        target: String,
        /// The message name
        method: String,
        /// Rendered argument list
        args: String,
    },

    /// A generated or ad hoc expectation did not hold
    #[error("Expectation failed: {message}")]
    AssertionFailed {
        /// What was expected and what was observed
        message: String,
    },

    /// Error raised by the handler under test, passed through untouched
    #[error(transparent)]
    Handler(HandlerError),

    /// Invalid argument provided to a harness function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Harness error creation methods
impl Error {
    /// Create an unknown action error
    pub fn unknown_action<S: Into<String>>(action: S) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }

    /// Create an invalid model reference error
    pub fn invalid_model_reference<S: Into<String>>(reference: S) -> Self {
        Self::InvalidModelReference {
            reference: reference.into(),
        }
    }

    /// Create an unstubbed method error
    pub fn unstubbed_method<T: Into<String>, M: Into<String>>(target: T, method: M) -> Self {
        Self::UnstubbedMethod {
            target: target.into(),
            method: method.into(),
        }
    }

    /// Create an unexpected arguments error
    pub fn unexpected_arguments<T, M, A>(target: T, method: M, args: A) -> Self
    where
        T: Into<String>,
        M: Into<String>,
        A: Into<String>,
    {
        Self::UnexpectedArguments {
            target: target.into(),
            method: method.into(),
            args: args.into(),
        }
    }

    /// Create an assertion failure
    pub fn assertion_failed<S: Into<String>>(message: S) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Wrap an error raised by the handler under test
    pub fn handler(error: HandlerError) -> Self {
        Self::Handler(error)
    }

    /// Whether this error came from the handler and is of type `E`
    pub fn is_handler_error<E: std::error::Error + 'static>(&self) -> bool {
        match self {
            Self::Handler(inner) => inner.is::<E>(),
            _ => false,
        }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
