use std::fmt;

/// Errors surfaced by the crate's fallible setup paths.
///
/// Adjudication itself never returns this type; only configuration and
/// client construction do.
#[derive(Debug)]
pub enum Error {
    /// Identity resolution failed outside of adjudication
    Authentication(AuthenticationError),
    /// Settings could not be loaded or were incomplete
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Authentication(e) => write!(f, "Authentication error: {}", e),
            Error::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Authentication(e) => Some(e),
            Error::Config(e) => Some(e),
        }
    }
}

impl From<AuthenticationError> for Error {
    fn from(e: AuthenticationError) -> Self {
        Error::Authentication(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

/// A failure raised by an identity-resolution collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Human-readable message explaining the failure
    pub message: String,
}

impl AuthenticationError {
    /// Creates a new authentication error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for an [`ErrorKind::Infrastructure`] failure.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Infrastructure, message)
    }

    /// Shorthand for an [`ErrorKind::InvalidCredentials`] failure.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AuthenticationError {}

/// The category of an [`AuthenticationError`].
///
/// Callers of the adjudicator never see these; they end up in logs and
/// audit events only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Credentials were supplied but rejected
    InvalidCredentials,
    /// Credentials were required but absent
    MissingCredentials,
    /// The identity provider could not verify the callback
    VerificationFailed,
    /// The provider answered with an unusable message
    MalformedResponse,
    /// Storage, network or any other fault unrelated to the credentials
    Infrastructure,
    /// The resolver panicked
    Panicked,
}

impl ErrorKind {
    /// Stable snake_case label, used as a structured log field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::MissingCredentials => "missing_credentials",
            ErrorKind::VerificationFailed => "verification_failed",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::Infrastructure => "infrastructure",
            ErrorKind::Panicked => "panicked",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidCredentials => write!(f, "Invalid credentials"),
            ErrorKind::MissingCredentials => write!(f, "Missing credentials"),
            ErrorKind::VerificationFailed => write!(f, "Verification failed"),
            ErrorKind::MalformedResponse => write!(f, "Malformed response"),
            ErrorKind::Infrastructure => write!(f, "Infrastructure fault"),
            ErrorKind::Panicked => write!(f, "Resolver panicked"),
        }
    }
}

/// Errors raised while loading or validating [`Settings`](crate::Settings).
#[derive(Debug)]
pub enum ConfigError {
    /// A required property was not set or was empty
    MissingProperty(&'static str),
    /// A property was set to an unusable value
    InvalidValue {
        /// The offending property key
        property: &'static str,
        /// Why the value was rejected
        message: String,
    },
    /// The realm is enabled but users would not be created on first login
    UsersNotCreated,
    /// The underlying configuration source failed
    Source(config::ConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingProperty(key) => write!(f, "Property {} is missing", key),
            ConfigError::InvalidValue { message, .. } => f.write_str(message),
            ConfigError::UsersNotCreated => {
                write!(f, "Property authenticator.create_users must be set to true.")
            }
            ConfigError::Source(e) => write!(f, "Fail to load settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Source(e) => Some(e),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Source(e)
    }
}
