//! Fail-safe authentication adjudication for sign-in callbacks.
//!
//! An [`AuthAdjudicator`] asks an [`IdentityResolver`] who is behind an
//! [`AuthenticationAttempt`] and turns the answer into an
//! [`AuthenticationResult`]: either `Authenticated(identity)` or
//! `Anonymous`. Resolver failures never reach the caller. Each one is logged
//! once through `tracing` and the visitor continues anonymously.
//!
//! # Core Types
//!
//! - [`AuthAdjudicator`]: the total classification function
//! - [`IdentityResolver`]: the seam to whatever knows who users are
//! - [`AuthenticationResult`]: the two-variant outcome
//! - [`Secret<T>`]: wrapper that redacts sensitive values in logs/output
//! - [`openid::OpenIdClient`]: resolver backed by an OpenID provider
//! - [`web`]: framework-neutral request adapter and route handlers
//!
//! # Examples
//!
//! ```
//! use auth_adjudicator::{
//!     resolver_fn, AuthAdjudicator, AuthenticationAttempt, AuthenticationError,
//!     AuthenticationResult, Secret,
//! };
//!
//! // Secrets are automatically redacted
//! let token = Secret::new("sess-42".to_string());
//! assert_eq!(format!("{:?}", token), "[REDACTED]");
//!
//! let adjudicator = AuthAdjudicator::new(resolver_fn(|attempt: &AuthenticationAttempt| {
//!     match attempt.context().parameters.get("user") {
//!         Some(user) => Ok(Some(user.clone())),
//!         None => Err(AuthenticationError::invalid_credentials("no user parameter")),
//!     }
//! }));
//!
//! let attempt = AuthenticationAttempt::anonymous("req-1").with_parameter("user", "rick");
//! assert!(adjudicator.adjudicate(&attempt).is_authenticated());
//!
//! let attempt = AuthenticationAttempt::anonymous("req-2");
//! assert_eq!(adjudicator.adjudicate(&attempt), AuthenticationResult::Anonymous);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adjudicator;
pub mod audit;
mod error;
mod logging;
pub mod openid;
mod outcome;
mod profile;
mod request;
mod resolver;
mod secret;
mod settings;
pub mod web;

pub use adjudicator::AuthAdjudicator;
pub use error::{AuthenticationError, ConfigError, Error, ErrorKind};
pub use logging::AttemptLog;
pub use outcome::AuthenticationResult;
pub use profile::{
    ProviderResponse, UserDetails, AX_EMAIL, AX_FIRST_NAME, AX_LAST_NAME, SREG_EMAIL,
    SREG_FULLNAME,
};
pub use request::{AuthenticationAttempt, Credentials, RequestContext};
pub use resolver::{resolver_fn, FnResolver, Identity, IdentityResolver};
pub use secret::Secret;
pub use settings::{
    Activation, AuthenticatorSettings, OpenIdSettings, SecuritySettings, Settings, ENV_PREFIX,
    OPENID_REALM,
};
