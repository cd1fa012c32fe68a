//! Extraction boundary trait for web integration.

use crate::request::AuthenticationAttempt;

/// Builds an [`AuthenticationAttempt`] from a framework-specific request.
///
/// Implementations only map types. They must not authenticate, look up
/// users or touch the session; that is the resolver's job.
///
/// # Examples
///
/// ```
/// use auth_adjudicator::web::ExtractAttempt;
/// use auth_adjudicator::AuthenticationAttempt;
///
/// struct MyFrameworkRequest {
///     id: String,
///     cookie: Option<String>,
/// }
///
/// impl ExtractAttempt for MyFrameworkRequest {
///     fn extract_attempt(&self) -> AuthenticationAttempt {
///         let attempt = AuthenticationAttempt::anonymous(self.id.clone());
///         match &self.cookie {
///             Some(token) => attempt.with_session_token(token.clone()),
///             None => attempt,
///         }
///     }
/// }
///
/// let req = MyFrameworkRequest { id: "req-1".to_string(), cookie: None };
/// assert_eq!(req.extract_attempt().request_id(), "req-1");
/// ```
pub trait ExtractAttempt {
    /// Returns the attempt described by this request.
    fn extract_attempt(&self) -> AuthenticationAttempt;
}

impl ExtractAttempt for AuthenticationAttempt {
    fn extract_attempt(&self) -> AuthenticationAttempt {
        self.clone()
    }
}
