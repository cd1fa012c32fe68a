//! Callback validation: adjudicate, then always move on.
//!
//! ```text
//! HTTP callback
//!   ↓
//! Framework code builds RequestAdapter
//!   ↓
//! validate(&adjudicator, &adapter)
//!   ↓
//! Validation { current_user, next: RedirectBackOrDefault }
//!   ↓
//! Framework binds current_user into the session, then redirects
//! ```
//!
//! There is no error branch. A failed sign-in is an anonymous visitor who is
//! redirected exactly like a successful one.

use crate::adjudicator::AuthAdjudicator;
use crate::outcome::AuthenticationResult;
use crate::resolver::IdentityResolver;

use super::ExtractAttempt;

/// What the caller does after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Redirect to the page stored before sign-in, or to the home page
    RedirectBackOrDefault,
}

/// Result of validating a sign-in callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation<I> {
    /// Request ID of the callback
    pub request_id: String,
    /// Adjudicated outcome
    pub result: AuthenticationResult<I>,
    /// Always [`NextStep::RedirectBackOrDefault`]
    pub next: NextStep,
}

impl<I> Validation<I> {
    /// Hands over the current user for the caller to bind into its session.
    ///
    /// `None` means the visitor stays anonymous.
    pub fn into_current_user(self) -> Option<I> {
        self.result.into_identity()
    }
}

/// Validates a sign-in callback.
///
/// # Examples
///
/// ```
/// use auth_adjudicator::web::{validate, NextStep, RequestAdapter};
/// use auth_adjudicator::{resolver_fn, AuthAdjudicator, AuthenticationAttempt, AuthenticationError};
///
/// let adjudicator = AuthAdjudicator::new(resolver_fn(|_: &AuthenticationAttempt| {
///     Err::<Option<String>, _>(AuthenticationError::infrastructure("provider timeout"))
/// }));
///
/// let adapter = RequestAdapter::new("req-1", "https://ci.example.com/openid/validate");
/// let validation = validate(&adjudicator, &adapter);
///
/// assert_eq!(validation.next, NextStep::RedirectBackOrDefault);
/// assert_eq!(validation.into_current_user(), None);
/// ```
pub fn validate<R, E>(adjudicator: &AuthAdjudicator<R>, request: &E) -> Validation<R::Identity>
where
    R: IdentityResolver,
    E: ExtractAttempt + ?Sized,
{
    let attempt = request.extract_attempt();
    let result = adjudicator.adjudicate(&attempt);

    Validation {
        request_id: attempt.request_id().to_string(),
        result,
        next: NextStep::RedirectBackOrDefault,
    }
}
