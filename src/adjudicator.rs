use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::audit::{AuditEvent, AuditOutcome, AuditTrail};
use crate::error::{AuthenticationError, ErrorKind};
use crate::outcome::AuthenticationResult;
use crate::request::AuthenticationAttempt;
use crate::resolver::{Identity, IdentityResolver};

/// Classifies authentication attempts as authenticated or anonymous.
///
/// `AuthAdjudicator` wraps an [`IdentityResolver`] and turns whatever it
/// returns into an [`AuthenticationResult`]. It never returns an error:
///
/// | resolver returns       | result                     | logged                  |
/// |------------------------|----------------------------|-------------------------|
/// | `Ok(Some(identity))`   | `Authenticated(identity)`  | debug                   |
/// | `Ok(None)`             | `Anonymous`                | debug                   |
/// | `Err(_)`               | `Anonymous`                | warn, once, with `kind` |
/// | panic                  | `Anonymous`                | warn, once, `panicked`  |
///
/// Invalid credentials and infrastructure faults are treated identically;
/// the error kind survives only in the log line and the audit event.
///
/// The adjudicator holds no mutable state. Sharing it between threads is
/// safe whenever the resolver is `Send + Sync`.
///
/// Panics are contained with [`std::panic::catch_unwind`], which does not
/// silence the process panic hook. The default hook still prints
/// `thread ... panicked at` to stderr before the warn line; applications that
/// want the fault reported only through `tracing` install their own hook with
/// [`std::panic::set_hook`]. Builds with `panic = "abort"` cannot contain
/// panics at all.
///
/// # Examples
///
/// ```
/// use auth_adjudicator::{
///     resolver_fn, AuthAdjudicator, AuthenticationAttempt, AuthenticationError,
///     AuthenticationResult,
/// };
///
/// let adjudicator = AuthAdjudicator::new(resolver_fn(|attempt: &AuthenticationAttempt| {
///     match &attempt.context().session_token {
///         Some(_) => Ok(Some("rick".to_string())),
///         None => Err(AuthenticationError::infrastructure("session store offline")),
///     }
/// }));
///
/// let known = AuthenticationAttempt::anonymous("req-1").with_session_token("sess-1");
/// assert_eq!(
///     adjudicator.adjudicate(&known),
///     AuthenticationResult::Authenticated("rick".to_string())
/// );
///
/// // The fault is logged and swallowed.
/// let unknown = AuthenticationAttempt::anonymous("req-2");
/// assert_eq!(adjudicator.adjudicate(&unknown), AuthenticationResult::Anonymous);
/// ```
#[derive(Debug)]
pub struct AuthAdjudicator<R> {
    resolver: R,
    audit: Option<Arc<AuditTrail>>,
}

impl<R: IdentityResolver> AuthAdjudicator<R> {
    /// Creates an adjudicator around `resolver`.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            audit: None,
        }
    }

    /// Records one event per adjudication into `trail`.
    pub fn with_audit_trail(mut self, trail: Arc<AuditTrail>) -> Self {
        self.audit = Some(trail);
        self
    }

    /// Returns the wrapped resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Adjudicates an attempt.
    ///
    /// This is a total function: every resolver outcome, including a resolver
    /// panic, maps to one of the two variants.
    pub fn adjudicate(&self, attempt: &AuthenticationAttempt) -> AuthenticationResult<R::Identity> {
        let log = attempt.log();

        match self.resolve(attempt) {
            Ok(Some(identity)) => {
                log.debug(format_args!("authenticated as {}", identity.subject()));
                self.record(|| {
                    AuditEvent::new(
                        attempt.request_id(),
                        Some(identity.subject()),
                        AuditOutcome::Authenticated,
                    )
                });
                AuthenticationResult::Authenticated(identity)
            }
            Ok(None) => {
                log.debug(format_args!("no identity resolved, continuing as anonymous"));
                self.record(|| {
                    AuditEvent::new(attempt.request_id(), None::<String>, AuditOutcome::Anonymous)
                });
                AuthenticationResult::Anonymous
            }
            Err(err) => {
                log.suppressed(&err);
                self.record(|| {
                    AuditEvent::new(attempt.request_id(), None::<String>, AuditOutcome::Suppressed)
                        .with_error_kind(err.kind)
                });
                AuthenticationResult::Anonymous
            }
        }
    }

    fn resolve(
        &self,
        attempt: &AuthenticationAttempt,
    ) -> Result<Option<R::Identity>, AuthenticationError> {
        // The resolver is only borrowed; nothing observes it half-updated.
        match panic::catch_unwind(AssertUnwindSafe(|| self.resolver.resolve(attempt))) {
            Ok(outcome) => outcome,
            Err(payload) => Err(AuthenticationError::new(
                ErrorKind::Panicked,
                panic_message(payload.as_ref()),
            )),
        }
    }

    fn record(&self, event: impl FnOnce() -> AuditEvent) {
        if let Some(trail) = &self.audit {
            trail.record(event());
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "resolver panicked".to_string()
    }
}
