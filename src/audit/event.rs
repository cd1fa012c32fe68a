use std::fmt;

use crate::error::ErrorKind;

/// How an adjudication ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// The resolver produced an identity
    Authenticated,
    /// The resolver found no identity
    Anonymous,
    /// The resolver failed and the failure was converted to anonymous
    Suppressed,
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOutcome::Authenticated => write!(f, "authenticated"),
            AuditOutcome::Anonymous => write!(f, "anonymous"),
            AuditOutcome::Suppressed => write!(f, "suppressed"),
        }
    }
}

/// A single adjudication record.
///
/// # Example
///
/// ```
/// use auth_adjudicator::audit::{AuditEvent, AuditOutcome};
/// use auth_adjudicator::ErrorKind;
///
/// let event = AuditEvent::new("req-9", None::<String>, AuditOutcome::Suppressed)
///     .with_error_kind(ErrorKind::Infrastructure);
///
/// assert_eq!(event.error_kind(), Some(ErrorKind::Infrastructure));
/// assert_eq!(
///     event.to_string(),
///     "AuditEvent[outcome=suppressed, request_id=req-9, principal=<none>, error=infrastructure]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    request_id: String,
    /// Subject label of the resolved identity; `None` unless authenticated
    principal: Option<String>,
    outcome: AuditOutcome,
    error_kind: Option<ErrorKind>,
}

impl AuditEvent {
    /// Creates a new audit event.
    pub fn new(
        request_id: impl Into<String>,
        principal: Option<impl Into<String>>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            principal: principal.map(Into::into),
            outcome,
            error_kind: None,
        }
    }

    /// Records the kind of a suppressed failure.
    pub fn with_error_kind(mut self, kind: ErrorKind) -> Self {
        self.error_kind = Some(kind);
        self
    }

    /// Returns the request identifier.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the principal, if authenticated.
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> AuditOutcome {
        self.outcome
    }

    /// Returns the suppressed error kind, if any.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuditEvent[outcome={}, request_id={}, principal={}",
            self.outcome,
            self.request_id,
            self.principal.as_deref().unwrap_or("<none>")
        )?;

        if let Some(kind) = self.error_kind {
            write!(f, ", error={}", kind.as_str())?;
        }

        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_display() {
        assert_eq!(AuditOutcome::Authenticated.to_string(), "authenticated");
        assert_eq!(AuditOutcome::Anonymous.to_string(), "anonymous");
        assert_eq!(AuditOutcome::Suppressed.to_string(), "suppressed");
    }

    #[test]
    fn authenticated_event_names_principal() {
        let event = AuditEvent::new("req-1", Some("Rick Hunter"), AuditOutcome::Authenticated);

        assert_eq!(event.principal(), Some("Rick Hunter"));
        assert!(event.error_kind().is_none());
        assert_eq!(
            event.to_string(),
            "AuditEvent[outcome=authenticated, request_id=req-1, principal=Rick Hunter]"
        );
    }

    #[test]
    fn anonymous_event_has_no_principal() {
        let event = AuditEvent::new("req-anon", None::<String>, AuditOutcome::Anonymous);

        assert!(event.principal().is_none());
        assert!(event.to_string().contains("<none>"));
    }
}
