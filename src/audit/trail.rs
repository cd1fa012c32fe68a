use std::sync::{Mutex, MutexGuard, PoisonError};

use super::AuditEvent;

/// In-memory recorder for adjudication events.
///
/// Intended for tests and demonstrations: events accumulate until
/// [`clear`](AuditTrail::clear) is called. Production deployments forward
/// the `auth_audit` tracing target to durable storage instead.
///
/// The trail is shared between request-handling threads, so events are kept
/// behind a mutex. A poisoned lock is recovered rather than propagated: a
/// panic elsewhere must not stop the adjudicator from recording.
///
/// # Example
///
/// ```
/// use auth_adjudicator::audit::{AuditEvent, AuditOutcome, AuditTrail};
///
/// let trail = AuditTrail::new();
/// trail.record(AuditEvent::new("req-1", Some("rick"), AuditOutcome::Authenticated));
///
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct AuditTrail {
    events: Mutex<Vec<AuditEvent>>,
}

impl AuditTrail {
    /// Creates a new empty audit trail.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AuditEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records an event; events keep their recording order.
    pub fn record(&self, event: AuditEvent) {
        tracing::info!(
            target: "auth_audit",
            request_id = %event.request_id(),
            principal = ?event.principal(),
            outcome = %event.outcome(),
            error_kind = ?event.error_kind().map(|k| k.as_str()),
            "audit event"
        );
        self.lock().push(event);
    }

    /// Returns a snapshot of all recorded events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.lock().clone()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clears all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditOutcome;
    use crate::error::ErrorKind;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn audit_trail_starts_empty() {
        let trail = AuditTrail::new();
        assert!(trail.is_empty());
        assert_eq!(trail.len(), 0);
    }

    #[test]
    fn audit_trail_keeps_order() {
        let trail = AuditTrail::new();

        trail.record(AuditEvent::new("req-1", Some("rick"), AuditOutcome::Authenticated));
        trail.record(
            AuditEvent::new("req-2", None::<String>, AuditOutcome::Suppressed)
                .with_error_kind(ErrorKind::Infrastructure),
        );

        let events = trail.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].request_id(), "req-1");
        assert_eq!(events[1].outcome(), AuditOutcome::Suppressed);
    }

    #[test]
    fn audit_trail_can_be_cleared() {
        let trail = AuditTrail::new();
        trail.record(AuditEvent::new("req-1", None::<String>, AuditOutcome::Anonymous));

        trail.clear();

        assert!(trail.is_empty());
    }

    #[test]
    fn audit_trail_accepts_concurrent_writers() {
        let trail = Arc::new(AuditTrail::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let trail = Arc::clone(&trail);
                thread::spawn(move || {
                    trail.record(AuditEvent::new(
                        format!("req-{}", i),
                        None::<String>,
                        AuditOutcome::Anonymous,
                    ));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(trail.len(), 8);
    }
}
