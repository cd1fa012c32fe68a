//! Audit trail for adjudication decisions.
//!
//! Every call to [`AuthAdjudicator::adjudicate`](crate::AuthAdjudicator::adjudicate)
//! can leave one [`AuditEvent`] behind. Events hold only safe metadata:
//! request ID, the identity's subject label, the outcome and, for suppressed
//! failures, the error kind. Credentials never appear.

mod event;
mod trail;

pub use event::{AuditEvent, AuditOutcome};
pub use trail::AuditTrail;
