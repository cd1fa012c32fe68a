use std::fmt;

use crate::error::AuthenticationError;

/// A logger bound to a single authentication attempt.
///
/// `AttemptLog` is obtained from
/// [`AuthenticationAttempt::log`](crate::AuthenticationAttempt::log) and
/// cannot outlive it. Every event carries the attempt's `request_id` field.
///
/// Credentials inside the attempt are wrapped in [`Secret`](crate::Secret),
/// so formatting an attempt into a message is safe.
#[derive(Debug, Clone, Copy)]
pub struct AttemptLog<'a> {
    request_id: &'a str,
}

impl<'a> AttemptLog<'a> {
    pub(crate) fn new(request_id: &'a str) -> Self {
        Self { request_id }
    }

    /// Returns the request ID associated with this logger.
    pub fn request_id(&self) -> &str {
        self.request_id
    }

    /// Logs an info-level message with request ID.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(request_id = %self.request_id, "{}", args);
    }

    /// Logs a warning-level message with request ID.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(request_id = %self.request_id, "{}", args);
    }

    /// Logs a debug-level message with request ID.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(request_id = %self.request_id, "{}", args);
    }

    /// Logs a resolver failure that is being converted to an anonymous result.
    ///
    /// Emitted at warn level with `kind` as a structured field so suppressed
    /// infrastructure faults can be told apart from rejected credentials.
    pub fn suppressed(&self, err: &AuthenticationError) {
        tracing::warn!(
            request_id = %self.request_id,
            kind = err.kind.as_str(),
            "authentication failure suppressed, continuing as anonymous: {}",
            err.message
        );
    }
}
