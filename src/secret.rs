use std::fmt;

/// Wrapper for credential material that must never reach a log line.
///
/// Passwords and session tokens travel inside an
/// [`AuthenticationAttempt`](crate::AuthenticationAttempt) and the attempt is
/// freely `Debug`-printed by the adjudicator's diagnostics. Wrapping them in
/// `Secret` keeps that safe: both `Debug` and `Display` print `[REDACTED]`.
///
/// # Examples
///
/// ```
/// use auth_adjudicator::Secret;
///
/// let token = Secret::new("sess-8f2a".to_string());
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// assert_eq!(token.expose_secret(), "sess-8f2a");
/// ```
// Do NOT derive Copy or Default; Clone is needed because attempts are cloned
// into per-thread requests, and it still never formats the inner value.
#[derive(Clone)]
pub struct Secret<T> {
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the wrapped value.
    ///
    /// Callers must not log or display the returned reference.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_redacted_everywhere() {
        let password = Secret::new("hunter2".to_string());

        assert_eq!(format!("{:?}", password), "[REDACTED]");
        assert_eq!(format!("{}", password), "[REDACTED]");
        assert!(!format!("{:#?}", password).contains("hunter2"));
    }

    #[test]
    fn redaction_survives_nesting() {
        let nested = Some(Secret::from("token-abc"));
        let out = format!("{:?}", nested);

        assert_eq!(out, "Some([REDACTED])");
    }

    #[test]
    fn explicit_access_returns_value() {
        let secret = Secret::new(7u32);
        assert_eq!(*secret.expose_secret(), 7);
    }
}
