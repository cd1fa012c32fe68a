use std::collections::BTreeMap;

use crate::logging::AttemptLog;
use crate::secret::Secret;

/// Login and password supplied with an attempt.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Login name as typed by the user
    pub login: String,
    /// Password, redacted in all formatted output
    pub password: Secret<String>,
}

impl Credentials {
    /// Creates credentials from a login and password.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: Secret::new(password.into()),
        }
    }
}

/// Transport-level context an identity provider may need.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Full URL the request was received on, query string included
    pub receiving_url: Option<String>,
    /// Request parameters (query and form), for example an OpenID callback
    pub parameters: BTreeMap<String, String>,
    /// Existing session token, if the client sent one
    pub session_token: Option<Secret<String>>,
}

/// An immutable authentication attempt.
///
/// An attempt may carry no credentials at all (an anonymous probe); the
/// identity provider then decides from the [`RequestContext`] alone.
///
/// # Examples
///
/// ```
/// use auth_adjudicator::AuthenticationAttempt;
///
/// let attempt = AuthenticationAttempt::anonymous("req-1")
///     .with_receiving_url("https://ci.example.com/openid/validate?openid.mode=id_res")
///     .with_parameter("openid.mode", "id_res");
///
/// assert!(attempt.credentials().is_none());
/// assert_eq!(attempt.context().parameters.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticationAttempt {
    request_id: String,
    credentials: Option<Credentials>,
    context: RequestContext,
}

impl AuthenticationAttempt {
    /// Creates an attempt without credentials.
    pub fn anonymous(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            credentials: None,
            context: RequestContext::default(),
        }
    }

    /// Creates an attempt carrying login credentials.
    pub fn with_credentials(request_id: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            request_id: request_id.into(),
            credentials: Some(credentials),
            context: RequestContext::default(),
        }
    }

    /// Replaces the request context wholesale.
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    /// Sets the URL the request was received on.
    pub fn with_receiving_url(mut self, url: impl Into<String>) -> Self {
        self.context.receiving_url = Some(url.into());
        self
    }

    /// Adds a request parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.parameters.insert(key.into(), value.into());
        self
    }

    /// Attaches an existing session token.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.context.session_token = Some(Secret::new(token.into()));
        self
    }

    /// Returns the request ID used to correlate logs and audit events.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the credentials, if any were supplied.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns the transport-level context.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Returns a logger stamped with this attempt's request ID.
    pub fn log(&self) -> AttemptLog<'_> {
        AttemptLog::new(&self.request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_attempt_is_empty() {
        let attempt = AuthenticationAttempt::anonymous("req-anon");

        assert_eq!(attempt.request_id(), "req-anon");
        assert_eq!(attempt.log().request_id(), "req-anon");
        assert!(attempt.credentials().is_none());
        assert!(attempt.context().receiving_url.is_none());
        assert!(attempt.context().session_token.is_none());
    }

    #[test]
    fn debug_output_never_shows_credentials() {
        let attempt =
            AuthenticationAttempt::with_credentials("req-1", Credentials::new("rick", "hunter2"))
                .with_session_token("sess-secret");

        let out = format!("{:?}", attempt);
        assert!(out.contains("rick"));
        assert!(!out.contains("hunter2"));
        assert!(!out.contains("sess-secret"));
    }

    #[test]
    fn builder_collects_parameters() {
        let attempt = AuthenticationAttempt::anonymous("req-2")
            .with_parameter("openid.mode", "id_res")
            .with_parameter("openid.identity", "https://id.example.com/rick");

        assert_eq!(
            attempt.context().parameters.get("openid.mode").map(String::as_str),
            Some("id_res")
        );
    }
}
