//! Request adapter for mapping HTTP requests to attempts.

use std::collections::BTreeMap;

use crate::request::{AuthenticationAttempt, Credentials, RequestContext};
use crate::secret::Secret;

use super::ExtractAttempt;

/// Framework-neutral view of an incoming HTTP request.
///
/// Framework integrations fill one of these from their own request type and
/// hand it to [`validate`](super::validate).
///
/// # Examples
///
/// ```
/// use auth_adjudicator::web::{ExtractAttempt, RequestAdapter};
///
/// let mut adapter = RequestAdapter::new("req-12345", "https://ci.example.com/openid/validate");
/// adapter.set_query_string("openid.mode=id_res");
/// adapter.add_parameter("openid.mode", "id_res");
///
/// assert_eq!(
///     adapter.receiving_url(),
///     "https://ci.example.com/openid/validate?openid.mode=id_res"
/// );
///
/// let attempt = adapter.extract_attempt();
/// assert_eq!(attempt.request_id(), "req-12345");
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    request_id: String,
    /// Request URL without the query string
    request_url: String,
    query_string: Option<String>,
    parameters: BTreeMap<String, String>,
    session_token: Option<Secret<String>>,
    credentials: Option<Credentials>,
}

impl RequestAdapter {
    /// Creates an adapter for a request received on `request_url`.
    pub fn new(request_id: impl Into<String>, request_url: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            request_url: request_url.into(),
            query_string: None,
            parameters: BTreeMap::new(),
            session_token: None,
            credentials: None,
        }
    }

    /// Sets the raw query string (without the leading `?`).
    pub fn set_query_string(&mut self, query: impl Into<String>) {
        self.query_string = Some(query.into());
    }

    /// Adds a request parameter (query or form field).
    pub fn add_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(key.into(), value.into());
    }

    /// Sets the session token read from the cookie jar.
    pub fn set_session_token(&mut self, token: impl Into<String>) {
        self.session_token = Some(Secret::new(token.into()));
    }

    /// Sets login credentials posted with the request.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the request parameters.
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Full URL the request was received on.
    ///
    /// The query string is appended only when it is non-empty.
    pub fn receiving_url(&self) -> String {
        match self.query_string.as_deref() {
            Some(query) if !query.is_empty() => format!("{}?{}", self.request_url, query),
            _ => self.request_url.clone(),
        }
    }
}

impl ExtractAttempt for RequestAdapter {
    fn extract_attempt(&self) -> AuthenticationAttempt {
        let context = RequestContext {
            receiving_url: Some(self.receiving_url()),
            parameters: self.parameters.clone(),
            session_token: self.session_token.clone(),
        };

        let attempt = match &self.credentials {
            Some(credentials) => {
                AuthenticationAttempt::with_credentials(self.request_id.clone(), credentials.clone())
            }
            None => AuthenticationAttempt::anonymous(self.request_id.clone()),
        };
        attempt.with_context(context)
    }
}
