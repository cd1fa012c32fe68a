use std::collections::BTreeMap;
use std::error::Error as StdError;

use url::Url;

use crate::error::{AuthenticationError, ConfigError, ErrorKind};
use crate::logging::AttemptLog;
use crate::profile::{
    ProviderResponse, UserDetails, AX_EMAIL, AX_FIRST_NAME, AX_LAST_NAME, SREG_EMAIL,
    SREG_FULLNAME,
};
use crate::request::AuthenticationAttempt;
use crate::resolver::IdentityResolver;
use crate::settings::{non_empty, OpenIdSettings};

use super::{AuthRequest, ProviderExtension};

/// Path the provider redirects back to, relative to `openid.server_url`.
pub const VALIDATE_PATH: &str = "/openid/validate";

/// What the assertion verifier concluded about a provider callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verification {
    /// Identifier the provider vouched for; `None` when verification failed
    /// or the user cancelled at the provider
    pub verified_id: Option<String>,
    /// Profile attributes of a positive assertion
    pub response: Option<ProviderResponse>,
    /// Provider or verifier status message, kept for logs
    pub status: String,
}

impl Verification {
    /// A positive assertion for `verified_id`.
    pub fn verified(verified_id: impl Into<String>, response: ProviderResponse) -> Self {
        Self {
            verified_id: Some(verified_id.into()),
            response: Some(response),
            status: String::new(),
        }
    }

    /// A callback that did not yield a verified identifier.
    pub fn unverified(status: impl Into<String>) -> Self {
        Self {
            verified_id: None,
            response: None,
            status: status.into(),
        }
    }
}

/// Checks signatures, nonces and discovery for a provider callback.
///
/// This is the protocol-level half of verification; [`OpenIdClient`] adds
/// extension checks and profile mapping on top.
pub trait AssertionVerifier: Send + Sync {
    /// Verifies the callback received on `receiving_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the callback cannot be checked at all (provider
    /// unreachable, tampered message). A well-formed negative answer is an
    /// `Ok` [`Verification`] without a verified identifier.
    fn verify(
        &self,
        receiving_url: &str,
        parameters: &BTreeMap<String, String>,
        endpoint: &Url,
    ) -> Result<Verification, Box<dyn StdError + Send + Sync>>;
}

/// OpenID relying party: builds sign-in requests and resolves callbacks.
///
/// The client is the identity-resolution collaborator used with
/// [`AuthAdjudicator`](crate::AuthAdjudicator) on the validation path.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use auth_adjudicator::openid::{AssertionVerifier, OpenIdClient, Verification};
/// use auth_adjudicator::{AuthAdjudicator, AuthenticationAttempt, OpenIdSettings, ProviderResponse};
/// use url::Url;
///
/// struct TrustEverything;
///
/// impl AssertionVerifier for TrustEverything {
///     fn verify(
///         &self,
///         _url: &str,
///         _params: &BTreeMap<String, String>,
///         _endpoint: &Url,
///     ) -> Result<Verification, Box<dyn std::error::Error + Send + Sync>> {
///         Ok(Verification::verified(
///             "https://id.example.com/rick",
///             ProviderResponse::new().with_sreg("fullname", "Rick Hunter"),
///         ))
///     }
/// }
///
/// let settings = OpenIdSettings {
///     server_url: Some("https://ci.example.com".to_string()),
///     provider_url: Some("https://id.example.com/op".to_string()),
///     provider_logout_url: None,
/// };
/// let client = OpenIdClient::new(&settings, TrustEverything).unwrap();
/// assert_eq!(client.return_to_url(), "https://ci.example.com/openid/validate");
///
/// let attempt = AuthenticationAttempt::anonymous("req-1")
///     .with_receiving_url("https://ci.example.com/openid/validate?openid.mode=id_res");
/// let user = AuthAdjudicator::new(client).adjudicate(&attempt).into_identity().unwrap();
/// assert_eq!(user.name, "Rick Hunter");
/// ```
#[derive(Debug)]
pub struct OpenIdClient<V> {
    verifier: V,
    endpoint: Url,
    return_to: String,
    extensions: Vec<Box<dyn ProviderExtension>>,
}

impl<V: AssertionVerifier> OpenIdClient<V> {
    /// Creates a client from `openid.*` settings.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingProperty`] when `openid.provider_url` or
    ///   `openid.server_url` is unset
    /// - [`ConfigError::InvalidValue`] when the provider URL is not a URL
    pub fn new(settings: &OpenIdSettings, verifier: V) -> Result<Self, ConfigError> {
        let provider = non_empty(&settings.provider_url)
            .ok_or(ConfigError::MissingProperty("openid.provider_url"))?;
        let endpoint = Url::parse(provider).map_err(|_| ConfigError::InvalidValue {
            property: "openid.provider_url",
            message: format!("Fail to discover OpenID endpoint: {}", provider),
        })?;
        tracing::info!(endpoint = %endpoint, "OpenID provider endpoint");

        let server_url = non_empty(&settings.server_url)
            .ok_or(ConfigError::MissingProperty("openid.server_url"))?;

        Ok(Self {
            verifier,
            endpoint,
            return_to: format!("{}{}", server_url, VALIDATE_PATH),
            extensions: Vec::new(),
        })
    }

    /// Registers an extension; extensions run in registration order.
    pub fn with_extension(mut self, extension: impl ProviderExtension + 'static) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Returns the provider endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the URL the provider redirects back to.
    pub fn return_to_url(&self) -> &str {
        &self.return_to
    }

    /// Builds the sign-in request sent to the provider.
    ///
    /// Asks AX for email, first and last name, and SREG for full name and
    /// email, all as required. Extensions then amend the request.
    pub fn authentication_request(&self) -> AuthRequest {
        let mut request = AuthRequest::new(self.endpoint.clone(), self.return_to.clone());
        request.add_ax_attribute(AX_EMAIL, "http://schema.openid.net/contact/email", true);
        request.add_ax_attribute(AX_FIRST_NAME, "http://axschema.org/namePerson/first", true);
        request.add_ax_attribute(AX_LAST_NAME, "http://axschema.org/namePerson/last", true);
        request.add_sreg_attribute(SREG_FULLNAME, true);
        request.add_sreg_attribute(SREG_EMAIL, true);

        for extension in &self.extensions {
            tracing::debug!(extension = ?extension, "calling on_request");
            extension.on_request(&mut request);
        }
        request
    }

    /// Verifies a provider callback and maps it to user details.
    ///
    /// Events are written through `log`, so they carry the attempt's
    /// request ID. Returns `Ok(None)` when the user cancelled, an extension vetoed the
    /// user, or the profile carries no name.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::VerificationFailed`] when the verifier could not check
    ///   the callback
    /// - [`ErrorKind::MalformedResponse`] when a verified assertion has no
    ///   response message
    pub fn verify(
        &self,
        log: AttemptLog<'_>,
        receiving_url: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<Option<UserDetails>, AuthenticationError> {
        let verification = self
            .verifier
            .verify(receiving_url, parameters, &self.endpoint)
            .map_err(|e| {
                AuthenticationError::new(
                    ErrorKind::VerificationFailed,
                    format!("Fail to verify OpenID request: {}", e),
                )
            })?;

        let Some(verified_id) = verification.verified_id.as_deref() else {
            log.warn(format_args!(
                "Fail to verify OpenId request: {}",
                verification.status
            ));
            return Ok(None);
        };

        let response = verification.response.as_ref().ok_or_else(|| {
            AuthenticationError::new(
                ErrorKind::MalformedResponse,
                "The OpenId response message is missing",
            )
        })?;

        // Every extension is consulted, even after a veto.
        let mut approved = true;
        for extension in &self.extensions {
            log.debug(format_args!("calling verify_response on {:?}", extension));
            approved &= extension.verify_response(response);
        }
        if !approved {
            log.info(format_args!("OpenID user {} rejected by extension", verified_id));
            return Ok(None);
        }

        Ok(UserDetails::from_response(response))
    }
}

impl<V: AssertionVerifier> IdentityResolver for OpenIdClient<V> {
    type Identity = UserDetails;

    fn resolve(
        &self,
        attempt: &AuthenticationAttempt,
    ) -> Result<Option<UserDetails>, AuthenticationError> {
        let _span = tracing::debug_span!("openid_resolve", request_id = %attempt.request_id())
            .entered();

        let context = attempt.context();
        let receiving_url = context.receiving_url.as_deref().ok_or_else(|| {
            AuthenticationError::new(
                ErrorKind::MissingCredentials,
                "OpenID callback has no receiving URL",
            )
        })?;
        self.verify(attempt.log(), receiving_url, &context.parameters)
    }
}
