//! Sign-in and sign-out path handling.

use url::Url;

use crate::openid::{AssertionVerifier, OpenIdClient};
use crate::settings::{non_empty, OpenIdSettings};

/// Path of the local sign-in form, replaced by the provider redirect.
pub const LOGIN_PATH: &str = "/sessions/new";
/// Path of the local sign-out action.
pub const LOGOUT_PATH: &str = "/sessions/logout";

/// Sends visitors of the sign-in form to the OpenID provider instead.
#[derive(Debug)]
pub struct LoginRedirect<'a, V> {
    client: &'a OpenIdClient<V>,
}

impl<'a, V: AssertionVerifier> LoginRedirect<'a, V> {
    /// Creates the redirect for `client`.
    pub fn new(client: &'a OpenIdClient<V>) -> Self {
        Self { client }
    }

    /// The path this handler is mounted on.
    pub fn pattern(&self) -> &'static str {
        LOGIN_PATH
    }

    /// URL to redirect the browser to.
    pub fn location(&self) -> Url {
        self.client.authentication_request().destination_url()
    }
}

/// What to do with a sign-out request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutAction {
    /// Invalidate the local session, then redirect to the provider's logout
    RedirectToProvider {
        /// Provider logout page
        url: String,
    },
    /// Let the regular local sign-out run
    Continue,
}

/// Ends the provider-side session on sign-out when configured to.
#[derive(Debug, Clone)]
pub struct LogoutFilter {
    provider_logout_url: Option<String>,
}

impl LogoutFilter {
    /// Creates the filter from `openid.*` settings.
    pub fn new(settings: &OpenIdSettings) -> Self {
        Self {
            provider_logout_url: non_empty(&settings.provider_logout_url).map(str::to_string),
        }
    }

    /// The path this filter is mounted on.
    pub fn pattern(&self) -> &'static str {
        LOGOUT_PATH
    }

    /// Logs which sign-out mode is active. Call once at startup.
    pub fn init(&self) {
        match &self.provider_logout_url {
            Some(url) => tracing::info!(url = %url, "OpenID logout URL"),
            None => tracing::info!("No OpenID logout URL"),
        }
    }

    /// Decides how to handle a sign-out request.
    pub fn handle(&self) -> LogoutAction {
        match &self.provider_logout_url {
            Some(url) => LogoutAction::RedirectToProvider { url: url.clone() },
            None => LogoutAction::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openid::Verification;
    use std::collections::BTreeMap;

    struct Unused;

    impl AssertionVerifier for Unused {
        fn verify(
            &self,
            _: &str,
            _: &BTreeMap<String, String>,
            _: &Url,
        ) -> Result<Verification, Box<dyn std::error::Error + Send + Sync>> {
            Err("not called".into())
        }
    }

    fn settings(logout: Option<&str>) -> OpenIdSettings {
        OpenIdSettings {
            server_url: Some("http://localhost:9000".to_string()),
            provider_url: Some("https://id.example.com/op".to_string()),
            provider_logout_url: logout.map(str::to_string),
        }
    }

    #[test]
    fn logout_pattern() {
        assert_eq!(LogoutFilter::new(&settings(None)).pattern(), "/sessions/logout");
    }

    #[test]
    fn no_logout_url_continues() {
        let filter = LogoutFilter::new(&settings(None));
        filter.init();

        assert_eq!(filter.handle(), LogoutAction::Continue);
    }

    #[test]
    fn blank_logout_url_continues() {
        let filter = LogoutFilter::new(&settings(Some("")));
        assert_eq!(filter.handle(), LogoutAction::Continue);
    }

    #[test]
    fn logout_url_redirects_to_provider() {
        let filter = LogoutFilter::new(&settings(Some("https://www.google.com/accounts/Logout")));
        filter.init();

        assert_eq!(
            filter.handle(),
            LogoutAction::RedirectToProvider {
                url: "https://www.google.com/accounts/Logout".to_string()
            }
        );
    }

    #[test]
    fn login_redirects_to_provider() {
        let client = OpenIdClient::new(&settings(None), Unused).unwrap();
        let login = LoginRedirect::new(&client);

        assert_eq!(login.pattern(), "/sessions/new");
        let location = login.location();
        assert_eq!(location.host_str(), Some("id.example.com"));
        assert!(location
            .query_pairs()
            .any(|(k, v)| k == "openid.return_to" && v == "http://localhost:9000/openid/validate"));
    }
}
