use std::collections::BTreeMap;

use url::Url;

const OPENID2_NS: &str = "http://specs.openid.net/auth/2.0";
const IDENTIFIER_SELECT: &str = "http://specs.openid.net/auth/2.0/identifier_select";
const AX_NS: &str = "http://openid.net/srv/ax/1.0";
const SREG_NS: &str = "http://openid.net/extensions/sreg/1.1";

/// One Attribute Exchange attribute asked of the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRequest {
    /// Local alias, used as the key in the response
    pub alias: String,
    /// Attribute type URI, for example `http://axschema.org/namePerson/first`
    pub type_uri: String,
    /// Whether the provider is asked to treat the attribute as required
    pub required: bool,
}

/// An OpenID 2.0 `checkid_setup` request.
///
/// Built by [`OpenIdClient::authentication_request`](super::OpenIdClient::authentication_request)
/// and turned into a browser redirect by [`AuthRequest::destination_url`].
///
/// # Examples
///
/// ```
/// use auth_adjudicator::openid::AuthRequest;
/// use url::Url;
///
/// let endpoint = Url::parse("https://id.example.com/op").unwrap();
/// let mut request = AuthRequest::new(endpoint, "https://ci.example.com/openid/validate");
/// request.add_sreg_attribute("email", true);
///
/// let url = request.destination_url();
/// assert!(url.as_str().starts_with("https://id.example.com/op?"));
/// assert!(url.query_pairs().any(|(k, v)| k == "openid.sreg.required" && v == "email"));
/// ```
#[derive(Debug, Clone)]
pub struct AuthRequest {
    endpoint: Url,
    return_to: String,
    ax: Vec<AttributeRequest>,
    sreg: Vec<(String, bool)>,
    parameters: BTreeMap<String, String>,
}

impl AuthRequest {
    /// Creates a request with no extensions.
    pub fn new(endpoint: Url, return_to: impl Into<String>) -> Self {
        Self {
            endpoint,
            return_to: return_to.into(),
            ax: Vec::new(),
            sreg: Vec::new(),
            parameters: BTreeMap::new(),
        }
    }

    /// Asks for an Attribute Exchange attribute.
    pub fn add_ax_attribute(
        &mut self,
        alias: impl Into<String>,
        type_uri: impl Into<String>,
        required: bool,
    ) {
        self.ax.push(AttributeRequest {
            alias: alias.into(),
            type_uri: type_uri.into(),
            required,
        });
    }

    /// Asks for a Simple Registration attribute.
    pub fn add_sreg_attribute(&mut self, name: impl Into<String>, required: bool) {
        self.sreg.push((name.into(), required));
    }

    /// Sets an extra `openid.*` parameter; later calls overwrite earlier ones.
    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(key.into(), value.into());
    }

    /// Returns the provider endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the URL the provider sends the user back to.
    pub fn return_to(&self) -> &str {
        &self.return_to
    }

    /// Returns the requested AX attributes.
    pub fn ax_attributes(&self) -> &[AttributeRequest] {
        &self.ax
    }

    /// Returns the requested SREG attribute names with their required flag.
    pub fn sreg_attributes(&self) -> impl Iterator<Item = (&str, bool)> {
        self.sreg.iter().map(|(name, required)| (name.as_str(), *required))
    }

    /// Number of protocol extensions (AX, SREG) the request carries.
    pub fn extension_count(&self) -> usize {
        usize::from(!self.ax.is_empty()) + usize::from(!self.sreg.is_empty())
    }

    /// Encodes the request as the provider redirect URL.
    pub fn destination_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("openid.ns", OPENID2_NS)
                .append_pair("openid.mode", "checkid_setup")
                .append_pair("openid.claimed_id", IDENTIFIER_SELECT)
                .append_pair("openid.identity", IDENTIFIER_SELECT)
                .append_pair("openid.return_to", &self.return_to)
                .append_pair("openid.realm", &self.return_to);

            if !self.ax.is_empty() {
                query
                    .append_pair("openid.ns.ax", AX_NS)
                    .append_pair("openid.ax.mode", "fetch_request");
                for attr in &self.ax {
                    query.append_pair(&format!("openid.ax.type.{}", attr.alias), &attr.type_uri);
                }
                let (required, optional): (Vec<_>, Vec<_>) =
                    self.ax.iter().partition(|attr| attr.required);
                let aliases = |attrs: Vec<&AttributeRequest>| {
                    attrs
                        .iter()
                        .map(|attr| attr.alias.as_str())
                        .collect::<Vec<_>>()
                        .join(",")
                };
                if !required.is_empty() {
                    query.append_pair("openid.ax.required", &aliases(required));
                }
                if !optional.is_empty() {
                    query.append_pair("openid.ax.if_available", &aliases(optional));
                }
            }

            if !self.sreg.is_empty() {
                query.append_pair("openid.ns.sreg", SREG_NS);
                let names = |required: bool| {
                    self.sreg
                        .iter()
                        .filter(|(_, r)| *r == required)
                        .map(|(name, _)| name.as_str())
                        .collect::<Vec<_>>()
                        .join(",")
                };
                let required = names(true);
                if !required.is_empty() {
                    query.append_pair("openid.sreg.required", &required);
                }
                let optional = names(false);
                if !optional.is_empty() {
                    query.append_pair("openid.sreg.optional", &optional);
                }
            }

            for (key, value) in &self.parameters {
                query.append_pair(key, value);
            }
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AuthRequest {
        AuthRequest::new(
            Url::parse("https://id.example.com/op").unwrap(),
            "http://localhost:9000/openid/validate",
        )
    }

    fn param(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn bare_request_is_checkid_setup() {
        let url = request().destination_url();

        assert_eq!(param(&url, "openid.mode").as_deref(), Some("checkid_setup"));
        assert_eq!(
            param(&url, "openid.return_to").as_deref(),
            Some("http://localhost:9000/openid/validate")
        );
        assert!(param(&url, "openid.ns.ax").is_none());
        assert!(param(&url, "openid.ns.sreg").is_none());
    }

    #[test]
    fn ax_attributes_are_split_by_requirement() {
        let mut req = request();
        req.add_ax_attribute("email", "http://schema.openid.net/contact/email", true);
        req.add_ax_attribute("nickname", "http://axschema.org/namePerson/friendly", false);

        let url = req.destination_url();
        assert_eq!(param(&url, "openid.ax.mode").as_deref(), Some("fetch_request"));
        assert_eq!(
            param(&url, "openid.ax.type.email").as_deref(),
            Some("http://schema.openid.net/contact/email")
        );
        assert_eq!(param(&url, "openid.ax.required").as_deref(), Some("email"));
        assert_eq!(param(&url, "openid.ax.if_available").as_deref(), Some("nickname"));
        assert_eq!(req.extension_count(), 1);
    }

    #[test]
    fn extension_parameters_are_appended() {
        let mut req = request();
        req.set_parameter("openid.pape.max_auth_age", "0");

        let url = req.destination_url();
        assert_eq!(param(&url, "openid.pape.max_auth_age").as_deref(), Some("0"));
    }
}
