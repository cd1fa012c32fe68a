//! Layered configuration.
//!
//! Settings are read through the `config` crate from, in increasing
//! priority: an optional file, `AUTH_ADJUDICATOR__*` environment variables,
//! and explicit overrides. Nested keys use `__` in environment variable
//! names, so `openid.server_url` becomes
//! `AUTH_ADJUDICATOR__OPENID__SERVER_URL`.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "AUTH_ADJUDICATOR";

/// Realm name that enables OpenID sign-in.
pub const OPENID_REALM: &str = "openid";

/// Root settings document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Security realm selection
    pub security: SecuritySettings,
    /// Local user provisioning
    pub authenticator: AuthenticatorSettings,
    /// OpenID provider and server URLs
    pub openid: OpenIdSettings,
}

/// `security.*` keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    /// Name of the active realm; OpenID is active when this is `openid`
    pub realm: Option<String>,
}

/// `authenticator.*` keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthenticatorSettings {
    /// Whether users are created locally on first sign-in
    pub create_users: bool,
}

/// `openid.*` keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpenIdSettings {
    /// Public base URL of this server, used to build the return URL
    pub server_url: Option<String>,
    /// OpenID provider endpoint
    pub provider_url: Option<String>,
    /// Provider page that ends the provider-side session
    pub provider_logout_url: Option<String>,
}

/// Whether OpenID sign-in is active.
#[derive(Debug, Clone)]
pub enum Activation {
    /// Another realm (or none) is configured
    Disabled,
    /// The OpenID realm is selected and users are provisioned on first login
    Enabled(OpenIdSettings),
}

impl Activation {
    /// Returns true if OpenID sign-in is active.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Activation::Enabled(_))
    }
}

impl Settings {
    /// Loads settings from an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Source`] if the file cannot be parsed or a
    /// value has the wrong type.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Builds settings from explicit `key = value` pairs only.
    ///
    /// # Examples
    ///
    /// ```
    /// use auth_adjudicator::Settings;
    ///
    /// let settings = Settings::from_properties([
    ///     ("security.realm", "openid"),
    ///     ("authenticator.create_users", "true"),
    /// ])
    /// .unwrap();
    ///
    /// assert!(settings.activation().unwrap().is_enabled());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Source`] if a value has the wrong type.
    pub fn from_properties<'a>(
        properties: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        for (key, value) in properties {
            builder = builder.set_override(key, value)?;
        }
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Decides whether the OpenID realm is active.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UsersNotCreated`] when the OpenID realm is
    /// selected but `authenticator.create_users` is not `true`.
    pub fn activation(&self) -> Result<Activation, ConfigError> {
        let enabled = self
            .security
            .realm
            .as_deref()
            .is_some_and(|realm| realm.eq_ignore_ascii_case(OPENID_REALM));

        if !enabled {
            return Ok(Activation::Disabled);
        }
        if !self.authenticator.create_users {
            return Err(ConfigError::UsersNotCreated);
        }
        Ok(Activation::Enabled(self.openid.clone()))
    }
}

/// Returns the value if it is set and non-empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_disabled() {
        let settings = Settings::from_properties([]).unwrap();

        assert!(matches!(settings.activation(), Ok(Activation::Disabled)));
    }

    #[test]
    fn other_realm_is_disabled() {
        let settings = Settings::from_properties([("security.realm", "LDAP")]).unwrap();
        assert!(!settings.activation().unwrap().is_enabled());
    }

    #[test]
    fn realm_match_ignores_case() {
        let settings = Settings::from_properties([
            ("security.realm", "OpenID"),
            ("authenticator.create_users", "true"),
            ("openid.provider_url", "https://id.example.com/op"),
        ])
        .unwrap();

        match settings.activation().unwrap() {
            Activation::Enabled(openid) => {
                assert_eq!(
                    openid.provider_url.as_deref(),
                    Some("https://id.example.com/op")
                );
            }
            Activation::Disabled => panic!("realm should be enabled"),
        }
    }

    #[test]
    fn enabled_realm_requires_user_creation() {
        let settings = Settings::from_properties([
            ("security.realm", "openid"),
            ("authenticator.create_users", "false"),
        ])
        .unwrap();

        let err = settings.activation().unwrap_err();
        assert!(matches!(err, ConfigError::UsersNotCreated));
        assert_eq!(
            err.to_string(),
            "Property authenticator.create_users must be set to true."
        );
    }

    #[test]
    fn load_reads_environment() {
        std::env::set_var("AUTH_ADJUDICATOR__OPENID__SERVER_URL", "http://env:9000");
        std::env::set_var("AUTH_ADJUDICATOR__AUTHENTICATOR__CREATE_USERS", "true");

        let settings = Settings::load(None).unwrap();

        assert_eq!(settings.openid.server_url.as_deref(), Some("http://env:9000"));
        assert!(settings.authenticator.create_users);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.toml");
        std::fs::write(
            &path,
            r#"
[security]
realm = "openid"

[openid]
provider_url = "https://file.example.com/op"
provider_logout_url = "https://file.example.com/logout"
"#,
        )
        .unwrap();
        std::env::set_var(
            "AUTH_ADJUDICATOR__OPENID__PROVIDER_URL",
            "https://env.example.com/op",
        );

        let settings = Settings::load(Some(&path)).unwrap();

        assert_eq!(settings.security.realm.as_deref(), Some("openid"));
        assert_eq!(
            settings.openid.provider_url.as_deref(),
            Some("https://env.example.com/op")
        );
        assert_eq!(
            settings.openid.provider_logout_url.as_deref(),
            Some("https://file.example.com/logout")
        );
    }

    #[test]
    fn missing_file_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(Settings::load(Some(&path)).is_ok());
    }

    #[test]
    fn non_empty_filters_blank_values() {
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some("x".to_string())), Some("x"));
    }
}
