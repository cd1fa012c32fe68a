//! Mapping provider profile attributes to user details.
//!
//! OpenID providers return profile data through two extensions: Simple
//! Registration (SREG) and Attribute Exchange (AX). SREG is preferred; AX
//! fills whatever SREG left empty.

use std::collections::BTreeMap;

use crate::resolver::Identity;

/// SREG attribute holding the user's full name.
pub const SREG_FULLNAME: &str = "fullname";
/// SREG attribute holding the user's email.
pub const SREG_EMAIL: &str = "email";
/// AX attribute alias for the email address.
pub const AX_EMAIL: &str = "email";
/// AX attribute alias for the first name.
pub const AX_FIRST_NAME: &str = "firstName";
/// AX attribute alias for the last name.
pub const AX_LAST_NAME: &str = "lastName";

/// Attributes returned by the provider in a positive assertion.
///
/// Each extension is `None` when the provider did not include it at all,
/// which is different from including it with no attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderResponse {
    sreg: Option<BTreeMap<String, String>>,
    ax: Option<BTreeMap<String, String>>,
}

impl ProviderResponse {
    /// Creates a response carrying neither extension.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an SREG attribute, creating the extension if needed.
    pub fn with_sreg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.sreg
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Marks the SREG extension present without attributes.
    pub fn with_empty_sreg(mut self) -> Self {
        self.sreg.get_or_insert_with(BTreeMap::new);
        self
    }

    /// Adds an AX attribute, creating the extension if needed.
    pub fn with_ax(mut self, alias: impl Into<String>, value: impl Into<String>) -> Self {
        self.ax
            .get_or_insert_with(BTreeMap::new)
            .insert(alias.into(), value.into());
        self
    }

    /// Looks up an SREG attribute.
    pub fn sreg(&self, name: &str) -> Option<&str> {
        self.sreg.as_ref()?.get(name).map(String::as_str)
    }

    /// Looks up an AX attribute.
    pub fn ax(&self, alias: &str) -> Option<&str> {
        self.ax.as_ref()?.get(alias).map(String::as_str)
    }
}

/// A user as described by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    /// Display name; never empty
    pub name: String,
    /// Email address, when the provider shared one
    pub email: Option<String>,
}

impl UserDetails {
    /// Builds user details from a provider response.
    ///
    /// Returns `None` when no non-empty name can be derived, because a user
    /// without a name cannot be signed in.
    ///
    /// # Examples
    ///
    /// ```
    /// use auth_adjudicator::{ProviderResponse, UserDetails};
    ///
    /// let response = ProviderResponse::new()
    ///     .with_ax("firstName", "Rick")
    ///     .with_ax("lastName", "Hunter")
    ///     .with_ax("email", "rick@hunter.com");
    ///
    /// let user = UserDetails::from_response(&response).unwrap();
    /// assert_eq!(user.name, "Rick Hunter");
    /// assert_eq!(user.email.as_deref(), Some("rick@hunter.com"));
    /// ```
    pub fn from_response(response: &ProviderResponse) -> Option<Self> {
        let mut name = response.sreg(SREG_FULLNAME).map(str::to_string);
        let mut email = response.sreg(SREG_EMAIL).map(str::to_string);

        if name.is_none() {
            if let (Some(first), Some(last)) =
                (response.ax(AX_FIRST_NAME), response.ax(AX_LAST_NAME))
            {
                name = Some(format!("{} {}", first, last));
            }
        }
        if email.is_none() {
            email = response.ax(AX_EMAIL).map(str::to_string);
        }

        match name {
            Some(name) if !name.is_empty() => Some(UserDetails { name, email }),
            _ => None,
        }
    }
}

impl Identity for UserDetails {
    fn subject(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_extensions_yields_no_user() {
        assert_eq!(UserDetails::from_response(&ProviderResponse::new()), None);
    }

    #[test]
    fn sreg_attributes_are_used() {
        let response = ProviderResponse::new()
            .with_sreg("fullname", "me")
            .with_sreg("email", "me@here.com");

        let user = UserDetails::from_response(&response).unwrap();
        assert_eq!(user.name, "me");
        assert_eq!(user.email.as_deref(), Some("me@here.com"));
    }

    #[test]
    fn empty_sreg_yields_no_user() {
        let response = ProviderResponse::new().with_empty_sreg();

        assert_eq!(response, ProviderResponse::new().with_empty_sreg());
        assert_ne!(response, ProviderResponse::new());
        assert_eq!(UserDetails::from_response(&response), None);
    }

    #[test]
    fn sreg_name_wins_over_ax() {
        let response = ProviderResponse::new()
            .with_sreg("fullname", "Marius")
            .with_ax("firstName", "Rick")
            .with_ax("lastName", "Hunter")
            .with_ax("email", "rick@hunter.com");

        let user = UserDetails::from_response(&response).unwrap();
        assert_eq!(user.name, "Marius");
        assert_eq!(user.email.as_deref(), Some("rick@hunter.com"));
    }

    #[test]
    fn ax_needs_both_name_parts() {
        let response = ProviderResponse::new()
            .with_ax("firstName", "Rick")
            .with_ax("email", "rick@hunter.com");

        assert_eq!(UserDetails::from_response(&response), None);
    }

    #[test]
    fn empty_fullname_is_rejected() {
        let response = ProviderResponse::new().with_sreg("fullname", "");
        assert_eq!(UserDetails::from_response(&response), None);
    }

    #[test]
    fn subject_is_the_display_name() {
        let user = UserDetails {
            name: "rick".to_string(),
            email: None,
        };
        assert_eq!(user.subject(), "rick");
    }
}
