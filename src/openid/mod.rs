//! OpenID 2.0 relying-party support.
//!
//! This module supplies the identity-resolution collaborator for OpenID
//! sign-in:
//! - [`AuthRequest`] builds the redirect to the provider
//! - [`OpenIdClient`] verifies the provider's callback and maps the profile
//! - [`ProviderExtension`] lets deployments amend requests and veto users
//!
//! Cryptographic verification of the assertion (association handling,
//! nonce checks, discovery) is delegated to an [`AssertionVerifier`].

mod client;
mod extension;
mod request;

pub use client::{AssertionVerifier, OpenIdClient, Verification, VALIDATE_PATH};
pub use extension::ProviderExtension;
pub use request::{AttributeRequest, AuthRequest};
