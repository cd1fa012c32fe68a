use std::fmt;

use crate::profile::ProviderResponse;

use super::AuthRequest;

/// Hook for deployments that need extra request attributes or extra checks.
///
/// Both methods have permissive defaults, so an extension overrides only
/// what it needs.
///
/// # Examples
///
/// ```
/// use auth_adjudicator::openid::ProviderExtension;
/// use auth_adjudicator::ProviderResponse;
///
/// /// Only lets in users with a company address.
/// #[derive(Debug)]
/// struct CompanyDomain;
///
/// impl ProviderExtension for CompanyDomain {
///     fn verify_response(&self, response: &ProviderResponse) -> bool {
///         response
///             .sreg("email")
///             .or_else(|| response.ax("email"))
///             .is_some_and(|email| email.ends_with("@example.com"))
///     }
/// }
///
/// let ok = ProviderResponse::new().with_sreg("email", "rick@example.com");
/// assert!(CompanyDomain.verify_response(&ok));
/// ```
pub trait ProviderExtension: fmt::Debug + Send + Sync {
    /// Adds attributes or parameters to the outgoing request.
    fn on_request(&self, _request: &mut AuthRequest) {}

    /// Decides whether the verified user may sign in.
    fn verify_response(&self, _response: &ProviderResponse) -> bool {
        true
    }
}
