//! The identity-resolution seam.
//!
//! The adjudicator never looks up users itself. It calls an
//! [`IdentityResolver`] and classifies whatever comes back.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::AuthenticationError;
use crate::request::AuthenticationAttempt;

/// A resolved user identity.
///
/// The crate treats identities as opaque; it only needs a label for log
/// lines and audit events.
pub trait Identity: fmt::Debug {
    /// A short, loggable label for this identity (login or display name).
    fn subject(&self) -> &str;
}

impl Identity for String {
    fn subject(&self) -> &str {
        self
    }
}

/// External capability that maps an attempt to a user identity.
///
/// Implementations return:
/// - `Ok(Some(identity))` when the attempt resolves to a user
/// - `Ok(None)` when no user matches (explicit "not found")
/// - `Err(_)` for rejected credentials or any infrastructure fault
///
/// Implementations shared between request-handling threads must be
/// `Send + Sync`.
///
/// # Examples
///
/// ```
/// use auth_adjudicator::{AuthenticationAttempt, AuthenticationError, IdentityResolver};
///
/// struct SessionTable;
///
/// impl IdentityResolver for SessionTable {
///     type Identity = String;
///
///     fn resolve(
///         &self,
///         attempt: &AuthenticationAttempt,
///     ) -> Result<Option<String>, AuthenticationError> {
///         match &attempt.context().session_token {
///             Some(token) if token.expose_secret() == "sess-1" => Ok(Some("rick".to_string())),
///             Some(_) => Err(AuthenticationError::invalid_credentials("unknown session")),
///             None => Ok(None),
///         }
///     }
/// }
///
/// let attempt = AuthenticationAttempt::anonymous("req-1").with_session_token("sess-1");
/// assert_eq!(SessionTable.resolve(&attempt).unwrap(), Some("rick".to_string()));
/// ```
pub trait IdentityResolver {
    /// The identity type this resolver produces.
    type Identity: Identity;

    /// Attempts to resolve the identity behind `attempt`.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthenticationError`] on rejected credentials or any
    /// fault reaching the identity store.
    fn resolve(
        &self,
        attempt: &AuthenticationAttempt,
    ) -> Result<Option<Self::Identity>, AuthenticationError>;
}

impl<R: IdentityResolver + ?Sized> IdentityResolver for &R {
    type Identity = R::Identity;

    fn resolve(
        &self,
        attempt: &AuthenticationAttempt,
    ) -> Result<Option<Self::Identity>, AuthenticationError> {
        (**self).resolve(attempt)
    }
}

impl<R: IdentityResolver + ?Sized> IdentityResolver for Box<R> {
    type Identity = R::Identity;

    fn resolve(
        &self,
        attempt: &AuthenticationAttempt,
    ) -> Result<Option<Self::Identity>, AuthenticationError> {
        (**self).resolve(attempt)
    }
}

impl<R: IdentityResolver + ?Sized> IdentityResolver for Arc<R> {
    type Identity = R::Identity;

    fn resolve(
        &self,
        attempt: &AuthenticationAttempt,
    ) -> Result<Option<Self::Identity>, AuthenticationError> {
        (**self).resolve(attempt)
    }
}

/// Adapts a closure into an [`IdentityResolver`].
///
/// Created by [`resolver_fn`].
pub struct FnResolver<F, I> {
    f: F,
    _identity: PhantomData<fn() -> I>,
}

impl<F, I> fmt::Debug for FnResolver<F, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}

impl<F, I> IdentityResolver for FnResolver<F, I>
where
    F: Fn(&AuthenticationAttempt) -> Result<Option<I>, AuthenticationError>,
    I: Identity,
{
    type Identity = I;

    fn resolve(&self, attempt: &AuthenticationAttempt) -> Result<Option<I>, AuthenticationError> {
        (self.f)(attempt)
    }
}

/// Builds a resolver from a closure.
///
/// # Examples
///
/// ```
/// use auth_adjudicator::{resolver_fn, AuthenticationAttempt, IdentityResolver};
///
/// let resolver = resolver_fn(|_attempt: &AuthenticationAttempt| Ok(Some("rick".to_string())));
/// let attempt = AuthenticationAttempt::anonymous("req-1");
///
/// assert_eq!(resolver.resolve(&attempt).unwrap().as_deref(), Some("rick"));
/// ```
pub fn resolver_fn<F, I>(f: F) -> FnResolver<F, I>
where
    F: Fn(&AuthenticationAttempt) -> Result<Option<I>, AuthenticationError>,
    I: Identity,
{
    FnResolver {
        f,
        _identity: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct Fixed(Option<String>);

    impl IdentityResolver for Fixed {
        type Identity = String;

        fn resolve(&self, _: &AuthenticationAttempt) -> Result<Option<String>, AuthenticationError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn smart_pointers_delegate() {
        let attempt = AuthenticationAttempt::anonymous("req-1");
        let fixed = Fixed(Some("u1".to_string()));

        assert_eq!((&fixed).resolve(&attempt).unwrap().as_deref(), Some("u1"));

        let boxed: Box<dyn IdentityResolver<Identity = String>> = Box::new(Fixed(None));
        assert_eq!(boxed.resolve(&attempt).unwrap(), None);

        let shared = Arc::new(Fixed(Some("u2".to_string())));
        assert_eq!(shared.resolve(&attempt).unwrap().as_deref(), Some("u2"));
    }

    #[test]
    fn closure_errors_pass_through() {
        let resolver = resolver_fn(|_: &AuthenticationAttempt| -> Result<Option<String>, AuthenticationError> {
            Err(AuthenticationError::infrastructure("db down"))
        });

        let err = resolver
            .resolve(&AuthenticationAttempt::anonymous("req-2"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Infrastructure);
    }

    #[test]
    fn string_subject_is_itself() {
        assert_eq!("rick".to_string().subject(), "rick");
    }
}
