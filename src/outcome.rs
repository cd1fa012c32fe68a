/// The outcome of adjudicating an authentication attempt.
///
/// This is always exactly one of two variants; there is no error variant.
/// Failures raised while resolving the identity collapse into
/// [`AuthenticationResult::Anonymous`].
///
/// # Examples
///
/// ```
/// use auth_adjudicator::AuthenticationResult;
///
/// let result = AuthenticationResult::Authenticated("rick".to_string());
/// assert!(result.is_authenticated());
/// assert_eq!(result.identity().map(String::as_str), Some("rick"));
///
/// let anonymous = AuthenticationResult::<String>::Anonymous;
/// assert_eq!(anonymous.into_identity(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationResult<I> {
    /// The resolver produced this identity
    Authenticated(I),
    /// No identity: not found, rejected, or the resolver failed
    Anonymous,
}

impl<I> AuthenticationResult<I> {
    /// Returns `true` for [`AuthenticationResult::Authenticated`].
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthenticationResult::Authenticated(_))
    }

    /// Returns `true` for [`AuthenticationResult::Anonymous`].
    pub fn is_anonymous(&self) -> bool {
        matches!(self, AuthenticationResult::Anonymous)
    }

    /// Borrows the identity if authenticated.
    pub fn identity(&self) -> Option<&I> {
        match self {
            AuthenticationResult::Authenticated(identity) => Some(identity),
            AuthenticationResult::Anonymous => None,
        }
    }

    /// Consumes the result, returning the identity if authenticated.
    pub fn into_identity(self) -> Option<I> {
        match self {
            AuthenticationResult::Authenticated(identity) => Some(identity),
            AuthenticationResult::Anonymous => None,
        }
    }

    /// Maps the identity, leaving `Anonymous` untouched.
    pub fn map<J>(self, f: impl FnOnce(I) -> J) -> AuthenticationResult<J> {
        match self {
            AuthenticationResult::Authenticated(identity) => {
                AuthenticationResult::Authenticated(f(identity))
            }
            AuthenticationResult::Anonymous => AuthenticationResult::Anonymous,
        }
    }
}

impl<I> From<Option<I>> for AuthenticationResult<I> {
    fn from(identity: Option<I>) -> Self {
        match identity {
            Some(identity) => AuthenticationResult::Authenticated(identity),
            None => AuthenticationResult::Anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_converts_to_result() {
        assert_eq!(
            AuthenticationResult::from(Some(3)),
            AuthenticationResult::Authenticated(3)
        );
        assert_eq!(
            AuthenticationResult::<i32>::from(None),
            AuthenticationResult::Anonymous
        );
    }

    #[test]
    fn map_preserves_anonymous() {
        let anonymous = AuthenticationResult::<u32>::Anonymous;
        assert!(anonymous.map(|n| n + 1).is_anonymous());

        let authed = AuthenticationResult::Authenticated(1u32);
        assert_eq!(authed.map(|n| n + 1).into_identity(), Some(2));
    }
}
