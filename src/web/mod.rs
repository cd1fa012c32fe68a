//! Web framework integration surface.
//!
//! This module sits between an HTTP framework and the adjudicator. It holds
//! no framework code; integrations implement or fill its types.
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: integrations build a [`RequestAdapter`]
//!    or implement [`ExtractAttempt`] for their own request type.
//!
//! 2. **No Error Branch**: [`validate`] always ends in
//!    [`NextStep::RedirectBackOrDefault`]. A failed sign-in leaves the
//!    visitor anonymous.
//!
//! 3. **Explicit Context**: no global state. The adjudicator, client and
//!    filters are values passed to whoever handles the route.
//!
//! # Routes
//!
//! | Path | Handler |
//! |------|---------|
//! | [`LOGIN_PATH`] | [`LoginRedirect`] sends the browser to the provider |
//! | [`VALIDATE_PATH`](crate::openid::VALIDATE_PATH) | [`validate`] |
//! | [`LOGOUT_PATH`] | [`LogoutFilter`] |

mod adapter;
mod extract;
mod filters;
mod middleware;

pub use adapter::RequestAdapter;
pub use extract::ExtractAttempt;
pub use filters::{LoginRedirect, LogoutAction, LogoutFilter, LOGIN_PATH, LOGOUT_PATH};
pub use middleware::{validate, NextStep, Validation};
