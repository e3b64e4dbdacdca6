//! Route Guard decision.
//!
//! The guard only checks whether a token is held. It never asks the backend
//! whether that token is still valid; a stale token surfaces when a
//! protected page's own request fails.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::catalog::{LOGIN_ROUTE, SiteRoute};
use crate::provider::AuthSnapshot;

/// What a guarded subtree should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the protected children unchanged.
    Render,
    /// Render nothing and navigate to `to`.
    Redirect { to: &'static str },
}

/// Decide for a subtree that is always protected.
#[must_use]
pub fn check(snapshot: &AuthSnapshot) -> GuardDecision {
    if snapshot.token().is_some() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect { to: LOGIN_ROUTE }
    }
}

/// Decide for an arbitrary path. Public and unknown paths always render.
#[must_use]
pub fn resolve(path: &str, snapshot: &AuthSnapshot) -> GuardDecision {
    match SiteRoute::from_path(path) {
        Some(route) if route.is_protected() => check(snapshot),
        _ => GuardDecision::Render,
    }
}
