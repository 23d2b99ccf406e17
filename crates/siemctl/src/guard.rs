//! Route guard for the command surface.
//!
//! Two states, driven solely by the session store: unauthenticated
//! invocations of protected views redirect to login, and authenticated
//! invocations of the login view redirect to the dashboard. There is no
//! third state and no expiry warning.

use siem_common::SessionStore;
use std::sync::Arc;

/// Navigable views of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Agents,
    Alerts,
    Rules,
    Cases,
}

impl Route {
    /// Every view except login requires a session.
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// Guard decision for a navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Proceed,
    RedirectToLogin,
    RedirectToDefault,
}

pub struct RouteGuard {
    session: Arc<SessionStore>,
}

impl RouteGuard {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    pub fn resolve(&self, route: Route) -> Access {
        match (self.session.is_authenticated(), route) {
            (false, route) if route.is_protected() => Access::RedirectToLogin,
            (true, Route::Login) => Access::RedirectToDefault,
            _ => Access::Proceed,
        }
    }

    /// Drop the session after the manager rejected a bearer credential.
    ///
    /// Returns whether a transition actually happened; repeated
    /// rejections transition at most once.
    pub fn force_logout(&self) -> bool {
        if self.session.is_authenticated() {
            self.session.clear();
            true
        } else {
            false
        }
    }
}
