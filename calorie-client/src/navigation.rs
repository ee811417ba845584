//! Views and the access guards in front of them.

use std::cell::Cell;
use std::fmt;

use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    Register,
    Dashboard,
    Calories,
}

impl View {
    pub fn path(self) -> &'static str {
        match self {
            View::Home => "/",
            View::Login => "/login",
            View::Register => "/register",
            View::Dashboard => "/dashboard",
            View::Calories => "/calories",
        }
    }

    /// Sign-in and sign-up views. A 401 never redirects away from these.
    pub fn is_auth_view(self) -> bool {
        matches!(self, View::Login | View::Register)
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, View::Dashboard | View::Calories)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Tracks the view currently shown.
#[derive(Debug)]
pub struct Router {
    current: Cell<View>,
}

impl Router {
    pub fn new(start: View) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    pub fn current(&self) -> View {
        self.current.get()
    }

    pub fn navigate(&self, view: View) {
        let from = self.current.replace(view);
        if from != view {
            tracing::debug!(from = %from, to = %view, "Navigating");
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(View::Home)
    }
}

/// Send signed-out users to the login view.
///
/// Returns whether the protected view may render. `false` means the
/// caller must render nothing.
pub fn require_auth(router: &Router, session: &SessionState) -> bool {
    if session.is_authenticated() {
        return true;
    }
    tracing::debug!(redirect_to = %View::Login, "Not authenticated, redirecting");
    router.navigate(View::Login);
    false
}

/// Send signed-in users straight to the dashboard.
pub fn redirect_if_authenticated(router: &Router, session: &SessionState) -> bool {
    if session.is_authenticated() {
        router.navigate(View::Dashboard);
        return true;
    }
    false
}

/// Log out and show the login view.
pub fn logout(router: &Router, session: &mut SessionState) {
    session.logout();
    router.navigate(View::Login);
}
