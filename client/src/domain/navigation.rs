//! Navigation policy and the navigator that applies it.
//!
//! The policy is a pure function from (session, route) to a decision; the
//! [`Navigator`] resolves paths through the route table, evaluates the policy
//! synchronously before every transition, and applies redirects. There is no
//! other way to move between views, so no transition can bypass evaluation.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::routes::{RouteSpec, RouteTable, ViewName};
use crate::domain::session::{Session, SessionStore};

/// Outcome of evaluating one route transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Proceed to the requested route.
    Allow,
    /// Abandon the requested route and go to the named view instead.
    RedirectTo(ViewName),
}

/// Decide whether `session` may proceed to `route`.
///
/// Rule order is fixed: the authentication check runs before the role check.
///
/// # Examples
/// ```
/// use client::domain::{evaluate, NavigationDecision, RouteSpec, Session, ViewName};
///
/// let route = RouteSpec::public("/", ViewName::Home);
/// assert_eq!(
///     evaluate(&Session::default(), &route),
///     NavigationDecision::Allow
/// );
/// ```
pub fn evaluate(session: &Session, route: &RouteSpec) -> NavigationDecision {
    if !route.requires_auth() {
        return NavigationDecision::Allow;
    }
    if !session.is_logged_in() {
        return NavigationDecision::RedirectTo(ViewName::Login);
    }
    let roles = route.allowed_roles();
    if !roles.is_empty() {
        match session.role() {
            Some(role) if roles.contains(&role) => {}
            _ => return NavigationDecision::RedirectTo(ViewName::Unauthorized),
        }
    }
    NavigationDecision::Allow
}

/// Applies navigation decisions and tracks the current location.
pub struct Navigator {
    table: RouteTable,
    session: Arc<SessionStore>,
    current: RwLock<Location>,
}

#[derive(Debug, Clone)]
struct Location {
    path: String,
    view: ViewName,
}

impl Navigator {
    /// Build a navigator positioned on the landing page.
    pub fn new(table: RouteTable, session: Arc<SessionStore>) -> Self {
        let view = table.resolve("/").name();
        Self {
            table,
            session,
            current: RwLock::new(Location {
                path: "/".to_owned(),
                view,
            }),
        }
    }

    /// Path of the current location.
    pub fn current_path(&self) -> String {
        self.current.read().path.clone()
    }

    /// View of the current location.
    pub fn current_view(&self) -> ViewName {
        self.current.read().view
    }

    /// Attempt to move to `path`, returning the view actually arrived at.
    ///
    /// A guarded redirect to the login view records the requested path so a
    /// later successful login can resume it.
    pub fn navigate(&self, path: &str) -> ViewName {
        let route = self.table.resolve(path);
        match evaluate(&self.session.current(), route) {
            NavigationDecision::Allow => {
                let mut current = self.current.write();
                current.path = path.to_owned();
                current.view = route.name();
                route.name()
            }
            NavigationDecision::RedirectTo(ViewName::Login) => {
                debug!(requested = path, "unauthenticated; redirecting to login");
                self.session.remember_intended(path);
                self.redirect_to(ViewName::Login)
            }
            NavigationDecision::RedirectTo(view) => {
                debug!(requested = path, target = %view, "role check failed; redirecting");
                self.redirect_to(view)
            }
        }
    }

    /// Move to the login view without recording an intended route. Used by
    /// the gateway's 401 recovery, which records the current path itself.
    pub fn redirect_to_login(&self) -> ViewName {
        self.redirect_to(ViewName::Login)
    }

    fn redirect_to(&self, view: ViewName) -> ViewName {
        // Redirect targets go through the guard like any other transition;
        // both are public routes, so this terminates.
        match self.table.path_of(view) {
            Some(path) => self.navigate(path),
            None => {
                let mut current = self.current.write();
                current.path = String::new();
                current.view = ViewName::NotFound;
                ViewName::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::InMemorySessionVault;
    use crate::domain::session::AuthenticatedUser;
    use crate::models::Role;

    fn store() -> Arc<SessionStore> {
        Arc::new(SessionStore::restore(Arc::new(InMemorySessionVault::new())))
    }

    fn logged_in(role: Role) -> Arc<SessionStore> {
        let session = store();
        session.login("tok".to_owned(), AuthenticatedUser { id: 1, role });
        session
    }

    #[rstest]
    #[case("/")]
    #[case("/login")]
    #[case("/register")]
    #[case("/unauthorized")]
    #[case("/missing-entirely")]
    fn public_routes_allow_any_session_state(#[case] path: &str) {
        let table = RouteTable::standard();
        let anonymous = Session::default();
        assert_eq!(
            evaluate(&anonymous, table.resolve(path)),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn guarded_route_without_session_redirects_to_login_and_records_path() {
        let session = store();
        let navigator = Navigator::new(RouteTable::standard(), Arc::clone(&session));

        let arrived = navigator.navigate("/my-policies");

        assert_eq!(arrived, ViewName::Login);
        assert_eq!(navigator.current_path(), "/login");
        assert_eq!(session.take_intended().as_deref(), Some("/my-policies"));
    }

    #[rstest]
    #[case(Role::User, "/admin/claims", ViewName::Unauthorized)]
    #[case(Role::Admin, "/my-policies", ViewName::Unauthorized)]
    #[case(Role::User, "/my-policies", ViewName::MyPolicies)]
    #[case(Role::Admin, "/admin/claims", ViewName::AdminClaims)]
    #[case(Role::User, "/policies", ViewName::PolicyCatalog)]
    #[case(Role::Admin, "/policies", ViewName::PolicyCatalog)]
    fn role_gates_enforce_the_allowed_set(
        #[case] role: Role,
        #[case] path: &str,
        #[case] expected: ViewName,
    ) {
        let navigator = Navigator::new(RouteTable::standard(), logged_in(role));
        assert_eq!(navigator.navigate(path), expected);
    }

    #[test]
    fn restored_token_without_identity_fails_role_gates() {
        // After a restart only the token is restored; the role is unknown, so
        // role-gated views bounce to Unauthorized until the next login.
        let vault = Arc::new(InMemorySessionVault::new());
        let vault_handle: Arc<dyn crate::domain::ports::SessionVault> = vault.clone();
        let first = SessionStore::restore(vault_handle);
        first.login(
            "tok".to_owned(),
            AuthenticatedUser {
                id: 1,
                role: Role::User,
            },
        );
        drop(first);

        let restored = Arc::new(SessionStore::restore(vault));
        let navigator = Navigator::new(RouteTable::standard(), restored);
        assert_eq!(navigator.navigate("/claims"), ViewName::Unauthorized);
    }

    #[test]
    fn auth_check_runs_before_role_check() {
        // An anonymous session heading to an admin route is sent to login,
        // never to the unauthorized view.
        let session = store();
        let navigator = Navigator::new(RouteTable::standard(), Arc::clone(&session));
        assert_eq!(navigator.navigate("/admin/claims"), ViewName::Login);
        assert_eq!(session.take_intended().as_deref(), Some("/admin/claims"));
    }

    #[test]
    fn unauthorized_redirect_does_not_record_an_intended_route() {
        let session = logged_in(Role::User);
        let navigator = Navigator::new(RouteTable::standard(), Arc::clone(&session));
        navigator.navigate("/support/admin");
        assert_eq!(navigator.current_view(), ViewName::Unauthorized);
        assert_eq!(session.take_intended(), None);
    }

    #[test]
    fn unknown_paths_arrive_at_not_found() {
        let navigator = Navigator::new(RouteTable::standard(), store());
        assert_eq!(navigator.navigate("/nope"), ViewName::NotFound);
        assert_eq!(navigator.current_path(), "/nope");
    }
}
