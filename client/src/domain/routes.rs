//! Static route table: paths, views, and the access rules attached to them.
//!
//! Routes are defined once at startup and never mutated. Access rules are
//! enforced by construction: a role-gated route is always an authenticated
//! route, so the invariant "non-empty role set implies authentication
//! required" cannot be violated by any table.

use std::fmt;

use crate::models::Role;

/// Identifier of a navigable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    /// Landing page.
    Home,
    /// Login form.
    Login,
    /// Account registration form.
    Register,
    /// Purchasable policy catalogue.
    PolicyCatalog,
    /// Support-ticket form.
    Support,
    /// The user's purchased policies.
    MyPolicies,
    /// Claim submission form.
    SubmitClaim,
    /// The user's claims.
    ClaimList,
    /// Admin claim review queue.
    AdminClaims,
    /// Policies eligible for renewal.
    PolicyRenewList,
    /// Renewal confirmation page.
    RenewPolicy,
    /// The user's support tickets.
    MyTickets,
    /// Admin ticket triage queue.
    AdminTickets,
    /// Shown when a role check fails.
    Unauthorized,
    /// Shown for unknown paths.
    NotFound,
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::PolicyCatalog => "PolicyCatalog",
            Self::Support => "Support",
            Self::MyPolicies => "MyPolicies",
            Self::SubmitClaim => "SubmitClaim",
            Self::ClaimList => "ClaimList",
            Self::AdminClaims => "AdminClaims",
            Self::PolicyRenewList => "PolicyRenewList",
            Self::RenewPolicy => "RenewPolicy",
            Self::MyTickets => "MyTickets",
            Self::AdminTickets => "AdminTickets",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "NotFound",
        };
        f.write_str(name)
    }
}

/// One immutable route table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    path: &'static str,
    name: ViewName,
    requires_auth: bool,
    allowed_roles: &'static [Role],
}

impl RouteSpec {
    /// A route anyone may reach, logged in or not.
    pub fn public(path: &'static str, name: ViewName) -> Self {
        Self {
            path,
            name,
            requires_auth: false,
            allowed_roles: &[],
        }
    }

    /// A route requiring a session but no particular role.
    pub fn authenticated(path: &'static str, name: ViewName) -> Self {
        Self {
            path,
            name,
            requires_auth: true,
            allowed_roles: &[],
        }
    }

    /// A route requiring a session whose role is in `allowed_roles`.
    /// Gating by role implies requiring authentication.
    pub fn role_gated(path: &'static str, name: ViewName, allowed_roles: &'static [Role]) -> Self {
        Self {
            path,
            name,
            requires_auth: true,
            allowed_roles,
        }
    }

    /// Path this entry matches.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// View the entry resolves to.
    pub fn name(&self) -> ViewName {
        self.name
    }

    /// Whether a session is required to proceed.
    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    /// Roles allowed through; empty means any authenticated session.
    pub fn allowed_roles(&self) -> &'static [Role] {
        self.allowed_roles
    }
}

/// The application's path → view mapping, with a catch-all for unknown paths.
pub struct RouteTable {
    routes: Vec<RouteSpec>,
    not_found: RouteSpec,
}

impl RouteTable {
    /// Build a table from explicit entries. Unknown paths resolve to
    /// `not_found`.
    pub fn new(routes: Vec<RouteSpec>, not_found: RouteSpec) -> Self {
        Self { routes, not_found }
    }

    /// The portal's standard route table.
    pub fn standard() -> Self {
        use Role::{Admin, User};
        Self::new(
            vec![
                RouteSpec::public("/", ViewName::Home),
                RouteSpec::public("/login", ViewName::Login),
                RouteSpec::public("/register", ViewName::Register),
                RouteSpec::role_gated("/policies", ViewName::PolicyCatalog, &[User, Admin]),
                RouteSpec::role_gated("/support", ViewName::Support, &[User, Admin]),
                RouteSpec::role_gated("/my-policies", ViewName::MyPolicies, &[User]),
                RouteSpec::role_gated("/submit-claim", ViewName::SubmitClaim, &[User]),
                RouteSpec::role_gated("/claims", ViewName::ClaimList, &[User]),
                RouteSpec::role_gated("/admin/claims", ViewName::AdminClaims, &[Admin]),
                RouteSpec::role_gated("/policy-renew", ViewName::PolicyRenewList, &[User, Admin]),
                RouteSpec::role_gated("/renew-policy", ViewName::RenewPolicy, &[User]),
                RouteSpec::role_gated("/support/user", ViewName::MyTickets, &[User]),
                RouteSpec::role_gated("/support/admin", ViewName::AdminTickets, &[Admin]),
                RouteSpec::public("/unauthorized", ViewName::Unauthorized),
            ],
            RouteSpec::public("/:catchAll", ViewName::NotFound),
        )
    }

    /// Resolve a path to its route entry; unknown paths resolve to the
    /// catch-all. Query strings and fragments are ignored for matching.
    pub fn resolve(&self, path: &str) -> &RouteSpec {
        let bare = path.split(['?', '#']).next().unwrap_or(path);
        self.routes
            .iter()
            .find(|route| route.path == bare)
            .unwrap_or(&self.not_found)
    }

    /// Path of the first entry resolving to `name`, if the table has one.
    pub fn path_of(&self, name: ViewName) -> Option<&'static str> {
        self.routes
            .iter()
            .find(|route| route.name == name)
            .map(|route| route.path)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/", ViewName::Home)]
    #[case("/login", ViewName::Login)]
    #[case("/admin/claims", ViewName::AdminClaims)]
    #[case("/support/user", ViewName::MyTickets)]
    #[case("/no-such-page", ViewName::NotFound)]
    #[case("/policies?sort=premium", ViewName::PolicyCatalog)]
    #[case("/claims#latest", ViewName::ClaimList)]
    fn resolves_paths_to_views(#[case] path: &str, #[case] expected: ViewName) {
        let table = RouteTable::standard();
        assert_eq!(table.resolve(path).name(), expected);
    }

    #[test]
    fn role_gated_routes_always_require_auth() {
        let table = RouteTable::standard();
        for path in ["/policies", "/my-policies", "/admin/claims", "/support/admin"] {
            let route = table.resolve(path);
            assert!(
                route.requires_auth(),
                "{path} carries roles so it must require auth"
            );
            assert!(!route.allowed_roles().is_empty());
        }
    }

    #[test]
    fn sentinel_paths_are_always_public() {
        let table = RouteTable::standard();
        assert!(!table.resolve("/login").requires_auth());
        assert!(!table.resolve("/unauthorized").requires_auth());
    }

    #[test]
    fn path_of_finds_the_login_entry() {
        let table = RouteTable::standard();
        assert_eq!(table.path_of(ViewName::Login), Some("/login"));
        assert_eq!(table.path_of(ViewName::NotFound), None);
    }
}
