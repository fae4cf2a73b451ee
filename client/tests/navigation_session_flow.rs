//! End-to-end coverage of the guard, session store, and vault working
//! together the way the shell drives them.

use std::sync::Arc;

use client::domain::ports::{InMemorySessionVault, PortalApi};
use client::domain::session::AuthenticatedUser;
use client::domain::{Navigator, RouteTable, SessionStore, ViewName};
use client::models::Role;
use client::outbound::FileSessionVault;
use client::test_support::StubPortalApi;

fn fresh_navigator() -> (Arc<SessionStore>, Navigator) {
    let session = Arc::new(SessionStore::restore(Arc::new(InMemorySessionVault::new())));
    let navigator = Navigator::new(RouteTable::standard(), Arc::clone(&session));
    (session, navigator)
}

#[tokio::test]
async fn login_resumes_the_route_the_guard_interrupted() {
    let (session, navigator) = fresh_navigator();

    // Heading to a guarded view while anonymous bounces to login.
    assert_eq!(navigator.navigate("/claims"), ViewName::Login);

    // Authenticate the way the shell does: call the API, then feed the
    // session store and resume the interrupted route.
    let api = StubPortalApi::default();
    let credentials =
        client::domain::LoginCredentials::try_from_parts("ada@example.com", "secret")
            .expect("valid credentials");
    let auth = api.login(&credentials).await.expect("stub login succeeds");
    session.login(
        auth.token,
        AuthenticatedUser {
            id: auth.user.id,
            role: auth.user.role,
        },
    );

    let intended = session.take_intended().expect("guard recorded the route");
    assert_eq!(intended, "/claims");
    assert_eq!(navigator.navigate(&intended), ViewName::ClaimList);
}

#[test]
fn role_gates_hold_across_every_admin_route() {
    let (session, navigator) = fresh_navigator();
    session.login(
        "tok".to_owned(),
        AuthenticatedUser {
            id: 9,
            role: Role::User,
        },
    );

    for path in ["/admin/claims", "/support/admin"] {
        assert_eq!(
            navigator.navigate(path),
            ViewName::Unauthorized,
            "{path} must reject a regular user"
        );
    }

    // And the admin is kept out of user-only views.
    session.logout();
    session.login(
        "tok".to_owned(),
        AuthenticatedUser {
            id: 1,
            role: Role::Admin,
        },
    );
    for path in ["/my-policies", "/claims", "/renew-policy", "/support/user"] {
        assert_eq!(
            navigator.navigate(path),
            ViewName::Unauthorized,
            "{path} must reject an admin"
        );
    }
}

#[test]
fn a_session_survives_a_restart_through_the_file_vault() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("session.json");

    {
        let session = Arc::new(SessionStore::restore(Arc::new(FileSessionVault::new(
            &path,
        ))));
        session.login(
            "tok".to_owned(),
            AuthenticatedUser {
                id: 4,
                role: Role::User,
            },
        );
    }

    // A new process: the token is back, the identity is not, so public and
    // plain-auth routes work while role-gated ones bounce until re-login.
    let session = Arc::new(SessionStore::restore(Arc::new(FileSessionVault::new(
        &path,
    ))));
    assert!(session.is_logged_in());
    let navigator = Navigator::new(RouteTable::standard(), Arc::clone(&session));
    assert_eq!(navigator.navigate("/"), ViewName::Home);
    assert_eq!(navigator.navigate("/claims"), ViewName::Unauthorized);

    session.login(
        "tok2".to_owned(),
        AuthenticatedUser {
            id: 4,
            role: Role::User,
        },
    );
    assert_eq!(navigator.navigate("/claims"), ViewName::ClaimList);
}

#[test]
fn an_intended_route_survives_a_restart_too() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("session.json");

    {
        let session = Arc::new(SessionStore::restore(Arc::new(FileSessionVault::new(
            &path,
        ))));
        let navigator = Navigator::new(RouteTable::standard(), Arc::clone(&session));
        assert_eq!(navigator.navigate("/policy-renew"), ViewName::Login);
    }

    let session = SessionStore::restore(Arc::new(FileSessionVault::new(&path)));
    assert_eq!(session.take_intended().as_deref(), Some("/policy-renew"));
}
