//! Reqwest-backed portal API adapter.
//!
//! This adapter owns transport details only: bearer-token injection, timeout
//! and HTTP error mapping, JSON decoding, and the automatic recovery that a
//! 401 triggers. Recovery runs logout first, then records where the user was,
//! then redirects to the login view; the session store's single-shot
//! `invalidate` gate ensures concurrent failing requests produce one logout
//! and one redirect, not a storm.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::credentials::LoginCredentials;
use crate::domain::navigation::Navigator;
use crate::domain::ports::{PortalApi, PortalApiError};
use crate::domain::routes::ViewName;
use crate::domain::session::SessionStore;
use crate::domain::trace::TraceId;
use crate::models::{
    AuthResponse, Claim, ClaimStatusUpdate, NewClaim, Policy, Registration, RenewablePolicy,
    SupportTicket, TicketDraft, TicketUpdate, User, UserPolicy,
};

/// Portal API adapter performing HTTP requests against one base endpoint.
pub struct HttpPortalApi {
    client: Client,
    base_url: Url,
    session: Arc<SessionStore>,
    navigator: Arc<Navigator>,
}

impl HttpPortalApi {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// base URL cannot carry path segments.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        session: Arc<SessionStore>,
        navigator: Arc<Navigator>,
    ) -> Result<Self, PortalApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| PortalApiError::transport(error.to_string()))?;
        Ok(Self {
            client,
            base_url: normalize_base(base_url)?,
            session,
            navigator,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, PortalApiError> {
        self.base_url
            .join(path)
            .map_err(|error| PortalApiError::transport(format!("invalid endpoint {path}: {error}")))
    }

    /// Send a prepared request with the session's bearer token attached, map
    /// the response, and run 401 recovery when needed.
    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, PortalApiError> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        debug!(trace_id = ?TraceId::current(), path, "portal request");

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if status == StatusCode::UNAUTHORIZED {
            warn!(trace_id = ?TraceId::current(), path, "portal rejected request as unauthenticated");
            if self.recover_unauthorized() {
                debug!("session invalidated; redirected to login");
            }
            return Err(PortalApiError::unauthorized(body));
        }
        if !status.is_success() {
            warn!(
                trace_id = ?TraceId::current(),
                path,
                status = status.as_u16(),
                body = %body_preview(&body),
                "portal request failed"
            );
            return Err(PortalApiError::status(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|error| {
            PortalApiError::decode(format!("invalid portal JSON payload: {error}"))
        })
    }

    /// Clear the session and send the user to login, at most once.
    ///
    /// Returns whether this call won the gate and performed the redirect. The
    /// current path is recorded as the intended route unless the user is
    /// already on the login view, and a 401 with no session held (for
    /// example a failed login attempt) surfaces as a plain error with no
    /// redirect at all.
    fn recover_unauthorized(&self) -> bool {
        if !self.session.invalidate() {
            return false;
        }
        if self.navigator.current_view() != ViewName::Login {
            self.session.remember_intended(&self.navigator.current_path());
        }
        self.navigator.redirect_to_login();
        true
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PortalApiError> {
        let url = self.endpoint(path)?;
        self.execute(path, self.client.get(url)).await
    }

    async fn post_json<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PortalApiError> {
        let url = self.endpoint(path)?;
        self.execute(path, self.client.post(url).json(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, PortalApiError> {
        let url = self.endpoint(path)?;
        self.execute(path, self.client.post(url)).await
    }

    async fn put_json<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PortalApiError> {
        let url = self.endpoint(path)?;
        self.execute(path, self.client.put(url).json(body)).await
    }
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, PortalApiError> {
        let payload = json!({
            "email": credentials.email(),
            "password": credentials.password(),
        });
        self.post_json("auth/login", &payload).await
    }

    async fn register(&self, registration: &Registration) -> Result<User, PortalApiError> {
        self.post_json("auth/register", registration).await
    }

    async fn fetch_policy_catalog(&self) -> Result<Vec<Policy>, PortalApiError> {
        self.get_json("policies").await
    }

    async fn fetch_policy(&self, policy_id: i64) -> Result<Policy, PortalApiError> {
        self.get_json(&format!("policies/{policy_id}")).await
    }

    async fn purchase_policy(&self, policy_id: i64) -> Result<UserPolicy, PortalApiError> {
        self.post_empty(&format!("user/policy/{policy_id}/purchase"))
            .await
    }

    async fn fetch_user_policies(&self) -> Result<Vec<UserPolicy>, PortalApiError> {
        self.get_json("user/policy").await
    }

    async fn fetch_renewable_policies(&self) -> Result<Vec<RenewablePolicy>, PortalApiError> {
        self.get_json("user/policies/renewable").await
    }

    async fn renew_policy(&self, policy_id: i64) -> Result<UserPolicy, PortalApiError> {
        self.post_empty(&format!("policy/{policy_id}/renew")).await
    }

    async fn submit_claim(&self, claim: &NewClaim) -> Result<Claim, PortalApiError> {
        self.post_json("claim", claim).await
    }

    async fn fetch_user_claims(&self) -> Result<Vec<Claim>, PortalApiError> {
        self.get_json("user/claimById").await
    }

    async fn fetch_all_claims(&self) -> Result<Vec<Claim>, PortalApiError> {
        self.get_json("user/claim").await
    }

    async fn update_claim_status(
        &self,
        claim_id: i64,
        update: &ClaimStatusUpdate,
    ) -> Result<Claim, PortalApiError> {
        self.put_json(&format!("claim/{claim_id}/status"), update)
            .await
    }

    async fn submit_support_ticket(
        &self,
        draft: &TicketDraft,
    ) -> Result<SupportTicket, PortalApiError> {
        self.post_json("support", draft).await
    }

    async fn fetch_user_tickets(&self) -> Result<Vec<SupportTicket>, PortalApiError> {
        self.get_json("support/user").await
    }

    async fn fetch_all_tickets(&self) -> Result<Vec<SupportTicket>, PortalApiError> {
        self.get_json("support").await
    }

    async fn update_ticket(
        &self,
        ticket_id: i64,
        update: &TicketUpdate,
    ) -> Result<SupportTicket, PortalApiError> {
        self.put_json(&format!("support/{ticket_id}"), update).await
    }
}

/// Ensure the base URL ends with a slash so endpoint paths append rather
/// than replace its final segment.
fn normalize_base(mut base_url: Url) -> Result<Url, PortalApiError> {
    {
        let mut segments = base_url
            .path_segments_mut()
            .map_err(|()| PortalApiError::transport("base URL cannot carry endpoint paths"))?;
        segments.pop_if_empty().push("");
    }
    Ok(base_url)
}

fn map_transport_error(error: reqwest::Error) -> PortalApiError {
    if error.is_timeout() {
        PortalApiError::timeout(error.to_string())
    } else {
        PortalApiError::transport(error.to_string())
    }
}

fn body_preview(body: &str) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the non-network gateway helpers and the 401
    //! recovery gate.
    use std::thread;

    use rstest::rstest;

    use super::*;
    use crate::domain::ports::InMemorySessionVault;
    use crate::domain::routes::RouteTable;
    use crate::domain::session::AuthenticatedUser;
    use crate::models::Role;

    fn gateway_on(path: &str, logged_in: bool) -> (HttpPortalApi, Arc<SessionStore>, Arc<Navigator>) {
        let session = Arc::new(SessionStore::restore(Arc::new(InMemorySessionVault::new())));
        if logged_in {
            session.login(
                "tok".to_owned(),
                AuthenticatedUser {
                    id: 1,
                    role: Role::User,
                },
            );
        }
        let navigator = Arc::new(Navigator::new(
            RouteTable::standard(),
            Arc::clone(&session),
        ));
        navigator.navigate(path);
        let api = HttpPortalApi::new(
            Url::parse("http://localhost:8081").expect("static URL"),
            Duration::from_secs(5),
            Arc::clone(&session),
            Arc::clone(&navigator),
        )
        .expect("client builds");
        (api, session, navigator)
    }

    #[rstest]
    #[case("http://localhost:8081", "auth/login", "http://localhost:8081/auth/login")]
    #[case("http://localhost:8081/", "user/policy", "http://localhost:8081/user/policy")]
    #[case("https://portal.example/api", "policies", "https://portal.example/api/policies")]
    #[case(
        "https://portal.example/api/",
        "user/claimById",
        "https://portal.example/api/user/claimById"
    )]
    fn endpoints_append_to_the_base_path(
        #[case] base: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        let base_url = normalize_base(Url::parse(base).expect("valid base")).expect("normalizes");
        assert_eq!(base_url.join(path).expect("joins").as_str(), expected);
    }

    #[test]
    fn recovery_logs_out_records_the_path_and_redirects() {
        let (api, session, navigator) = gateway_on("/my-policies", true);

        assert!(api.recover_unauthorized());

        assert!(!session.is_logged_in());
        assert_eq!(navigator.current_view(), ViewName::Login);
        assert_eq!(session.take_intended().as_deref(), Some("/my-policies"));
    }

    #[test]
    fn recovery_runs_at_most_once() {
        let (api, session, navigator) = gateway_on("/claims", true);

        assert!(api.recover_unauthorized());
        assert!(!api.recover_unauthorized());

        assert_eq!(navigator.current_view(), ViewName::Login);
        // The second call must not re-record an intended route either.
        assert_eq!(session.take_intended().as_deref(), Some("/claims"));
        assert_eq!(session.take_intended(), None);
    }

    #[test]
    fn concurrent_failures_produce_exactly_one_recovery() {
        let (api, _session, navigator) = gateway_on("/policies", true);
        let api = Arc::new(api);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let api = Arc::clone(&api);
                thread::spawn(move || api.recover_unauthorized())
            })
            .collect();
        let recoveries = handles
            .into_iter()
            .map(|handle| handle.join().expect("thread completes"))
            .filter(|recovered| *recovered)
            .count();

        assert_eq!(recoveries, 1);
        assert_eq!(navigator.current_view(), ViewName::Login);
    }

    #[test]
    fn a_401_with_no_session_does_not_redirect() {
        let (api, _session, navigator) = gateway_on("/login", false);

        assert!(!api.recover_unauthorized());

        assert_eq!(navigator.current_view(), ViewName::Login);
    }

    #[test]
    fn recovery_from_the_login_view_records_no_intended_route() {
        let (api, session, navigator) = gateway_on("/", true);
        navigator.navigate("/login");

        assert!(api.recover_unauthorized());

        assert_eq!(session.take_intended(), None);
    }

    #[test]
    fn body_preview_compacts_and_truncates() {
        let long = "word ".repeat(100);
        let preview = body_preview(&long);
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 163);

        assert_eq!(body_preview("{\n  \"a\": 1\n}"), "{ \"a\": 1 }");
    }
}
