//! Shared fixtures for unit and integration tests.
//!
//! Exposed to integration tests through the `test-support` feature, the same
//! way the crate's own `#[cfg(test)]` modules use it.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::credentials::LoginCredentials;
use crate::domain::ports::{PortalApi, PortalApiError};
use crate::models::{
    AuthResponse, Claim, ClaimStatus, ClaimStatusUpdate, NewClaim, Policy, Registration,
    RenewablePolicy, Role, SupportTicket, TicketDraft, TicketStatus, TicketUpdate, User,
    UserPolicy,
};

/// A catalogue policy with plausible values.
pub fn sample_policy(id: i64) -> Policy {
    Policy {
        id,
        name: format!("Motor Shield {id}"),
        description: "Comprehensive motor cover".to_owned(),
        premium_amount: 4_500.0,
        coverage_amount: 300_000.0,
        duration_months: 12,
        renewal_premium_rate: 1.1,
        category: Some("VEHICLE".to_owned()),
        created_at: Some("2025-01-15T09:30:00".to_owned()),
    }
}

/// A purchased policy wrapping [`sample_policy`].
pub fn sample_user_policy(id: i64) -> UserPolicy {
    UserPolicy {
        id,
        policy: sample_policy(id + 100),
        start_date: "2025-02-01".to_owned(),
        end_date: "2026-02-01".to_owned(),
        status: crate::models::PolicyStatus::Active,
        premium_paid: 4_500.0,
    }
}

/// A pending claim against [`sample_user_policy`].
pub fn sample_claim(id: i64) -> Claim {
    Claim {
        id,
        user_policy: Some(sample_user_policy(id + 10)),
        claim_date: "2025-06-10".to_owned(),
        claim_amount: 12_000.0,
        reason: "Windscreen damage".to_owned(),
        status: ClaimStatus::Pending,
        reviewer_comment: None,
        resolved_date: None,
    }
}

/// An open ticket raised by user 7.
pub fn sample_ticket(id: i64) -> SupportTicket {
    SupportTicket {
        id,
        user_id: 7,
        user_full_name: Some("Ada Lovelace".to_owned()),
        policy_id: None,
        claim_id: None,
        policy: None,
        claim: None,
        subject: "Premium query".to_owned(),
        description: "Why did my premium change?".to_owned(),
        status: TicketStatus::Open,
        response: None,
        created_at: "2025-07-01T12:00:00".to_owned(),
        resolved_at: None,
    }
}

/// A login response for a regular user.
pub fn sample_auth_response() -> AuthResponse {
    AuthResponse {
        token: "stub-token".to_owned(),
        user: User {
            id: 7,
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            role: Role::User,
        },
    }
}

/// Configurable in-process stand-in for the portal API.
///
/// Each field holds the canned result for the matching operation; operations
/// without a canned result fail with a transport error so tests notice
/// unexpected calls without panicking. Optional delays let timing tests
/// control when each fetch settles. Every call is recorded by name.
pub struct StubPortalApi {
    /// Result for `login`.
    pub login_response: Result<AuthResponse, PortalApiError>,
    /// Result for `fetch_user_policies`.
    pub user_policies: Result<Vec<UserPolicy>, PortalApiError>,
    /// Result for `fetch_user_claims`.
    pub user_claims: Result<Vec<Claim>, PortalApiError>,
    /// Result for `submit_support_ticket`.
    pub ticket_response: Result<SupportTicket, PortalApiError>,
    /// Simulated latency for `fetch_user_policies`.
    pub policies_delay: Duration,
    /// Simulated latency for `fetch_user_claims`.
    pub claims_delay: Duration,
    /// Names of the operations invoked, in order.
    pub calls: Mutex<Vec<&'static str>>,
}

impl Default for StubPortalApi {
    fn default() -> Self {
        Self {
            login_response: Ok(sample_auth_response()),
            user_policies: Ok(vec![sample_user_policy(1)]),
            user_claims: Ok(vec![sample_claim(1)]),
            ticket_response: Ok(sample_ticket(1)),
            policies_delay: Duration::ZERO,
            claims_delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl StubPortalApi {
    fn record(&self, name: &'static str) {
        self.calls.lock().push(name);
    }

    fn unstubbed<T>(&self, name: &'static str) -> Result<T, PortalApiError> {
        self.record(name);
        Err(PortalApiError::transport(format!("{name} is not stubbed")))
    }
}

#[async_trait]
impl PortalApi for StubPortalApi {
    async fn login(&self, _credentials: &LoginCredentials) -> Result<AuthResponse, PortalApiError> {
        self.record("login");
        self.login_response.clone()
    }

    async fn register(&self, _registration: &Registration) -> Result<User, PortalApiError> {
        self.unstubbed("register")
    }

    async fn fetch_policy_catalog(&self) -> Result<Vec<Policy>, PortalApiError> {
        self.unstubbed("fetch_policy_catalog")
    }

    async fn fetch_policy(&self, _policy_id: i64) -> Result<Policy, PortalApiError> {
        self.unstubbed("fetch_policy")
    }

    async fn purchase_policy(&self, _policy_id: i64) -> Result<UserPolicy, PortalApiError> {
        self.unstubbed("purchase_policy")
    }

    async fn fetch_user_policies(&self) -> Result<Vec<UserPolicy>, PortalApiError> {
        self.record("fetch_user_policies");
        if !self.policies_delay.is_zero() {
            tokio::time::sleep(self.policies_delay).await;
        }
        self.user_policies.clone()
    }

    async fn fetch_renewable_policies(&self) -> Result<Vec<RenewablePolicy>, PortalApiError> {
        self.unstubbed("fetch_renewable_policies")
    }

    async fn renew_policy(&self, _policy_id: i64) -> Result<UserPolicy, PortalApiError> {
        self.unstubbed("renew_policy")
    }

    async fn submit_claim(&self, _claim: &NewClaim) -> Result<Claim, PortalApiError> {
        self.unstubbed("submit_claim")
    }

    async fn fetch_user_claims(&self) -> Result<Vec<Claim>, PortalApiError> {
        self.record("fetch_user_claims");
        if !self.claims_delay.is_zero() {
            tokio::time::sleep(self.claims_delay).await;
        }
        self.user_claims.clone()
    }

    async fn fetch_all_claims(&self) -> Result<Vec<Claim>, PortalApiError> {
        self.unstubbed("fetch_all_claims")
    }

    async fn update_claim_status(
        &self,
        _claim_id: i64,
        _update: &ClaimStatusUpdate,
    ) -> Result<Claim, PortalApiError> {
        self.unstubbed("update_claim_status")
    }

    async fn submit_support_ticket(
        &self,
        _draft: &TicketDraft,
    ) -> Result<SupportTicket, PortalApiError> {
        self.record("submit_support_ticket");
        self.ticket_response.clone()
    }

    async fn fetch_user_tickets(&self) -> Result<Vec<SupportTicket>, PortalApiError> {
        self.unstubbed("fetch_user_tickets")
    }

    async fn fetch_all_tickets(&self) -> Result<Vec<SupportTicket>, PortalApiError> {
        self.unstubbed("fetch_all_tickets")
    }

    async fn update_ticket(
        &self,
        _ticket_id: i64,
        _update: &TicketUpdate,
    ) -> Result<SupportTicket, PortalApiError> {
        self.unstubbed("update_ticket")
    }
}
