//! Driven port for the insurance portal's REST API.
//!
//! The domain owns the operation surface and the error contract so the view
//! services stay adapter-agnostic; the reqwest adapter in
//! [`crate::outbound::http`] owns transport details only. Mocking this trait
//! keeps service tests deterministic.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::credentials::LoginCredentials;
use crate::models::{
    AuthResponse, Claim, ClaimStatusUpdate, NewClaim, Policy, Registration, RenewablePolicy,
    SupportTicket, TicketDraft, TicketUpdate, User, UserPolicy,
};

define_port_error! {
    /// Errors surfaced while calling the portal API.
    pub enum PortalApiError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "portal transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "portal request timed out: {message}",
        /// The server rejected the request as unauthenticated (401).
        Unauthorized { body: String } =>
            "portal rejected the request as unauthenticated",
        /// The server answered with a non-success status other than 401.
        Status { status: u16, body: String } =>
            "portal returned status {status}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "portal response decode failed: {message}",
    }
}

impl PortalApiError {
    /// Derive the text shown to the user for this failure.
    ///
    /// Follows the same priority order the portal UI always used: a string
    /// response body wins, then a `message` field, then an `error` field,
    /// then the caller's fallback. Transport-level failures carry no usable
    /// body and always surface the fallback.
    pub fn surface_message(&self, fallback: &str) -> String {
        match self {
            Self::Unauthorized { body } | Self::Status { body, .. } => {
                message_from_body(body, fallback)
            }
            Self::Transport { .. } | Self::Timeout { .. } | Self::Decode { .. } => {
                fallback.to_owned()
            }
        }
    }
}

fn message_from_body(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(text)) => text,
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(serde_json::Value::as_str)
            .or_else(|| map.get("error").and_then(serde_json::Value::as_str))
            .unwrap_or(fallback)
            .to_owned(),
        Ok(_) => fallback.to_owned(),
        // Not JSON at all: a plain-text body is itself the message.
        Err(_) if !body.trim().is_empty() => body.to_owned(),
        Err(_) => fallback.to_owned(),
    }
}

/// Typed surface of the portal's REST API, one method per endpoint the
/// client uses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// Authenticate and obtain a bearer token. `POST /auth/login`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, PortalApiError>;

    /// Create a new account. `POST /auth/register`.
    async fn register(&self, registration: &Registration) -> Result<User, PortalApiError>;

    /// List the purchasable policy catalogue. `GET /policies`.
    async fn fetch_policy_catalog(&self) -> Result<Vec<Policy>, PortalApiError>;

    /// Fetch one catalogue policy. `GET /policies/{id}`.
    async fn fetch_policy(&self, policy_id: i64) -> Result<Policy, PortalApiError>;

    /// Purchase a policy for the current user.
    /// `POST /user/policy/{policyId}/purchase`.
    async fn purchase_policy(&self, policy_id: i64) -> Result<UserPolicy, PortalApiError>;

    /// List the current user's purchased policies. `GET /user/policy`.
    async fn fetch_user_policies(&self) -> Result<Vec<UserPolicy>, PortalApiError>;

    /// List the current user's renewable policies.
    /// `GET /user/policies/renewable`.
    async fn fetch_renewable_policies(&self) -> Result<Vec<RenewablePolicy>, PortalApiError>;

    /// Renew a purchased policy. `POST /policy/{policyId}/renew`.
    async fn renew_policy(&self, policy_id: i64) -> Result<UserPolicy, PortalApiError>;

    /// Lodge a new claim. `POST /claim`.
    async fn submit_claim(&self, claim: &NewClaim) -> Result<Claim, PortalApiError>;

    /// List the current user's claims. `GET /user/claimById`.
    async fn fetch_user_claims(&self) -> Result<Vec<Claim>, PortalApiError>;

    /// List every claim for admin review. `GET /user/claim`.
    async fn fetch_all_claims(&self) -> Result<Vec<Claim>, PortalApiError>;

    /// Move a claim through review. `PUT /claim/{claimId}/status`.
    async fn update_claim_status(
        &self,
        claim_id: i64,
        update: &ClaimStatusUpdate,
    ) -> Result<Claim, PortalApiError>;

    /// Raise a support ticket. `POST /support`.
    async fn submit_support_ticket(
        &self,
        draft: &TicketDraft,
    ) -> Result<SupportTicket, PortalApiError>;

    /// List the current user's tickets. `GET /support/user`.
    async fn fetch_user_tickets(&self) -> Result<Vec<SupportTicket>, PortalApiError>;

    /// List every ticket for admin triage. `GET /support`.
    async fn fetch_all_tickets(&self) -> Result<Vec<SupportTicket>, PortalApiError>;

    /// Answer a ticket and move its workflow state. `PUT /support/{ticketId}`.
    async fn update_ticket(
        &self,
        ticket_id: i64,
        update: &TicketUpdate,
    ) -> Result<SupportTicket, PortalApiError>;
}
