//! Support-ticket models and ticket request payloads.

use serde::{Deserialize, Serialize};

use super::{ClaimStatus, Policy};

/// Workflow state of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    /// Awaiting a support response.
    Open,
    /// Answered; awaiting confirmation.
    Resolved,
    /// Closed out.
    Closed,
}

/// Trimmed claim summary embedded in ticket responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketClaimDetails {
    /// Claim identifier, when the backend includes it.
    #[serde(default)]
    pub id: Option<i64>,
    /// Purchase the claim belongs to.
    #[serde(default)]
    pub user_policy_id: Option<i64>,
    /// Amount claimed.
    pub claim_amount: f64,
    /// Claimant's stated reason.
    pub reason: String,
    /// Review state, when included.
    #[serde(default)]
    pub status: Option<ClaimStatus>,
}

/// A support ticket as returned by the support endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    /// Stable ticket identifier.
    pub id: i64,
    /// Account that raised the ticket.
    pub user_id: i64,
    /// Display name of the reporter, included in admin listings.
    #[serde(default)]
    pub user_full_name: Option<String>,
    /// Linked policy identifier, if the reporter attached one.
    #[serde(default)]
    pub policy_id: Option<i64>,
    /// Linked claim identifier, if the reporter attached one.
    #[serde(default)]
    pub claim_id: Option<i64>,
    /// Linked policy details, when expanded by the backend.
    #[serde(default)]
    pub policy: Option<Policy>,
    /// Linked claim details, when expanded by the backend.
    #[serde(default)]
    pub claim: Option<TicketClaimDetails>,
    /// Short summary entered by the reporter.
    pub subject: String,
    /// Full description entered by the reporter.
    pub description: String,
    /// Workflow state.
    pub status: TicketStatus,
    /// Support agent's answer, once there is one.
    #[serde(default)]
    pub response: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Resolution timestamp, if resolved.
    #[serde(default)]
    pub resolved_at: Option<String>,
}

/// Payload for raising a new ticket, optionally linked to a policy and/or a
/// claim the reporter owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    /// Short summary.
    pub subject: String,
    /// Full description.
    pub description: String,
    /// Policy to link, if any.
    pub policy_id: Option<i64>,
    /// Claim to link, if any.
    pub claim_id: Option<i64>,
}

/// Admin payload for answering a ticket and moving its workflow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    /// Support agent's answer.
    pub response: String,
    /// New workflow state.
    pub status: TicketStatus,
}
