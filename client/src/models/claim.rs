//! Claim models and claim-related request payloads.

use serde::{Deserialize, Serialize};

use super::UserPolicy;

/// Review state of a submitted claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClaimStatus {
    /// Awaiting review.
    Pending,
    /// Approved for payout.
    Approved,
    /// Rejected by the reviewer.
    Rejected,
}

/// A claim raised against a purchased policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Stable claim identifier.
    pub id: i64,
    /// The purchase the claim was raised against. Absent in trimmed
    /// responses.
    #[serde(default)]
    pub user_policy: Option<UserPolicy>,
    /// Date the claim was lodged.
    pub claim_date: String,
    /// Amount claimed.
    pub claim_amount: f64,
    /// Claimant's stated reason.
    pub reason: String,
    /// Review state.
    pub status: ClaimStatus,
    /// Reviewer's note, present once reviewed.
    #[serde(default)]
    pub reviewer_comment: Option<String>,
    /// Date the claim was resolved, if it has been.
    #[serde(default)]
    pub resolved_date: Option<String>,
}

/// Payload for lodging a new claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    /// Purchase the claim is raised against.
    pub user_policy_id: i64,
    /// Amount claimed.
    pub claim_amount: f64,
    /// Why the claim is being made.
    pub reason: String,
}

/// Admin payload for moving a claim through review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimStatusUpdate {
    /// New review state.
    pub status: ClaimStatus,
    /// Note recorded by the reviewer.
    pub reviewer_comment: String,
}
