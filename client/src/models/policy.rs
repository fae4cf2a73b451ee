//! Policy catalogue and purchased-policy models.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a purchased policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyStatus {
    /// Cover is in force.
    Active,
    /// Past its end date without renewal.
    Expired,
    /// Terminated before the end date.
    Cancelled,
}

/// Catalogue entry describing a purchasable insurance product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Stable policy identifier.
    pub id: i64,
    /// Product name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Premium for the initial term.
    pub premium_amount: f64,
    /// Maximum payout.
    pub coverage_amount: f64,
    /// Term length in months.
    pub duration_months: i32,
    /// Multiplier applied to the premium on renewal.
    pub renewal_premium_rate: f64,
    /// Product category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Creation timestamp, when the backend provides one.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A policy purchased by the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPolicy {
    /// Stable purchase identifier.
    pub id: i64,
    /// The product this purchase is for.
    pub policy: Policy,
    /// Cover start date.
    pub start_date: String,
    /// Cover end date.
    pub end_date: String,
    /// Lifecycle state.
    pub status: PolicyStatus,
    /// Premium actually paid for the current term.
    pub premium_paid: f64,
}

/// Summary row for a policy that is eligible for renewal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewablePolicy {
    /// Purchase this renewal applies to.
    pub user_policy_id: i64,
    /// Product name for display.
    pub policy_name: String,
    /// Current cover end date.
    pub end_date: String,
    /// Premium due if renewed now.
    pub renewal_rate: f64,
    /// Multiplier used to derive the renewal premium.
    pub renewal_premium_rate: f64,
}
