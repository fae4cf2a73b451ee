//! State for linking a support ticket to one of the user's policies or
//! claims.
//!
//! Backs the ticket form's "link a policy / link a claim" pickers: the two
//! collections load together when the form opens, and the selections follow
//! the link toggles. Loading and failure are tracked as plain flags the view
//! can render.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::PortalApi;
use crate::models::{Claim, UserPolicy};

/// Picker state for the ticket form, plus the collections it picks from.
pub struct LinkableItems<A> {
    api: Arc<A>,
    link_policy: bool,
    link_claim: bool,
    selected_policy_id: Option<i64>,
    selected_claim_id: Option<i64>,
    user_policies: Vec<UserPolicy>,
    user_claims: Vec<Claim>,
    loading: bool,
    fetch_failed: bool,
}

impl<A: PortalApi> LinkableItems<A> {
    /// Fresh picker state. Starts in the loading state; call
    /// [`fetch_all_user_data`](Self::fetch_all_user_data) once the owning
    /// view appears.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            link_policy: false,
            link_claim: false,
            selected_policy_id: None,
            selected_claim_id: None,
            user_policies: Vec::new(),
            user_claims: Vec::new(),
            loading: true,
            fetch_failed: false,
        }
    }

    /// Load the user's policies and claims together.
    ///
    /// The two fetches run concurrently and both must settle (success or
    /// failure) before `is_loading` flips false; the slower fetch is never
    /// abandoned. On any failure both collections keep their previous
    /// contents and only [`fetch_failed`](Self::fetch_failed) is raised; the
    /// failure detail goes to the log, not the view state.
    pub async fn fetch_all_user_data(&mut self) {
        self.loading = true;
        self.fetch_failed = false;
        let (policies, claims) =
            tokio::join!(self.api.fetch_user_policies(), self.api.fetch_user_claims());
        match (policies, claims) {
            (Ok(policies), Ok(claims)) => {
                self.user_policies = policies;
                self.user_claims = claims;
            }
            (policies, claims) => {
                for error in [policies.err(), claims.err()].into_iter().flatten() {
                    warn!(%error, "failed to load linkable items");
                }
                self.fetch_failed = true;
            }
        }
        self.loading = false;
    }

    /// Toggle the policy link. Unlinking clears the policy selection.
    pub fn set_link_policy(&mut self, linked: bool) {
        self.link_policy = linked;
        if !linked {
            self.selected_policy_id = None;
        }
    }

    /// Toggle the claim link. Unlinking clears the claim selection.
    pub fn set_link_claim(&mut self, linked: bool) {
        self.link_claim = linked;
        if !linked {
            self.selected_claim_id = None;
        }
    }

    /// Pick a policy from the loaded collection.
    pub fn select_policy(&mut self, policy_id: Option<i64>) {
        self.selected_policy_id = policy_id;
    }

    /// Pick a claim from the loaded collection.
    pub fn select_claim(&mut self, claim_id: Option<i64>) {
        self.selected_claim_id = claim_id;
    }

    /// Clear the link toggles and selections. The loaded collections and the
    /// loading/failure flags are untouched. Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.link_policy = false;
        self.link_claim = false;
        self.selected_policy_id = None;
        self.selected_claim_id = None;
    }

    /// Whether the policy link toggle is on.
    pub fn link_policy(&self) -> bool {
        self.link_policy
    }

    /// Whether the claim link toggle is on.
    pub fn link_claim(&self) -> bool {
        self.link_claim
    }

    /// The picked policy, if the toggle is on and one was picked.
    pub fn selected_policy_id(&self) -> Option<i64> {
        self.selected_policy_id
    }

    /// The picked claim, if the toggle is on and one was picked.
    pub fn selected_claim_id(&self) -> Option<i64> {
        self.selected_claim_id
    }

    /// Policies available to link.
    pub fn user_policies(&self) -> &[UserPolicy] {
        &self.user_policies
    }

    /// Claims available to link.
    pub fn user_claims(&self) -> &[Claim] {
        &self.user_claims
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the last load failed. The collections then still hold their
    /// previous contents.
    pub fn fetch_failed(&self) -> bool {
        self.fetch_failed
    }
}
