//! Submit lifecycle for the two-field support-ticket form.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::PortalApi;
use crate::models::TicketDraft;

/// Message shown after a successful submission.
pub const TICKET_SUBMITTED_MESSAGE: &str =
    "Support ticket submitted successfully! We will get back to you shortly.";

const TICKET_FALLBACK_MESSAGE: &str = "Failed to submit support ticket. Please try again.";

/// The ticket form's editable fields and submit lifecycle flags.
pub struct SupportForm<A> {
    api: Arc<A>,
    subject: String,
    description: String,
    loading: bool,
    error: Option<String>,
    success: Option<String>,
}

impl<A: PortalApi> SupportForm<A> {
    /// An empty form.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            subject: String::new(),
            description: String::new(),
            loading: false,
            error: None,
            success: None,
        }
    }

    /// Replace the subject field.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    /// Replace the description field.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Current subject field.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Current description field.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether a submission is in flight; the view disables resubmission
    /// while this is set.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message for the last failed submission, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Message for the last successful submission, if any.
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Assemble a submission payload from the form fields and the picker's
    /// linked items.
    pub fn draft_with(&self, policy_id: Option<i64>, claim_id: Option<i64>) -> TicketDraft {
        TicketDraft {
            subject: self.subject.clone(),
            description: self.description.clone(),
            policy_id,
            claim_id,
        }
    }

    /// Clear the editable fields. The lifecycle flags are managed by
    /// [`submit`](Self::submit) alone.
    pub fn reset_fields(&mut self) {
        self.subject.clear();
        self.description.clear();
    }

    /// Submit a ticket, returning whether the portal accepted it.
    ///
    /// On success the form fields are cleared and the success message set;
    /// on failure the fields are left intact and the error message is
    /// derived from the response body (string body, then `message`, then
    /// `error`, then a generic fallback).
    pub async fn submit(&mut self, draft: &TicketDraft) -> bool {
        self.loading = true;
        self.error = None;
        self.success = None;
        let accepted = match self.api.submit_support_ticket(draft).await {
            Ok(ticket) => {
                self.success = Some(TICKET_SUBMITTED_MESSAGE.to_owned());
                self.reset_fields();
                tracing::info!(ticket_id = ticket.id, "support ticket submitted");
                true
            }
            Err(error) => {
                warn!(%error, "support ticket submission failed");
                self.error = Some(error.surface_message(TICKET_FALLBACK_MESSAGE));
                false
            }
        };
        self.loading = false;
        accepted
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::PortalApiError;
    use crate::test_support::StubPortalApi;

    fn filled_form(api: StubPortalApi) -> SupportForm<StubPortalApi> {
        let mut form = SupportForm::new(Arc::new(api));
        form.set_subject("Premium query");
        form.set_description("Why did my premium change?");
        form
    }

    #[tokio::test]
    async fn success_sets_the_message_and_clears_the_fields() {
        let mut form = filled_form(StubPortalApi::default());
        let draft = form.draft_with(Some(3), None);

        let accepted = form.submit(&draft).await;

        assert!(accepted);
        assert_eq!(form.success(), Some(TICKET_SUBMITTED_MESSAGE));
        assert_eq!(form.error(), None);
        assert_eq!(form.subject(), "");
        assert_eq!(form.description(), "");
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn failure_surfaces_the_body_message_and_keeps_the_fields() {
        let api = StubPortalApi {
            ticket_response: Err(PortalApiError::status(
                403_u16,
                r#"{ "message": "Policy not found" }"#,
            )),
            ..StubPortalApi::default()
        };
        let mut form = filled_form(api);
        let draft = form.draft_with(Some(3), None);

        let accepted = form.submit(&draft).await;

        assert!(!accepted);
        assert_eq!(form.error(), Some("Policy not found"));
        assert_eq!(form.success(), None);
        assert_eq!(form.subject(), "Premium query");
        assert_eq!(form.description(), "Why did my premium change?");
    }

    #[tokio::test]
    async fn empty_error_body_surfaces_the_generic_fallback() {
        let api = StubPortalApi {
            ticket_response: Err(PortalApiError::status(500_u16, "{}")),
            ..StubPortalApi::default()
        };
        let mut form = filled_form(api);
        let draft = form.draft_with(None, None);

        form.submit(&draft).await;

        assert_eq!(
            form.error(),
            Some("Failed to submit support ticket. Please try again.")
        );
    }

    #[tokio::test]
    async fn resubmission_clears_the_previous_outcome() {
        let api = StubPortalApi {
            ticket_response: Err(PortalApiError::status(500_u16, "{}")),
            ..StubPortalApi::default()
        };
        let mut form = filled_form(api);
        let draft = form.draft_with(None, None);
        form.submit(&draft).await;
        assert!(form.error().is_some());

        // Swap in a working API and submit again: the stale error must go.
        let mut retry = SupportForm {
            api: Arc::new(StubPortalApi::default()),
            ..form
        };
        let accepted = retry.submit(&draft).await;

        assert!(accepted);
        assert_eq!(retry.error(), None);
        assert_eq!(retry.success(), Some(TICKET_SUBMITTED_MESSAGE));
    }

    #[tokio::test]
    async fn draft_collects_fields_and_links() {
        let form = filled_form(StubPortalApi::default());
        let draft = form.draft_with(Some(5), Some(9));
        assert_eq!(draft.subject, "Premium query");
        assert_eq!(draft.description, "Why did my premium change?");
        assert_eq!(draft.policy_id, Some(5));
        assert_eq!(draft.claim_id, Some(9));
    }
}
