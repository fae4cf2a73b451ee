//! The ticket form and the linkable-items picker working together.

use std::sync::Arc;

use client::domain::{LinkableItems, SupportForm, TICKET_SUBMITTED_MESSAGE};
use client::test_support::StubPortalApi;

#[tokio::test]
async fn a_linked_ticket_carries_the_picked_items() {
    let api = Arc::new(StubPortalApi::default());

    let mut items = LinkableItems::new(Arc::clone(&api));
    items.fetch_all_user_data().await;
    let policy_id = items.user_policies().first().map(|policy| policy.id);
    items.set_link_policy(true);
    items.select_policy(policy_id);

    let mut form = SupportForm::new(Arc::clone(&api));
    form.set_subject("Premium query");
    form.set_description("Why did my premium change?");
    let draft = form.draft_with(items.selected_policy_id(), items.selected_claim_id());
    assert_eq!(draft.policy_id, policy_id);
    assert_eq!(draft.claim_id, None);

    let accepted = form.submit(&draft).await;

    assert!(accepted);
    assert_eq!(form.success(), Some(TICKET_SUBMITTED_MESSAGE));
    let calls = api.calls.lock().clone();
    assert!(calls.contains(&"fetch_user_policies"));
    assert!(calls.contains(&"fetch_user_claims"));
    assert!(calls.contains(&"submit_support_ticket"));
}

#[tokio::test]
async fn clearing_the_picker_between_submissions_unlinks_everything() {
    let api = Arc::new(StubPortalApi::default());
    let mut items = LinkableItems::new(Arc::clone(&api));
    items.fetch_all_user_data().await;
    items.set_link_policy(true);
    items.select_policy(Some(1));
    items.set_link_claim(true);
    items.select_claim(Some(1));

    items.reset();

    let form = SupportForm::new(api);
    let draft = form.draft_with(items.selected_policy_id(), items.selected_claim_id());
    assert_eq!(draft.policy_id, None);
    assert_eq!(draft.claim_id, None);
}
