//! Card-to-issue field mapping
//!
//! Builds the issue-creation payload for a Trello card. The card description
//! becomes the issue body, followed by the card's workflow custom fields in a
//! fixed order; a field that is not set on the card is omitted entirely, not
//! rendered blank.

use crate::deploy::DEPLOY_NOTE_MARKER;
use crate::github::NewIssue;
use crate::trello::Card;
use std::collections::HashMap;

/// Card custom field holding the deploy note text
pub const DEPLOY_NOTE_FIELD: &str = "Deploy Note";

/// Card custom field holding the product review option
pub const PRODUCT_REVIEW_FIELD: &str = "Product Review";

/// Card custom field holding the responsible PM option
pub const PM_FIELD: &str = "PM";

/// Build the issue payload for a card.
///
/// The body sections appear blank-line separated: description first, then
/// `**Deploy Note:**`, `**Product Review:**` and `**PM:**` lines in that
/// order. The deploy-note line uses the exact marker the extractor later
/// looks for in PR bodies. The issue is assigned to the importing user and
/// the card labels are copied verbatim.
pub fn issue_payload(
    card: &Card,
    custom_fields: &HashMap<String, String>,
    current_user: &str,
) -> NewIssue {
    let mut sections = Vec::new();

    if !card.desc.trim().is_empty() {
        sections.push(card.desc.trim().to_string());
    }

    if let Some(note) = custom_fields.get(DEPLOY_NOTE_FIELD) {
        sections.push(format!("{DEPLOY_NOTE_MARKER} {note}"));
    }
    if let Some(review) = custom_fields.get(PRODUCT_REVIEW_FIELD) {
        sections.push(format!("**{PRODUCT_REVIEW_FIELD}:** {review}"));
    }
    if let Some(pm) = custom_fields.get(PM_FIELD) {
        sections.push(format!("**{PM_FIELD}:** {pm}"));
    }

    let body = if sections.is_empty() {
        None
    } else {
        Some(sections.join("\n\n"))
    };

    NewIssue {
        title: card.name.clone(),
        body,
        assignees: vec![current_user.to_string()],
        labels: card.labels.iter().map(|l| l.name.clone()).collect(),
    }
}
