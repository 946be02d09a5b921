//! Complaint and leave request view model

use hostel_core::{Error, RequestDraft, RequestKind, RequestStatus};

use super::Notice;
use crate::state::AppState;

/// New complaint / leave application form submit
pub fn handle_submit(state: &mut AppState, draft: RequestDraft) -> Notice {
    match state.submit(draft) {
        Ok(record) => {
            let reviewer = match record.kind() {
                RequestKind::Complaint => "The hostel admin will review your complaint shortly.",
                RequestKind::Leave => "Your request will be reviewed by the warden.",
            };
            Notice::Success(format!(
                "{} submitted ({}). {}",
                capitalize(record.kind().label()),
                short_id(&record.id),
                reviewer
            ))
        }
        Err(Error::NotAuthenticated) => Notice::Error("Sign in first".into()),
        Err(e) => Notice::Error(e.to_string()),
    }
}

/// Reviewer action from a complaints or leave management screen.
///
/// Reachability is decided by the route guard: the action is only offered
/// while a review screen is showing.
pub fn handle_review(
    state: &mut AppState,
    id_prefix: &str,
    status: RequestStatus,
    note: Option<&str>,
) -> Notice {
    if !state.on_review_screen() {
        return Notice::Error("Open a complaints or leave management screen first".into());
    }

    match state.review(id_prefix, status, note) {
        Ok(record) => Notice::Success(format!(
            "{} {} marked as {}",
            capitalize(record.kind().label()),
            short_id(&record.id),
            record.status
        )),
        Err(e @ Error::InvalidTransition { .. }) => Notice::Error(e.to_string()),
        Err(e @ Error::NotFound(_)) => Notice::Error(e.to_string()),
        Err(e @ Error::InvalidField { .. }) => Notice::Error(e.to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "Review failed");
            Notice::Error(e.to_string())
        }
    }
}

pub fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
