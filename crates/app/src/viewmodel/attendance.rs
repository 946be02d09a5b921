//! Attendance view model

use hostel_core::{Error, Route};

use super::Notice;
use crate::state::AppState;

/// "Mark present" button on the attendance screen
pub fn handle_mark_attendance(state: &mut AppState) -> Notice {
    if state.current_route() != Some(Route::Attendance) {
        return Notice::Error("Open the attendance screen first".into());
    }

    match state.mark_attendance() {
        Ok(Some(record)) => Notice::Success(format!(
            "Attendance marked! Your presence has been recorded for {}.",
            record.date
        )),
        Ok(None) => Notice::Info("Already marked for today".into()),
        Err(Error::NotAuthenticated) => Notice::Error("Sign in first".into()),
        Err(e) => Notice::Error(e.to_string()),
    }
}
