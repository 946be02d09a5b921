//! View model handlers
//!
//! Each handler runs one user action against the [`AppState`] and turns the
//! outcome into a [`Notice`] for the screen. No error escapes this layer.

mod attendance;
mod auth;
mod navigation;
mod requests;

pub use attendance::handle_mark_attendance;
pub use auth::{handle_admin_login, handle_login, handle_logout};
pub use navigation::{handle_back, handle_go};
pub use requests::{handle_review, handle_submit, short_id};

/// User-visible feedback for one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Success(text) => write!(f, "[ok] {text}"),
            Notice::Info(text) => write!(f, "{text}"),
            Notice::Error(text) => write!(f, "[error] {text}"),
        }
    }
}
