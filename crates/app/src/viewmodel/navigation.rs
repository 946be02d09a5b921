//! Navigation view model
//!
//! Redirects are silent: the user just sees the screen they ended up on.

use super::Notice;
use crate::state::{AppState, NavOutcome};
use crate::views;

pub fn handle_go(state: &mut AppState, path: &str) -> Notice {
    let outcome = state.navigate(path);
    render_outcome(state, outcome, path)
}

/// Browser-style back; the previous screen goes through the guard again
pub fn handle_back(state: &mut AppState) -> Notice {
    match state.back() {
        Some(outcome) => {
            let path = state
                .current_route()
                .map(|r| r.path().to_string())
                .unwrap_or_default();
            render_outcome(state, outcome, &path)
        }
        None => Notice::Info("Nothing to go back to".into()),
    }
}

fn render_outcome(state: &AppState, outcome: NavOutcome, path: &str) -> Notice {
    match outcome {
        NavOutcome::Rendered(route) => Notice::Info(views::render(state, route)),
        NavOutcome::NotFound => Notice::Info(views::not_found(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostel_core::{HostelConfig, Role, Route};

    #[test]
    fn test_go_renders_redirect_target() {
        let mut state = AppState::new(&HostelConfig::default()).unwrap();
        let Notice::Info(screen) = handle_go(&mut state, "/complaints") else {
            panic!("expected a screen");
        };
        assert!(screen.contains("Sign in"));
        assert_eq!(state.current_route(), Some(Route::Login));
    }

    #[test]
    fn test_go_unknown_path_shows_not_found() {
        let mut state = AppState::new(&HostelConfig::default()).unwrap();
        state.login("student@hostel.com", "1234", Role::Student).unwrap();
        let Notice::Info(screen) = handle_go(&mut state, "/warden/secret") else {
            panic!("expected a screen");
        };
        assert!(screen.contains("404"));
        assert_eq!(state.current_route(), None);
    }
}
