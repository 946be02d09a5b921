//! Authentication view model

use hostel_core::{Error, Role};

use super::Notice;
use crate::state::AppState;

/// Login form submit
pub fn handle_login(state: &mut AppState, email: &str, password: &str, role: Role) -> Notice {
    match state.login(email, password, role) {
        Ok(identity) => Notice::Success(format!(
            "Welcome, {} ({})",
            identity.name,
            identity.role.display_name()
        )),
        Err(Error::InvalidCredentials) => Notice::Error("Invalid credentials".into()),
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            Notice::Error(format!("Error: {}", e))
        }
    }
}

/// Admin panel login: only admin credentials are accepted here
pub fn handle_admin_login(state: &mut AppState, email: &str, password: &str) -> Notice {
    match state.login(email, password, Role::Admin) {
        Ok(identity) => Notice::Success(format!("Admin access granted for {}", identity.name)),
        Err(Error::InvalidCredentials) => Notice::Error("Invalid admin credentials".into()),
        Err(e) => Notice::Error(format!("Error: {}", e)),
    }
}

pub fn handle_logout(state: &mut AppState) -> Notice {
    if state.current_identity().is_none() {
        state.logout();
        return Notice::Info("Already signed out".into());
    }
    state.logout();
    Notice::Success("Signed out".into())
}
