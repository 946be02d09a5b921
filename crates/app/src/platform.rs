//! Terminal detection
//!
//! The front end reads commands from stdin. When stdin is a terminal a prompt
//! and banner are printed; piped input (scripts, tests) gets bare output.

use std::env;
use std::io::IsTerminal;

/// How commands reach the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// A person typing at a terminal
    Interactive,
    /// Commands piped in from a file or another process
    Piped,
}

impl InputMode {
    pub fn detect() -> Self {
        if std::io::stdin().is_terminal() {
            InputMode::Interactive
        } else {
            InputMode::Piped
        }
    }

    pub fn shows_prompt(&self) -> bool {
        matches!(self, InputMode::Interactive)
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputMode::Interactive => write!(f, "interactive"),
            InputMode::Piped => write!(f, "piped"),
        }
    }
}

/// Log platform information at startup
pub fn log_platform_info(mode: InputMode) {
    tracing::info!(input = %mode, os = env::consts::OS, "Terminal detected");

    if let Ok(term) = env::var("TERM") {
        tracing::debug!(term = %term, "Terminal type");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_mode_display() {
        assert_eq!(format!("{}", InputMode::Interactive), "interactive");
        assert_eq!(format!("{}", InputMode::Piped), "piped");
    }

    #[test]
    fn test_prompt_only_when_interactive() {
        assert!(InputMode::Interactive.shows_prompt());
        assert!(!InputMode::Piped.shows_prompt());
    }
}
