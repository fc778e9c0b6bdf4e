//! Narrow interface to the embedding page's dialog and toast services.
//!
//! The editor never builds UI chrome of its own. When it needs the user's
//! confirmation or wants to surface a message it goes through
//! [`HostServices`]; the page wires that to its modal and toast widgets.

use std::fmt;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// Confirmation and notification services supplied by the host.
pub trait HostServices {
    /// Ask the user a yes/no question.
    fn confirm(&self, message: &str) -> bool;

    /// Show a transient notice.
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Headless host: confirms everything and logs notices.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHost;

impl HostServices for LogHost {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!(message, "auto-confirmed");
        true
    }

    fn notify(&self, message: &str, kind: NoticeKind) {
        tracing::info!(%kind, message, "editor notice");
    }
}
