//! Browser confirm dialog for destructive actions.

/// Ask the user to confirm. A declined dialog (or a missing window) is
/// a no-op for the caller, not an error.
pub fn confirm(message: &str) -> bool {
    match web_sys::window() {
        Some(win) => win.confirm_with_message(message).unwrap_or(false),
        None => false,
    }
}
