//! Session-stored admin state.

/// Value stored under [`keys::ADMIN_AUTH`] once the password was accepted.
pub const AUTHENTICATED: &str = "true";

/// Session keys for admin state.
pub mod keys {
    /// Login flag. Holds `"true"` when logged in, absent otherwise.
    pub const ADMIN_AUTH: &str = "adminAuth";
}
