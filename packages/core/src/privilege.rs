//! Caller identity and privilege checks.

use nix::unistd::geteuid;

use crate::error::ServiceError;

/// Account the service runs as when no caller identity can be determined
pub const FALLBACK_USER: &str = "root";

/// Whether the current process has an effective uid of 0
pub fn is_elevated() -> bool {
    geteuid().is_root()
}

/// Fail with [`ServiceError::NotElevated`] unless running as root
pub fn require_elevated(action: &str) -> Result<(), ServiceError> {
    if is_elevated() {
        Ok(())
    } else {
        tracing::debug!(action, "refusing to continue without root");
        Err(ServiceError::NotElevated(action.to_string()))
    }
}

/// The user who invoked servicify, seeing through sudo
pub fn invoking_user() -> String {
    let sudo_user = std::env::var("SUDO_USER").ok();
    let current = whoami::fallible::username().ok();
    resolve_run_as_user(sudo_user.as_deref(), current.as_deref())
}

/// Pick the run-as account from the sudo caller and the current login
///
/// A non-root `SUDO_USER` wins, so `sudo servicify install` runs the app as
/// the person who typed it rather than as root.
pub fn resolve_run_as_user(sudo_user: Option<&str>, current: Option<&str>) -> String {
    fn non_empty(name: Option<&str>) -> Option<&str> {
        name.map(str::trim).filter(|n| !n.is_empty())
    }

    if let Some(user) = non_empty(sudo_user).filter(|u| *u != FALLBACK_USER) {
        return user.to_string();
    }
    non_empty(current).unwrap_or(FALLBACK_USER).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sudo_user_wins_over_current_login() {
        assert_eq!(resolve_run_as_user(Some("alice"), Some("root")), "alice");
    }

    #[test]
    fn sudo_root_falls_through_to_current_login() {
        assert_eq!(resolve_run_as_user(Some("root"), Some("deploy")), "deploy");
    }

    #[test]
    fn current_login_used_without_sudo() {
        assert_eq!(resolve_run_as_user(None, Some("deploy")), "deploy");
    }

    #[test]
    fn empty_identity_falls_back_to_root() {
        assert_eq!(resolve_run_as_user(Some("  "), Some("")), "root");
        assert_eq!(resolve_run_as_user(None, None), "root");
    }

    #[test]
    fn invoking_user_is_never_empty() {
        assert!(!invoking_user().is_empty());
    }

    #[test]
    fn require_elevated_matches_euid() {
        let result = require_elevated("install");
        assert_eq!(result.is_ok(), is_elevated());
        if let Err(err) = result {
            assert!(err.to_string().contains("'install' requires root"));
        }
    }
}
