//! Contact message statuses.

use crate::error::CoreError;

/// Freshly submitted, not yet opened by the admin.
pub const STATUS_NEW: &str = "new";
/// Opened by the admin.
pub const STATUS_READ: &str = "read";
/// The admin has answered.
pub const STATUS_REPLIED: &str = "replied";

/// All valid contact statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_NEW, STATUS_READ, STATUS_REPLIED];

/// Maximum message body length (characters).
pub const MAX_MESSAGE_LENGTH: u64 = 5_000;

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid contact status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_statuses_are_valid() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok(), "Status '{s}' should be valid");
        }
    }

    #[test]
    fn unknown_status_is_invalid() {
        assert!(validate_status("archived").is_err());
        assert!(validate_status("").is_err());
        assert!(validate_status("NEW").is_err());
    }
}
