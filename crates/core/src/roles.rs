//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in
//! `20261001000001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Role assigned to a newly registered account.
///
/// The very first account on a fresh install becomes the administrator so the
/// portfolio owner can bootstrap the admin console without a seed step.
pub fn initial_role(existing_user_count: i64) -> &'static str {
    if existing_user_count == 0 {
        ROLE_ADMIN
    } else {
        ROLE_USER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_user_is_admin() {
        assert_eq!(initial_role(0), ROLE_ADMIN);
    }

    #[test]
    fn later_users_are_regular() {
        assert_eq!(initial_role(1), ROLE_USER);
        assert_eq!(initial_role(42), ROLE_USER);
    }
}
