//! Temporary password generation for administrator-provisioned accounts.

use rand::{distr::Alphanumeric, Rng};

/// Number of random characters in a temporary password
pub const TEMP_PASSWORD_RANDOM_LENGTH: usize = 16;

/// Appended so the password passes upper/digit/symbol complexity rules
pub const TEMP_PASSWORD_SUFFIX: &str = "A1!";

/// Generate a fresh random temporary password.
///
/// The user never sees it; they are expected to reset it through the provider.
pub fn temporary_password() -> String {
    let mut password: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TEMP_PASSWORD_RANDOM_LENGTH)
        .map(char::from)
        .collect();
    password.push_str(TEMP_PASSWORD_SUFFIX);
    password
}
