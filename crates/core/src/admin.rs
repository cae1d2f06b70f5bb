//! Defaults and credential handling for the bootstrap administrator.

use rand::distr::Alphanumeric;
use rand::Rng;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@timetracking.local";
pub const DEFAULT_ADMIN_FIRST_NAME: &str = "System";
pub const DEFAULT_ADMIN_LAST_NAME: &str = "Administrator";
pub const DEFAULT_VACATION_DAYS: i32 = 30;

/// Length of generated bootstrap passwords.
pub const GENERATED_PASSWORD_LENGTH: usize = 16;

/// Where the bootstrap credentials are written unless configured otherwise.
pub const DEFAULT_CREDENTIALS_FILE: &str = "/tmp/admin-credentials.txt";

/// Login credentials handed to the operator after bootstrap or reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    /// Plaintext body of the credentials file.
    pub fn file_contents(&self, app_url: &str) -> String {
        format!(
            "Admin Email: {}\n\
             Password: {}\n\
             Login: {app_url}\n\
             \n\
             Change this password on first login, then delete this file.\n",
            self.email, self.password
        )
    }
}

/// Generate a random alphanumeric password of `len` characters.
pub fn generate_password(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
