//! Secure credential container with automatic memory zeroing.
//!
//! Passwords live in `Zeroizing` containers, are cleared on drop and never
//! show up in debug output.

use zeroize::{Zeroize, Zeroizing};

/// Database credentials that zero their memory on drop.
///
/// # Example
///
/// ```rust
/// use seedb_core::config::Credentials;
///
/// let creds = Credentials::new("admin".to_string(), Some("secret".to_string()));
/// assert_eq!(creds.username(), "admin");
/// assert!(creds.has_password());
/// assert!(!format!("{:?}", creds).contains("secret"));
/// ```
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Credentials {
    username: Zeroizing<String>,
    password: Zeroizing<Option<String>>,
}

impl Credentials {
    /// Creates new credentials with automatic memory zeroing.
    pub fn new(username: String, password: Option<String>) -> Self {
        Self {
            username: Zeroizing::new(username),
            password: Zeroizing::new(password),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Checks if password is present without exposing it.
    pub fn has_password(&self) -> bool {
        self.password.as_ref().is_some_and(|pass| !pass.is_empty())
    }

    /// Exposes the password for handing to the driver.
    ///
    /// Callers must not log or persist the returned value.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Replaces the password, zeroing the previous one.
    pub fn set_password(&mut self, password: String) {
        self.password = Zeroizing::new(Some(password));
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username())
            .field("password", &self.password.as_ref().map(|_| "****"))
            .finish()
    }
}
