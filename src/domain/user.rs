// User identity as supplied by the identity provider.
//
// The crate never signs anyone in. It only carries the identity the
// provider handed over and validates the bits the favorites core relies on.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Stable provider-assigned id, scopes the favorites collection
    pub uid: String,

    pub display_name: Option<String>,

    pub email: Option<String>,

    pub photo_url: Option<String>,

    /// Bearer credential for the remote favorites store, if any
    #[serde(default, skip_serializing)]
    pub id_token: Option<String>,
}

impl CurrentUser {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
            photo_url: None,
            id_token: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_id_token(mut self, token: impl Into<String>) -> Self {
        self.id_token = Some(token.into());
        self
    }

    /// Name shown in greetings
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("User")
    }
}

/// Validates CurrentUser invariants
pub fn validate_user(user: &CurrentUser) -> DomainResult<()> {
    if user.uid.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "User id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_uid_fails() {
        assert!(validate_user(&CurrentUser::new("  ")).is_err());
        assert!(validate_user(&CurrentUser::new("u1")).is_ok());
    }

    #[test]
    fn test_greeting_name_fallback() {
        assert_eq!(CurrentUser::new("u1").greeting_name(), "User");
        let named = CurrentUser::new("u1").with_display_name("Paul");
        assert_eq!(named.greeting_name(), "Paul");
    }

    #[test]
    fn test_token_never_serialized() {
        let user = CurrentUser::new("u1").with_id_token("secret");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
    }
}
