use crate::error::{PlanError, Result};
use tracing::info;

/// Who is looking at the plan. Only exists after a successful login.
///
/// Passed to the presentation and report code; extraction never sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    /// Any username is accepted; the password is a shared secret.
    pub fn login(username: &str, password: &str, shared_secret: &str) -> Result<Session> {
        if password != shared_secret {
            return Err(PlanError::AccessDenied);
        }
        let username = match username.trim() {
            "" => "User",
            name => name,
        };
        info!(user = username, "logged in");
        Ok(Session {
            username: username.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login() {
        let session = Session::login("  ops ", "secret", "secret").unwrap();
        assert_eq!(session.username(), "ops");
    }

    #[test]
    fn test_anonymous_user() {
        let session = Session::login("", "secret", "secret").unwrap();
        assert_eq!(session.username(), "User");
    }

    #[test]
    fn test_wrong_password() {
        assert!(matches!(
            Session::login("ops", "guess", "secret"),
            Err(PlanError::AccessDenied)
        ));
    }
}
