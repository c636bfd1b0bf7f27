//! Session and login types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dashboard role granted at login
///
/// Unknown roles are preserved verbatim so a newer backend does not lock
/// users out of an older dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Staff,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Other(role) => role,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "staff" => Self::Staff,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /auth/login`
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub passcode: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest").field("passcode", &"<redacted>").finish()
    }
}

/// Successful response of `POST /auth/login`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub role: Role,
}

/// Token and role persisted between runs
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    pub role: Role,
}

impl From<LoginResponse> for StoredCredentials {
    fn from(response: LoginResponse) -> Self {
        Self { token: response.access_token, role: response.role }
    }
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(StoredCredentials),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated(credentials) => Some(&credentials.token),
            Self::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<&Role> {
        match self {
            Self::Authenticated(credentials) => Some(&credentials.role),
            Self::Anonymous => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_parses_known_and_unknown_roles() {
        let admin: LoginResponse =
            serde_json::from_str(r#"{ "access_token": "abc", "role": "ADMIN" }"#).unwrap();
        assert_eq!(admin.role, Role::Admin);

        let other: LoginResponse =
            serde_json::from_str(r#"{ "access_token": "abc", "role": "auditor" }"#).unwrap();
        assert_eq!(other.role, Role::Other("auditor".into()));
        assert_eq!(serde_json::to_value(&other.role).unwrap(), "auditor");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let credentials = StoredCredentials { token: "s3cret".into(), role: Role::Staff };
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("s3cret"));

        let request = LoginRequest { passcode: "1234".into() };
        assert!(!format!("{request:?}").contains("1234"));
    }

    #[test]
    fn anonymous_has_no_token() {
        assert_eq!(SessionState::Anonymous.token(), None);
        let state = SessionState::Authenticated(StoredCredentials {
            token: "t".into(),
            role: Role::Admin,
        });
        assert_eq!(state.token(), Some("t"));
        assert!(state.role().is_some_and(Role::is_admin));
    }
}
