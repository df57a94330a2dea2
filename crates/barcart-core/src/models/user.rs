use serde::Serialize;

/// Profile payload as returned by the service. Its shape is owned by the server.
pub type UserProfile = serde_json::Value;

/// Registration body.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body for the add/remove favourite endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct FavouriteRequest<'a> {
    #[serde(rename = "faveId")]
    pub fave_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("alice", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_request_bodies_serialize_with_wire_names() {
        let body = serde_json::to_value(Credentials::new("alice", "pw")).unwrap();
        assert_eq!(body, serde_json::json!({"username": "alice", "password": "pw"}));

        let body = serde_json::to_value(FavouriteRequest { fave_id: "d1" }).unwrap();
        assert_eq!(body, serde_json::json!({"faveId": "d1"}));
    }
}
