use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::AppError;

pub const SESSION_USER_KEY: &str = "user";

/// The payload stored in the cookie-backed session: travellers carry their
/// email and display name, the admin actor carries its configured id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum SessionUser {
    Customer {
        email: String,
        #[serde(rename = "firstName")]
        first_name: String,
    },
    Admin {
        id: String,
        name: String,
    },
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        matches!(self, SessionUser::Admin { .. })
    }
}

pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, AppError> {
    session
        .get::<SessionUser>(SESSION_USER_KEY)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// The email of the logged-in traveller; admin sessions do not count.
pub async fn require_customer(session: &Session) -> Result<String, AppError> {
    match current_user(session).await? {
        Some(SessionUser::Customer { email, .. }) => Ok(email),
        _ => Err(AppError::AuthenticationError("Not logged in".to_string())),
    }
}

pub async fn require_admin(session: &Session) -> Result<(), AppError> {
    match current_user(session).await? {
        Some(user) if user.is_admin() => Ok(()),
        _ => Err(AppError::AuthorizationError("Unauthorized".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_payload_shapes() {
        let customer = SessionUser::Customer {
            email: "asha@example.com".into(),
            first_name: "Asha".into(),
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["role"], "customer");
        assert_eq!(json["firstName"], "Asha");

        let admin = SessionUser::Admin {
            id: "OPS1".into(),
            name: "ADMIN".into(),
        };
        let json = serde_json::to_value(&admin).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["name"], "ADMIN");
        assert!(admin.is_admin());
        assert!(!customer.is_admin());
    }
}
