use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::booking::Booking;

/// A registered traveller. `password` holds the bcrypt hash, never the
/// plaintext; this type is not serialized into HTTP responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub dob: String,
    pub password: String,
    #[serde(default)]
    pub booking_history: Vec<Booking>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn history_defaults_to_empty() {
        let doc = doc! {
            "firstName": "Asha",
            "lastName": "Rao",
            "email": "asha@example.com",
            "gender": "female",
            "dob": "1990-01-01",
            "password": "$2b$12$hash",
        };
        let user: User = bson::from_document(doc).unwrap();
        assert!(user.booking_history.is_empty());
        assert!(user.id.is_none());
    }
}
