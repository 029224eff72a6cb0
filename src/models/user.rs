use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document (stored in MongoDB `users` collection).
///
/// `username` is globally unique, enforced by a unique index created at
/// startup. Users are immutable after creation and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
}

/// Request to create a user
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub username: Option<String>,
}

/// Wire form of a User: hex id, no internal fields
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username,
        }
    }
}
