use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Exercise document (stored in MongoDB `exercises` collection).
///
/// `date` is a canonical instant in epoch milliseconds: numerically
/// comparable for range filtering and renderable as a calendar date.
/// `user_id` holds the hex id of an existing User, validated before insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub description: String,
    /// Duration in minutes
    pub duration: i64,
    pub date: i64,
}

/// Request to add an exercise for a user
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddExerciseRequest {
    pub user_id: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i64>,
    /// Optional `yyyy-mm-dd`; defaults to submission time when absent
    pub date: Option<String>,
}

/// Wire form of a created Exercise; `date` is rendered human-readable
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub duration: i64,
    pub date: String,
}

/// One entry of a user's exercise log
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

/// Response for GET /api/exercise/log
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LogResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}
