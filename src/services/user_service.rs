use crate::{
    database::MongoDB,
    models::{User, UserResponse},
    utils::error::AppError,
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};

const COLLECTION: &str = "users";

/// Inserts a new user. The unique index on `username` makes a duplicate
/// insert fail atomically at the store; that failure is translated into a
/// `Conflict` here.
pub async fn create_user(db: &MongoDB, username: &str) -> Result<UserResponse, AppError> {
    let collection = db.collection::<User>(COLLECTION);

    let user = User {
        id: None,
        username: username.to_string(),
    };

    let result = collection.insert_one(&user).await.map_err(|e| {
        if is_duplicate_key(&e) {
            AppError::Conflict(format!(
                "The username '{}' is unavailable. Please choose another.",
                username
            ))
        } else {
            AppError::StoreFailure(e.to_string())
        }
    })?;

    Ok(UserResponse {
        id: result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .unwrap_or_default(),
        username: user.username,
    })
}

/// Looks up a user by its hex id. An unparsable id cannot reference any
/// stored user, so it reports the same `NotFound` as a miss.
pub async fn find_user_by_id(db: &MongoDB, user_id: &str) -> Result<User, AppError> {
    let object_id = ObjectId::parse_str(user_id)
        .map_err(|_| AppError::NotFound("userId not found".to_string()))?;

    db.collection::<User>(COLLECTION)
        .find_one(doc! { "_id": object_id })
        .await
        .map_err(|e| AppError::StoreFailure(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("userId not found".to_string()))
}

/// Lists all users. Order is whatever the store returns.
pub async fn list_users(db: &MongoDB) -> Result<Vec<UserResponse>, AppError> {
    let collection = db.collection::<User>(COLLECTION);

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::StoreFailure(e.to_string()))?;

    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(user) => users.push(UserResponse::from(user)),
            Err(e) => log::error!("❌ Failed to decode user document: {}", e),
        }
    }

    Ok(users)
}

// MongoDB raises write error 11000 when a unique index rejects an insert
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    matches!(
        &*err.kind,
        ErrorKind::Write(WriteFailure::WriteError(write_err)) if write_err.code == 11000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn duplicate_username_is_a_conflict() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/exercise_tracker_test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let username = format!("alice-{}", crate::utils::dates::now_millis());
        let first = create_user(&db, &username).await.unwrap();
        assert_eq!(first.username, username);
        assert!(!first.id.is_empty());

        let second = create_user(&db, &username).await;
        assert!(matches!(second, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn unknown_id_is_not_found() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/exercise_tracker_test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let missing = find_user_by_id(&db, &ObjectId::new().to_hex()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let garbage = find_user_by_id(&db, "not-a-hex-id").await;
        assert!(matches!(garbage, Err(AppError::NotFound(_))));
    }
}
