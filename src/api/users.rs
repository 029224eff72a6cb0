use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::CreateUserRequest;
use crate::services::user_service;
use crate::utils::error::{error_response, AppError};

#[utoipa::path(
    post,
    path = "/api/exercise/new-user",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Created user", body = crate::models::UserResponse),
        (status = 400, description = "Missing or duplicate username"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(
    db: web::Data<MongoDB>,
    body: web::Json<CreateUserRequest>,
) -> HttpResponse {
    let username = match body
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
    {
        Some(u) => u.to_string(),
        None => {
            return error_response(&AppError::MissingField("Username is required.".to_string()))
        }
    };

    log::info!("👤 POST /new-user - Creating user '{}'", username);

    match user_service::create_user(&db, &username).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => {
            log::warn!("⚠️  Failed to create user '{}': {}", username, e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/exercise/users",
    tag = "Users",
    responses(
        (status = 200, description = "Array of all users", body = [crate::models::UserResponse]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_users(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("👥 GET /users - Listing all users");

    match user_service::list_users(&db).await {
        Ok(users) => {
            log::info!("✅ Users retrieved: {}", users.len());
            HttpResponse::Ok().json(users)
        }
        Err(e) => error_response(&e),
    }
}
