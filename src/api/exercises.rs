use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::AddExerciseRequest;
use crate::services::log_service::{self, LogParams};
use crate::services::exercise_service;
use crate::utils::error::{error_response, errors_response};

#[utoipa::path(
    post,
    path = "/api/exercise/add",
    tag = "Exercises",
    request_body = AddExerciseRequest,
    responses(
        (status = 200, description = "Created exercise", body = crate::models::ExerciseResponse),
        (status = 400, description = "Missing/invalid userId or bad date"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_exercise(
    db: web::Data<MongoDB>,
    body: web::Json<AddExerciseRequest>,
) -> HttpResponse {
    log::info!("🏃 POST /add - Adding exercise");

    match exercise_service::add_exercise(&db, body.into_inner()).await {
        Ok(exercise) => HttpResponse::Ok().json(exercise),
        Err(e) => {
            log::warn!("⚠️  Failed to add exercise: {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/exercise/log",
    tag = "Exercises",
    params(
        ("userId" = String, Query, description = "Id of the user (required)"),
        ("from" = Option<String>, Query, description = "Lower bound, yyyy-mm-dd"),
        ("to" = Option<String>, Query, description = "Upper bound, yyyy-mm-dd"),
        ("limit" = Option<String>, Query, description = "Max entries returned; 0 or absent = unbounded")
    ),
    responses(
        (status = 200, description = "Filtered exercise log, newest first", body = crate::models::LogResponse),
        (status = 400, description = "Missing userId, bad dates, or reversed range"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_log(db: web::Data<MongoDB>, query: web::Query<LogParams>) -> HttpResponse {
    log::info!(
        "📋 GET /log - userId={:?} from={:?} to={:?} limit={:?}",
        query.user_id,
        query.from,
        query.to,
        query.limit
    );

    match log_service::get_exercise_log(&db, &query).await {
        Ok(response) => {
            log::info!("✅ Log retrieved: {} entries", response.count);
            HttpResponse::Ok().json(response)
        }
        Err(errors) => errors_response(&errors),
    }
}
