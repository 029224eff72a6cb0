use crate::{
    database::MongoDB,
    models::{AddExerciseRequest, Exercise, ExerciseResponse},
    services::user_service,
    utils::{
        dates::{self, DateError},
        error::AppError,
    },
};

const COLLECTION: &str = "exercises";

/// Validated fields of an add-exercise request, date already canonical.
#[derive(Debug)]
struct NewExercise {
    user_id: String,
    description: String,
    duration: i64,
    date: i64,
}

/// Pure validation step; runs before any store round-trip. Supplies the
/// submission time when no date was sent.
fn validate(request: AddExerciseRequest) -> Result<NewExercise, AppError> {
    let user_id = request
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::MissingField("userId is required.".to_string()))?;

    let description = request
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::MissingField("Description is required.".to_string()))?;

    let duration = request
        .duration
        .ok_or_else(|| AppError::MissingField("Duration is required.".to_string()))?;

    let date = dates::normalize(request.date.as_deref()).map_err(|e| match e {
        DateError::InvalidFormat => AppError::InvalidFormat("Incorrect date format.".to_string()),
        DateError::InvalidDate => AppError::InvalidDate("Invalid date.".to_string()),
    })?;

    Ok(NewExercise {
        user_id,
        description,
        duration,
        date,
    })
}

/// Validates and persists a new exercise for an existing user.
///
/// The user lookup must succeed before the exercise is inserted (reference
/// integrity: every exercise's `user_id` points at a stored user).
pub async fn add_exercise(
    db: &MongoDB,
    request: AddExerciseRequest,
) -> Result<ExerciseResponse, AppError> {
    let new_exercise = validate(request)?;

    let user = user_service::find_user_by_id(db, &new_exercise.user_id).await?;

    let exercise = Exercise {
        id: None,
        user_id: user
            .id
            .map(|id| id.to_hex())
            .unwrap_or(new_exercise.user_id),
        description: new_exercise.description,
        duration: new_exercise.duration,
        date: new_exercise.date,
    };

    let result = db
        .collection::<Exercise>(COLLECTION)
        .insert_one(&exercise)
        .await
        .map_err(|e| AppError::StoreFailure(e.to_string()))?;

    Ok(ExerciseResponse {
        id: result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .unwrap_or_default(),
        user_id: exercise.user_id,
        description: exercise.description,
        duration: exercise.duration,
        date: dates::to_date_string(exercise.date),
    })
}
