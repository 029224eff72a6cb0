use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise Tracker API",
        version = "1.0.0",
        description = "REST service recording users and timestamped exercise entries, with a filtered/paginated exercise log per user.\n\n**Dates:** submitted as `yyyy-mm-dd`; stored as epoch-millisecond instants at server-local midnight; rendered human-readable in responses.\n\n**Log queries:** `from`/`to` bound the range (defaults: epoch and now), `limit` caps the result count, entries come back newest first."
    ),
    paths(
        crate::api::users::create_user,
        crate::api::users::get_users,
        crate::api::exercises::add_exercise,
        crate::api::exercises::get_log,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::CreateUserRequest,
            crate::models::UserResponse,
            crate::models::AddExerciseRequest,
            crate::models::ExerciseResponse,
            crate::models::LogEntry,
            crate::models::LogResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "User creation and listing. Usernames are globally unique."),
        (name = "Exercises", description = "Exercise creation and per-user log queries with date-range filtering."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
    )
)]
pub struct ApiDoc;
