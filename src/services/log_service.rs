use crate::{
    database::MongoDB,
    models::{Exercise, LogEntry, LogResponse},
    services::user_service,
    utils::{
        dates::{self, DateError},
        error::AppError,
    },
};
use futures::stream::StreamExt;
use mongodb::bson::doc;
use serde::Deserialize;

const COLLECTION: &str = "exercises";

/// Query parameters for GET /api/exercise/log
#[derive(Debug, Deserialize)]
pub struct LogParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Resolved range bounds and result cap for the log query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub from: i64,
    pub to: i64,
    pub limit: Option<i64>,
}

/// Builds the validated range query for a user's exercise log.
///
/// Pure function of its inputs plus the ambient clock; it never touches the
/// store. Validation errors for `from`, `to`, `limit` and the range-order
/// check are all accumulated and reported together, so a response can carry
/// several error entries at once. A missing `userId` short-circuits alone.
///
/// Defaults: `from` = 0, `to` = now; `limit` of zero or absent = unbounded.
pub fn build_log_query(
    user_id: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    limit: Option<&str>,
) -> Result<(String, LogQuery), Vec<AppError>> {
    let user_id = match user_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id.to_string(),
        None => {
            return Err(vec![AppError::MissingField(
                "Query missing required 'userId' parameter.".to_string(),
            )])
        }
    };

    let mut errors = Vec::new();

    let from_ts = resolve_bound(from, "from", &mut errors);
    let to_ts = resolve_bound(to, "to", &mut errors);

    if let (Some(from_ts), Some(to_ts)) = (from_ts, to_ts) {
        if from_ts > to_ts {
            errors.push(AppError::DateRangeReversed);
        }
    }

    let limit = match limit.filter(|l| !l.is_empty()) {
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(0) => None, // zero means unbounded
            Ok(n) if n > 0 => Some(n),
            _ => {
                errors.push(AppError::InvalidFormat(
                    "Invalid 'limit' parameter.".to_string(),
                ));
                None
            }
        },
        None => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok((
        user_id,
        LogQuery {
            from: from_ts.unwrap_or(0),
            to: to_ts.unwrap_or_else(dates::now_millis),
            limit,
        },
    ))
}

// Normalizes one optional range bound, tagging errors with which side failed.
// An empty bound counts as absent; a whitespace-only one is validated and
// fails the format check.
fn resolve_bound(raw: Option<&str>, side: &str, errors: &mut Vec<AppError>) -> Option<i64> {
    let raw = raw.filter(|s| !s.is_empty())?;
    match dates::normalize(Some(raw)) {
        Ok(ts) => Some(ts),
        Err(DateError::InvalidFormat) => {
            errors.push(AppError::InvalidFormat(format!(
                "Incorrect date format [{}].",
                side
            )));
            None
        }
        Err(DateError::InvalidDate) => {
            errors.push(AppError::InvalidDate(format!("Invalid date [{}].", side)));
            None
        }
    }
}

/// Runs the validated log query against the store: resolves the user, then
/// fetches that user's exercises in range, newest first, capped by `limit`.
pub async fn get_exercise_log(
    db: &MongoDB,
    params: &LogParams,
) -> Result<LogResponse, Vec<AppError>> {
    let (user_id, query) = build_log_query(
        params.user_id.as_deref(),
        params.from.as_deref(),
        params.to.as_deref(),
        params.limit.as_deref(),
    )?;

    let user = user_service::find_user_by_id(db, &user_id)
        .await
        .map_err(|e| vec![e])?;

    let collection = db.collection::<Exercise>(COLLECTION);
    let mut find = collection
        .find(doc! {
            "user_id": &user_id,
            "date": { "$gte": query.from, "$lte": query.to },
        })
        .sort(doc! { "date": -1 });

    if let Some(limit) = query.limit {
        find = find.limit(limit);
    }

    let mut cursor = find
        .await
        .map_err(|e| vec![AppError::StoreFailure(e.to_string())])?;

    let mut log = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(exercise) => log.push(LogEntry {
                description: exercise.description,
                duration: exercise.duration,
                date: dates::to_date_string(exercise.date),
            }),
            Err(e) => log::error!("❌ Failed to decode exercise document: {}", e),
        }
    }

    Ok(LogResponse {
        username: user.username,
        id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
        count: log.len(),
        log,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_user_id_short_circuits() {
        let errors = build_log_query(None, Some("2021-01-01"), None, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Query missing required 'userId' parameter."
        );

        let blank = build_log_query(Some("  "), None, None, None).unwrap_err();
        assert_eq!(blank.len(), 1);
    }

    #[test]
    fn no_bounds_default_to_zero_and_now() {
        let before = dates::now_millis();
        let (user_id, query) = build_log_query(Some("abc"), None, None, None).unwrap();
        assert_eq!(user_id, "abc");
        assert_eq!(query.from, 0);
        assert!(query.to >= before && query.to <= dates::now_millis());
        assert_eq!(query.limit, None);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let errors =
            build_log_query(Some("abc"), Some("2021-01-10"), Some("2021-01-01"), None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], AppError::DateRangeReversed));
    }

    #[test]
    fn valid_bounds_resolve_in_order() {
        let (_, query) =
            build_log_query(Some("abc"), Some("2021-01-01"), Some("2021-01-31"), Some("2"))
                .unwrap();
        assert!(query.from < query.to);
        assert_eq!(query.limit, Some(2));
        assert_eq!(query.from, dates::normalize(Some("2021-01-01")).unwrap());
        assert_eq!(query.to, dates::normalize(Some("2021-01-31")).unwrap());
    }

    #[test]
    fn format_errors_on_both_sides_are_collected_together() {
        let errors =
            build_log_query(Some("abc"), Some("garbage"), Some("also-garbage"), None).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), "Incorrect date format [from].");
        assert_eq!(errors[1].to_string(), "Incorrect date format [to].");
    }

    #[test]
    fn invalid_dates_are_tagged_per_side() {
        let errors =
            build_log_query(Some("abc"), Some("2021-13-40"), Some("2021-01-01"), None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "Invalid date [from].");
    }

    #[test]
    fn mixed_errors_accumulate() {
        let errors = build_log_query(
            Some("abc"),
            Some("garbage"),
            Some("2021-13-40"),
            Some("many"),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn limit_parses_as_non_negative_cap() {
        let (_, unbounded) = build_log_query(Some("abc"), None, None, Some("0")).unwrap();
        assert_eq!(unbounded.limit, None);

        let (_, capped) = build_log_query(Some("abc"), None, None, Some("5")).unwrap();
        assert_eq!(capped.limit, Some(5));

        let negative = build_log_query(Some("abc"), None, None, Some("-1")).unwrap_err();
        assert_eq!(negative.len(), 1);
        assert!(matches!(negative[0], AppError::InvalidFormat(_)));
    }

    #[test]
    fn whitespace_bound_is_validated_not_ignored() {
        let errors = build_log_query(Some("abc"), Some("  "), None, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "Incorrect date format [from].");

        // Truly empty bounds count as absent
        let (_, query) = build_log_query(Some("abc"), Some(""), Some(""), None).unwrap();
        assert_eq!(query.from, 0);
    }

    #[test]
    fn unanchored_bound_still_resolves() {
        // The format check tolerates trailing garbage around a valid date.
        let (_, query) =
            build_log_query(Some("abc"), Some("xx2021-01-01yy"), None, None).unwrap();
        assert_eq!(query.from, dates::normalize(Some("2021-01-01")).unwrap());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn log_is_filtered_sorted_and_capped() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/exercise_tracker_test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let username = format!("logger-{}", dates::now_millis());
        let user = user_service::create_user(&db, &username).await.unwrap();

        for day in ["2021-01-05", "2021-01-15", "2021-01-25", "2021-02-05"] {
            let request = crate::models::AddExerciseRequest {
                user_id: Some(user.id.clone()),
                description: Some(format!("run {}", day)),
                duration: Some(30),
                date: Some(day.to_string()),
            };
            crate::services::exercise_service::add_exercise(&db, request)
                .await
                .unwrap();
        }

        let params = LogParams {
            user_id: Some(user.id.clone()),
            from: Some("2021-01-01".to_string()),
            to: Some("2021-01-31".to_string()),
            limit: Some("2".to_string()),
        };
        let response = get_exercise_log(&db, &params).await.unwrap();

        assert_eq!(response.username, username);
        assert_eq!(response.count, 2);
        // Descending by date: the January entries, newest first
        assert_eq!(response.log[0].description, "run 2021-01-25");
        assert_eq!(response.log[1].description, "run 2021-01-15");
    }
}
