use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::info;

use crate::error::TrackerError;
use crate::middleware::{AuthUser, ValidatedJson};
use crate::router::TrackerState;
use crate::types::activity::{ActivityCreated, ActivityList, ActivityQuery, CreateActivityRequest};

/// POST /activities
pub async fn create_activity(
    State(state): State<TrackerState>,
    AuthUser(user_id): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateActivityRequest>,
) -> Result<(StatusCode, Json<ActivityCreated>), TrackerError> {
    let new_activity = req.into_new_activity()?;
    let activity = state.storage.insert_activity(user_id, new_activity).await?;

    info!(
        user_id,
        activity_id = activity.id,
        category = %activity.category,
        "activity logged"
    );
    Ok((
        StatusCode::CREATED,
        Json(ActivityCreated {
            message: "Activity logged successfully".to_string(),
            activity,
        }),
    ))
}

/// GET /activities?activity_date=YYYY-MM-DD
pub async fn list_activities(
    State(state): State<TrackerState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivityList>, TrackerError> {
    let day = query.date()?;
    let activities = state.storage.list_activities(user_id, day).await?;
    Ok(Json(ActivityList::from(activities)))
}
