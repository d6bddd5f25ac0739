//! Event endpoints

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use eventsched_core::{Category, CreatedEvent, Event, EventDraft, EventFilter, EventStats};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/upcoming", get(upcoming_events))
        .route("/events/archived", get(archived_events))
        .route("/events/stats", get(event_stats))
        .route(
            "/events/{id}",
            get(get_event).put(archive_event).delete(delete_event),
        )
}

/// Query parameters accepted by GET /events
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub archived: Option<bool>,
}

impl ListParams {
    fn into_filter(self) -> Result<EventFilter, AppError> {
        let category = self
            .category
            .filter(|c| !c.trim().is_empty() && !c.trim().eq_ignore_ascii_case("all"))
            .map(|c| c.parse::<Category>())
            .transpose()?;

        Ok(EventFilter {
            category,
            search: self.search,
            archived: self.archived,
        })
    }
}

/// GET /events - All events, earliest first, optionally filtered
async fn list_events(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Event>>, AppError> {
    let Query(params) = params?;
    let filter = params.into_filter()?;
    Ok(Json(state.scheduler().list(&filter)?))
}

/// POST /events - Create a new event
async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedEvent>), AppError> {
    let Json(draft) = payload?;
    let event = state.scheduler().create(draft)?;
    Ok((StatusCode::CREATED, Json(CreatedEvent::from(&event))))
}

/// GET /events/upcoming - Next non-archived events from today on
async fn upcoming_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.scheduler().upcoming()?))
}

/// GET /events/archived - Archived events, most recent first
async fn archived_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.scheduler().archived()?))
}

/// GET /events/stats - Totals per category and archived count
async fn event_stats(State(state): State<AppState>) -> Result<Json<EventStats>, AppError> {
    Ok(Json(state.scheduler().stats()?))
}

/// GET /events/:id - One event
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    Ok(Json(state.scheduler().get(&id)?))
}

/// PUT /events/:id - Mark an event archived
async fn archive_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    Ok(Json(state.scheduler().archive(&id)?))
}

/// DELETE /events/:id - Remove an event
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.scheduler().delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
