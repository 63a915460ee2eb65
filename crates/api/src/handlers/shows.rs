//! Handlers for show management and seat availability.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use matinee_core::store::{NewShow, Show};
use matinee_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for creating a show.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShow {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "screen is required"))]
    pub screen: String,
    pub starts_at: Timestamp,
    /// Shared admin password; show creation is admin-only.
    pub password: String,
}

/// Response body for a created show.
#[derive(Debug, Serialize)]
pub struct ShowCreated {
    pub id: Uuid,
    pub name: String,
}

/// POST /api/v1/admin/shows
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateShow>,
) -> AppResult<(StatusCode, Json<ShowCreated>)> {
    if input.password != state.config.admin_password {
        return Err(AppError::Unauthorized("Invalid admin password".into()));
    }

    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let show = state
        .store
        .insert_show(NewShow {
            name: input.name,
            screen: input.screen,
            starts_at: input.starts_at,
        })
        .await
        .map_err(matinee_core::error::HoldError::from)?;

    tracing::info!(show_id = %show.id, name = %show.name, "Show created");

    Ok((
        StatusCode::CREATED,
        Json(ShowCreated {
            id: show.id,
            name: show.name,
        }),
    ))
}

/// GET /api/v1/shows
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Show>>> {
    let shows = state
        .store
        .list_active_shows()
        .await
        .map_err(matinee_core::error::HoldError::from)?;
    Ok(Json(shows))
}

/// GET /api/v1/shows/{show_id}/seats
///
/// Returns the seat-codes currently held for the show (paid plus live
/// pending holds), sorted and de-duplicated. The client greys these out.
pub async fn held_seats(
    State(state): State<AppState>,
    Path(show_id): Path<Uuid>,
) -> AppResult<Json<Vec<String>>> {
    let seats = state.manager.held_seats(show_id).await?;
    Ok(Json(seats))
}
