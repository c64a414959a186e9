use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::rest::extract::{self, ValidatedJson};
use crate::error::AppError;
use crate::models::location::{Coordinates, Location};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/riders/:id/locations",
        get(get_location).post(create_location),
    )
}

// Out-of-range coordinates are stored as given.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLocationRequest {
    /// Latitude of the location
    pub latitude: f64,
    /// Longitude of the location
    pub longitude: f64,
}

#[derive(Serialize, ToSchema)]
pub struct LocationResponse {
    message: String,
    location: Location,
}

#[utoipa::path(
    post,
    path = "/riders/{id}/locations",
    tag = "riders",
    params(("id" = i64, Path, description = "Rider id")),
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created", body = LocationResponse),
        (status = 400, description = "Unknown rider, existing location or invalid data")
    )
)]
pub async fn create_location(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<CreateLocationRequest>,
) -> Result<(StatusCode, Json<LocationResponse>), AppError> {
    let rider_id = extract::rider_id(path)?;
    let coordinates = Coordinates {
        latitude: payload.latitude,
        longitude: payload.longitude,
    };

    let result = state.riders.create_location(rider_id, coordinates).await;
    state.metrics.record("create_location", &result);

    Ok((
        StatusCode::CREATED,
        Json(LocationResponse {
            message: format!("Location created successfully for Rider ID {rider_id}"),
            location: result?,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/riders/{id}/locations",
    tag = "riders",
    params(("id" = i64, Path, description = "Rider id")),
    responses(
        (status = 200, description = "Location found", body = LocationResponse),
        (status = 404, description = "Rider has no location")
    )
)]
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<LocationResponse>, AppError> {
    let rider_id = extract::rider_id(path)?;
    let result = state.riders.find_location_by_rider_id(rider_id).await;
    state.metrics.record("find_location_by_rider_id", &result);

    Ok(Json(LocationResponse {
        message: format!("Location found for Rider ID {rider_id}"),
        location: result?,
    }))
}
