use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::api::rest::extract::{self, ValidatedJson};
use crate::error::AppError;
use crate::models::location::Coordinates;
use crate::models::rider::{NearbyRider, NewRider, Rider, RiderChanges};
use crate::service::SEARCH_RADIUS_KM;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/riders", get(list_riders).post(create_rider))
        .route("/riders/search", get(search_riders))
        .route(
            "/riders/:id",
            get(get_rider).patch(update_rider).delete(remove_rider),
        )
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRiderRequest {
    /// The first name of the rider
    pub first_name: String,
    /// The last name of the rider
    pub last_name: String,
    /// The email of the rider
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    /// The license plate of the rider
    pub license_plate: String,
    /// The phone number of the rider
    pub phone_number: String,
}

impl From<CreateRiderRequest> for NewRider {
    fn from(request: CreateRiderRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            license_plate: request.license_plate,
            phone_number: request.phone_number,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRiderRequest {
    /// The updated first name
    pub first_name: Option<String>,
    /// The updated last name
    pub last_name: Option<String>,
    /// The updated email
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    /// The updated license plate
    pub license_plate: Option<String>,
    /// The updated phone number
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,
}

impl From<UpdateRiderRequest> for RiderChanges {
    fn from(request: UpdateRiderRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            license_plate: request.license_plate,
            phone_number: request.phone_number,
        }
    }
}

/// Accepts an optional leading `+`, then 7 to 15 digits separated by
/// spaces, dashes, dots or parentheses.
fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    let body = phone_number.strip_prefix('+').unwrap_or(phone_number);
    let separators_only = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')'));
    let digits = body.chars().filter(char::is_ascii_digit).count();

    if separators_only && (7..=15).contains(&digits) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_number")
            .with_message("phoneNumber must be a valid phone number".into()))
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Serialize, ToSchema)]
pub struct RiderResponse {
    message: String,
    rider: Rider,
}

#[derive(Serialize, ToSchema)]
pub struct RidersResponse {
    message: String,
    riders: Vec<Rider>,
}

#[derive(Serialize, ToSchema)]
pub struct NearbyRidersResponse {
    message: String,
    count: usize,
    riders: Vec<NearbyRider>,
}

#[utoipa::path(
    post,
    path = "/riders",
    tag = "riders",
    request_body = CreateRiderRequest,
    responses(
        (status = 201, description = "Rider created", body = RiderResponse),
        (status = 400, description = "Invalid rider data")
    )
)]
pub async fn create_rider(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateRiderRequest>,
) -> Result<(StatusCode, Json<RiderResponse>), AppError> {
    let result = state.riders.create_rider(payload.into()).await;
    state.metrics.record("create_rider", &result);

    Ok((
        StatusCode::CREATED,
        Json(RiderResponse {
            message: "Rider created successfully".to_string(),
            rider: result?,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/riders",
    tag = "riders",
    responses(
        (status = 200, description = "All riders", body = RidersResponse),
        (status = 404, description = "No riders registered")
    )
)]
pub async fn list_riders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RidersResponse>, AppError> {
    let result = state.riders.find_all_riders().await;
    state.metrics.record("find_all_riders", &result);

    Ok(Json(RidersResponse {
        message: "Riders fetched successfully".to_string(),
        riders: result?,
    }))
}

#[utoipa::path(
    get,
    path = "/riders/search",
    tag = "riders",
    params(
        ("latitude" = f64, Query, description = "Latitude of the search point in degrees"),
        ("longitude" = f64, Query, description = "Longitude of the search point in degrees")
    ),
    responses(
        (status = 200, description = "Riders within 5 km, closest first", body = NearbyRidersResponse),
        (status = 400, description = "Missing or non-numeric coordinates"),
        (status = 404, description = "No rider has a location")
    )
)]
pub async fn search_riders(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<NearbyRidersResponse>, AppError> {
    let query = extract::query(query)?;
    let point = Coordinates {
        latitude: query.latitude,
        longitude: query.longitude,
    };

    let start = Instant::now();
    let result = state.riders.find_nearby_riders(point).await;
    state
        .metrics
        .nearby_search_latency_seconds
        .observe(start.elapsed().as_secs_f64());
    state.metrics.record("find_nearby_riders", &result);

    let nearby = result?;
    state.metrics.nearby_search_matches.set(nearby.count as i64);

    Ok(Json(NearbyRidersResponse {
        message: format!("{} riders found within {} km", nearby.count, SEARCH_RADIUS_KM),
        count: nearby.count,
        riders: nearby.riders,
    }))
}

#[utoipa::path(
    get,
    path = "/riders/{id}",
    tag = "riders",
    params(("id" = i64, Path, description = "Rider id")),
    responses(
        (status = 200, description = "Rider found", body = RiderResponse),
        (status = 404, description = "Unknown rider")
    )
)]
pub async fn get_rider(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<RiderResponse>, AppError> {
    let id = extract::rider_id(path)?;
    let result = state.riders.find_rider_by_id(id).await;
    state.metrics.record("find_rider_by_id", &result);

    Ok(Json(RiderResponse {
        message: format!("Rider with ID {id} found successfully"),
        rider: result?,
    }))
}

#[utoipa::path(
    patch,
    path = "/riders/{id}",
    tag = "riders",
    params(("id" = i64, Path, description = "Rider id")),
    request_body = UpdateRiderRequest,
    responses(
        (status = 200, description = "Rider updated", body = RiderResponse),
        (status = 400, description = "Invalid rider data"),
        (status = 404, description = "Unknown rider")
    )
)]
pub async fn update_rider(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<UpdateRiderRequest>,
) -> Result<Json<RiderResponse>, AppError> {
    let id = extract::rider_id(path)?;
    let result = state.riders.update_rider(id, payload.into()).await;
    state.metrics.record("update_rider", &result);

    Ok(Json(RiderResponse {
        message: "Rider updated successfully".to_string(),
        rider: result?,
    }))
}

#[utoipa::path(
    delete,
    path = "/riders/{id}",
    tag = "riders",
    params(("id" = i64, Path, description = "Rider id")),
    responses(
        (status = 200, description = "Rider and its location deleted", body = RiderResponse),
        (status = 404, description = "Unknown rider")
    )
)]
pub async fn remove_rider(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<RiderResponse>, AppError> {
    let id = extract::rider_id(path)?;
    let result = state.riders.remove_rider(id).await;
    state.metrics.record("remove_rider", &result);

    Ok(Json(RiderResponse {
        message: "Rider deleted successfully".to_string(),
        rider: result?,
    }))
}

#[cfg(test)]
mod tests {
    use super::validate_phone_number;

    #[test]
    fn accepts_common_phone_formats() {
        for phone in ["647-391-5988", "+1 647 391 5988", "(647) 391.5988", "6473915988"] {
            assert!(validate_phone_number(phone).is_ok(), "{phone}");
        }
    }

    #[test]
    fn rejects_letters_and_wrong_lengths() {
        for phone in ["not a phone", "12345", "+1 647 391 5988 1234 5", "647-391-598x", ""] {
            assert!(validate_phone_number(phone).is_err(), "{phone}");
        }
    }
}
