use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::location::Location;

pub type RiderId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rider {
    #[schema(value_type = i64)]
    pub id: RiderId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub license_plate: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attributes of a rider that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRider {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub license_plate: String,
    pub phone_number: String,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiderChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub license_plate: Option<String>,
    pub phone_number: Option<String>,
}

impl RiderChanges {
    pub fn apply(self, rider: &mut Rider) {
        if let Some(first_name) = self.first_name {
            rider.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            rider.last_name = last_name;
        }
        if let Some(email) = self.email {
            rider.email = email;
        }
        if let Some(license_plate) = self.license_plate {
            rider.license_plate = license_plate;
        }
        if let Some(phone_number) = self.phone_number {
            rider.phone_number = phone_number;
        }
    }
}

/// A rider returned by proximity search, with its location and the
/// distance from the query point.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyRider {
    #[serde(flatten)]
    pub rider: Rider,
    pub location: Location,
    pub distance_km: f64,
}
