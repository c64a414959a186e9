use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::rider::RiderId;

pub type LocationId = i64;

/// A point in degrees on the spherical Earth model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[schema(value_type = i64)]
    pub id: LocationId,
    pub latitude: f64,
    pub longitude: f64,
    #[schema(value_type = i64)]
    pub rider_id: RiderId,
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
