use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{LivePoint, User};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetLocationRequest {
    pub rider_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug)]
pub struct NewFix {
    pub rider_id: Uuid,
    pub order_id: Option<Uuid>,
    pub lat: f64,
    pub lng: f64,
}

impl SetLocationRequest {
    pub fn validate(self) -> Result<NewFix, String> {
        let rider_id = self.rider_id.ok_or("rider_id is required")?;
        let lat = self.lat.ok_or("lat is required")?;
        let lng = self.lng.ok_or("lng is required")?;
        if !lat.is_finite() || !lng.is_finite() {
            return Err("lat/lng must be finite coordinates".into());
        }
        Ok(NewFix {
            rider_id,
            order_id: self.order_id,
            lat,
            lng,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrackData {
    pub location: Option<LivePoint>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RiderList {
    pub riders: Vec<User>,
}
