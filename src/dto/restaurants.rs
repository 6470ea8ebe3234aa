use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{GeoPoint, MenuItem, Restaurant};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantRequest {
    pub owner_id: Option<Uuid>,
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub description: Option<String>,
    pub menu: Option<Vec<MenuItem>>,
    pub location: Option<GeoPoint>,
    pub delivery_time: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl CreateRestaurantRequest {
    pub fn validate(&self) -> Result<(Uuid, String), String> {
        let owner_id = self.owner_id.ok_or("owner_id is required")?;
        let name = self
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or("name is required")?;
        Ok((owner_id, name.to_string()))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub description: Option<String>,
    pub location: Option<GeoPoint>,
    pub delivery_time: Option<String>,
    pub is_local_legend: Option<bool>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMenuRequest {
    pub menu: Option<Vec<MenuItem>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantList {
    pub restaurants: Vec<Restaurant>,
}
