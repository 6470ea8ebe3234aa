use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Promo;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePromoRequest {
    pub restaurant_id: Option<Uuid>,
    pub restaurant_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub discount_percent: Option<i32>,
    pub code: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct NewPromo {
    pub restaurant_id: Uuid,
    pub restaurant_name: String,
    pub title: String,
    pub description: Option<String>,
    pub discount_percent: i32,
    pub code: String,
    pub valid_until: DateTime<Utc>,
}

impl CreatePromoRequest {
    pub fn validate(self) -> Result<NewPromo, String> {
        let restaurant_id = self.restaurant_id.ok_or("restaurant_id is required")?;
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or("title is required")?;
        let code = self
            .code
            .filter(|c| !c.trim().is_empty())
            .ok_or("code is required")?;
        let discount_percent = self.discount_percent.ok_or("discount_percent is required")?;
        if !(1..=100).contains(&discount_percent) {
            return Err("discount_percent must be between 1 and 100".into());
        }
        let valid_until = self.valid_until.ok_or("valid_until is required")?;

        Ok(NewPromo {
            restaurant_id,
            restaurant_name: self.restaurant_name.unwrap_or_default(),
            title,
            description: self.description,
            discount_percent,
            code,
            valid_until,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePromoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub discount_percent: Option<i32>,
    pub code: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromoList {
    pub promos: Vec<Promo>,
}
