use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerQuery {
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestaurantQuery {
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OwnerQuery {
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsRange {
    Week,
    Month,
    Year,
}

impl AnalyticsRange {
    pub fn cutoff(self) -> DateTime<Utc> {
        let now = Utc::now();
        match self {
            AnalyticsRange::Week => now - Duration::days(7),
            AnalyticsRange::Month => now - Duration::days(30),
            AnalyticsRange::Year => now - Duration::days(365),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyticsQuery {
    pub range: Option<AnalyticsRange>,
}

impl AnalyticsQuery {
    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        self.range.map(AnalyticsRange::cutoff)
    }
}
