use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Subscription;

pub const PLAN_TYPES: [&str; 2] = ["weekly", "monthly"];

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSubscriptionRequest {
    pub customer_id: Option<Uuid>,
    pub plan_type: Option<String>,
    pub preferences: Option<serde_json::Value>,
}

impl CreateSubscriptionRequest {
    pub fn validate(&self) -> Result<(Uuid, String), String> {
        let customer_id = self.customer_id.ok_or("customer_id is required")?;
        let plan_type = self.plan_type.as_deref().ok_or("plan_type is required")?;
        if !PLAN_TYPES.contains(&plan_type) {
            return Err(format!(
                "plan_type must be one of: {}",
                PLAN_TYPES.join(", ")
            ));
        }
        Ok((customer_id, plan_type.to_string()))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionData {
    pub subscription: Option<Subscription>,
}
