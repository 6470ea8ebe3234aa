use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{DeliveryAddress, LivePoint, Order, OrderLine};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: Option<Uuid>,
    pub restaurant_id: Option<Uuid>,
    pub items: Option<Vec<OrderLine>>,
    pub total_amount: Option<i64>,
    pub delivery_address: Option<DeliveryAddress>,
}

/// A creation request with every required field present.
#[derive(Debug)]
pub struct NewOrder {
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub items: Vec<OrderLine>,
    pub total_amount: i64,
    pub delivery_address: DeliveryAddress,
}

impl CreateOrderRequest {
    // The stated total is recorded as-is; it is not cross-checked against
    // the item lines.
    pub fn validate(self) -> Result<NewOrder, String> {
        let customer_id = self.customer_id.ok_or("customer_id is required")?;
        let restaurant_id = self.restaurant_id.ok_or("restaurant_id is required")?;
        let items = self.items.ok_or("items is required")?;
        let total_amount = self.total_amount.ok_or("total_amount is required")?;
        let delivery_address = self.delivery_address.ok_or("delivery_address is required")?;

        if items.is_empty() {
            return Err("items must not be empty".into());
        }

        Ok(NewOrder {
            customer_id,
            restaurant_id,
            items,
            total_amount,
            delivery_address,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignDeliveryRequest {
    pub delivery_partner_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RateOrderRequest {
    pub customer_id: Option<Uuid>,
    pub rating: Option<i32>,
    pub review: Option<String>,
}

impl RateOrderRequest {
    pub fn validate(&self) -> Result<(Uuid, i32), String> {
        let customer_id = self.customer_id.ok_or("customer_id is required")?;
        let rating = self.rating.ok_or("rating is required")?;
        if !(1..=5).contains(&rating) {
            return Err("rating must be between 1 and 5".into());
        }
        Ok((customer_id, rating))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithLocation {
    pub order: Order,
    pub live_location: Option<LivePoint>,
}
