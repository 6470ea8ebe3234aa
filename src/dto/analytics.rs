use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::OrderStatus;

// Time-series fields mirror the upstream dashboard contract: they are part
// of the payload but currently always empty.

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantAnalytics {
    pub total_orders: i64,
    pub total_revenue: i64,
    pub avg_rating: f64,
    pub total_menu_items: i64,
    pub rating_distribution: Vec<serde_json::Value>,
    pub menu_popularity: Vec<serde_json::Value>,
    pub performance_metrics: Vec<serde_json::Value>,
    pub revenue_over_time: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderHistoryEntry {
    pub date: DateTime<Utc>,
    pub restaurant_id: Uuid,
    pub items: i64,
    pub total: i64,
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerAnalytics {
    pub total_orders: i64,
    pub total_spent: i64,
    pub avg_order_value: f64,
    pub points_earned: i32,
    pub order_history: Vec<OrderHistoryEntry>,
    pub spending_over_time: Vec<serde_json::Value>,
    pub favorite_restaurants: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryHistoryEntry {
    pub date: DateTime<Utc>,
    pub restaurant_id: Uuid,
    pub earnings: i64,
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryAnalytics {
    pub total_deliveries: i64,
    pub total_earnings: i64,
    pub avg_earnings_per_delivery: i64,
    pub completion_rate: f64,
    pub delivery_history: Vec<DeliveryHistoryEntry>,
    pub earnings_over_time: Vec<serde_json::Value>,
    pub deliveries_by_status: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersAnalytics {
    pub total_orders: i64,
    pub total_revenue: i64,
    pub avg_order_value: f64,
    pub completion_rate: f64,
    pub orders_over_time: Vec<serde_json::Value>,
    pub top_items: Vec<serde_json::Value>,
    pub revenue_by_restaurant: Vec<serde_json::Value>,
    pub orders_by_status: Vec<serde_json::Value>,
}
