use sea_orm::entity::prelude::*;

use crate::models::OrderStatus;

// Cross-collection references (customer, restaurant, partner) are loose ids
// carried over from the document-store layout; they are not foreign keys.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub delivery_partner_id: Option<Uuid>,
    pub items: Json,
    pub total_amount: i64,
    pub delivery_address: Json,
    pub status: OrderStatus,
    pub ratings: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub delivered_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
