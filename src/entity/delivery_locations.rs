use sea_orm::entity::prelude::*;

// One live row per rider; a fresh fix overwrites the previous one.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "delivery_locations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub rider_id: Uuid,
    pub order_id: Option<Uuid>,
    pub lat: f64,
    pub lng: f64,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
