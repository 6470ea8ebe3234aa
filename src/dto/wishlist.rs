use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Wishlist, WishlistItemType};

#[derive(Debug, Deserialize, ToSchema)]
pub struct WishlistMutationRequest {
    pub item_type: Option<String>,
    pub item_id: Option<Uuid>,
}

impl WishlistMutationRequest {
    pub fn validate(&self) -> Result<(WishlistItemType, Uuid), String> {
        let item_type = match self.item_type.as_deref() {
            Some("restaurant") => WishlistItemType::Restaurant,
            Some("dish") => WishlistItemType::Dish,
            Some(other) => return Err(format!("unknown item_type: {other}")),
            None => return Err("item_type is required".into()),
        };
        let item_id = self.item_id.ok_or("item_id is required")?;
        Ok((item_type, item_id))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistData {
    pub wishlist: Wishlist,
}
