use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{
    dto::wishlist::{WishlistData, WishlistMutationRequest},
    entity::wishlists::{
        ActiveModel as WishlistActive, Column as WishlistCol, Entity as Wishlists,
    },
    error::{AppError, AppResult},
    models::{Wishlist, WishlistItem, WishlistItemType},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Reading never creates a row; an absent wishlist is just empty.
pub async fn get_wishlist(
    state: &AppState,
    customer_id: Uuid,
) -> AppResult<ApiResponse<WishlistData>> {
    let wishlist = load_wishlist(state, customer_id).await?;
    Ok(ApiResponse::success(
        "Ok",
        WishlistData { wishlist },
        Some(Meta::empty()),
    ))
}

pub async fn add_item(
    state: &AppState,
    customer_id: Uuid,
    payload: WishlistMutationRequest,
) -> AppResult<ApiResponse<WishlistData>> {
    let (item_type, item_id) = payload.validate().map_err(AppError::BadRequest)?;
    let mut wishlist = load_wishlist(state, customer_id).await?;

    let already_there = wishlist
        .items
        .iter()
        .any(|item| item.item_type == item_type && item.item_id == item_id);
    if !already_there {
        wishlist.items.push(WishlistItem {
            item_type,
            item_id,
            added_at: Utc::now(),
        });
        store_items(state, customer_id, &wishlist.items).await?;
        wishlist.updated_at = Utc::now();
    }

    Ok(ApiResponse::success(
        "Added to wishlist",
        WishlistData { wishlist },
        Some(Meta::empty()),
    ))
}

pub async fn remove_item(
    state: &AppState,
    customer_id: Uuid,
    payload: WishlistMutationRequest,
) -> AppResult<ApiResponse<WishlistData>> {
    let (item_type, item_id) = payload.validate().map_err(AppError::BadRequest)?;
    let mut wishlist = load_wishlist(state, customer_id).await?;

    let before = wishlist.items.len();
    wishlist
        .items
        .retain(|item| !(item.item_type == item_type && item.item_id == item_id));
    if wishlist.items.len() != before {
        store_items(state, customer_id, &wishlist.items).await?;
        wishlist.updated_at = Utc::now();
    }

    Ok(ApiResponse::success(
        "Removed from wishlist",
        WishlistData { wishlist },
        Some(Meta::empty()),
    ))
}

async fn load_wishlist(state: &AppState, customer_id: Uuid) -> AppResult<Wishlist> {
    let model = Wishlists::find_by_id(customer_id).one(&state.orm).await?;
    match model {
        Some(model) => {
            let items: Vec<WishlistItem> = serde_json::from_value(model.items)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt wishlist: {e}")))?;
            Ok(Wishlist {
                customer_id,
                items,
                updated_at: model.updated_at.with_timezone(&Utc),
            })
        }
        None => Ok(Wishlist {
            customer_id,
            items: Vec::new(),
            updated_at: Utc::now(),
        }),
    }
}

async fn store_items(
    state: &AppState,
    customer_id: Uuid,
    items: &[WishlistItem],
) -> AppResult<()> {
    let active = WishlistActive {
        customer_id: Set(customer_id),
        items: Set(serde_json::to_value(items).map_err(|e| AppError::Internal(e.into()))?),
        updated_at: Set(Utc::now().into()),
    };

    Wishlists::insert(active)
        .on_conflict(
            OnConflict::column(WishlistCol::CustomerId)
                .update_columns([WishlistCol::Items, WishlistCol::UpdatedAt])
                .to_owned(),
        )
        .exec(&state.orm)
        .await?;

    Ok(())
}
