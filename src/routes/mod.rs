use axum::Router;

use crate::state::AppState;

pub mod analytics;
pub mod delivery;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod promos;
pub mod ratings;
pub mod restaurants;
pub mod subscriptions;
pub mod wishlist;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/restaurants", restaurants::router())
        .nest("/orders", orders::router())
        .nest("/delivery", delivery::router())
        .nest("/ratings", ratings::router())
        .nest("/promos", promos::router())
        .nest("/subscriptions", subscriptions::router())
        .nest("/wishlist", wishlist::router())
        .nest("/analytics", analytics::router())
}
