pub mod analytics;
pub mod delivery;
pub mod orders;
pub mod promos;
pub mod ratings;
pub mod restaurants;
pub mod subscriptions;
pub mod wishlist;
