pub mod analytics_service;
pub mod location_service;
pub mod order_service;
pub mod promo_service;
pub mod quest_service;
pub mod rating_service;
pub mod restaurant_service;
pub mod subscription_service;
pub mod user_service;
pub mod wishlist_service;
