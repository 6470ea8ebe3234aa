use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        analytics::{
            CustomerAnalytics, DeliveryAnalytics, DeliveryHistoryEntry, OrderHistoryEntry,
            OrdersAnalytics, RestaurantAnalytics,
        },
        delivery::{RiderList, SetLocationRequest, TrackData},
        orders::{
            AssignDeliveryRequest, CreateOrderRequest, OrderList, OrderWithLocation,
            RateOrderRequest, UpdateStatusRequest,
        },
        promos::{CreatePromoRequest, PromoList, UpdatePromoRequest},
        ratings::{RatingList, RatingStats, RecalculatedRating},
        restaurants::{
            CreateRestaurantRequest, RestaurantList, UpdateMenuRequest, UpdateRestaurantRequest,
        },
        subscriptions::{CreateSubscriptionRequest, SubscriptionData},
        wishlist::{WishlistData, WishlistMutationRequest},
    },
    models::{
        DeliveryAddress, DeliveryFix, GeoPoint, LivePoint, MenuItem, Order, OrderLine,
        OrderRatings, OrderStatus, Promo, QuestProgress, Rating, RatingEntry, RatingRole,
        Restaurant, Subscription, User, Wishlist, WishlistItem, WishlistItemType,
    },
    response::{ApiResponse, Meta},
    routes::{
        analytics, delivery, health, orders, params, promos, ratings, restaurants, subscriptions,
        wishlist,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        orders::create_order,
        orders::customer_orders,
        orders::restaurant_orders,
        orders::available_orders,
        orders::get_order,
        orders::update_status,
        orders::assign_delivery,
        orders::rate_order,
        delivery::set_location,
        delivery::track_order,
        delivery::free_riders,
        restaurants::create_restaurant,
        restaurants::list_restaurants,
        restaurants::owner_restaurants,
        restaurants::get_restaurant,
        restaurants::update_restaurant,
        restaurants::update_menu,
        restaurants::delete_restaurant,
        ratings::restaurant_ratings,
        ratings::restaurant_stats,
        ratings::recalculate,
        promos::active_promos,
        promos::restaurant_promos,
        promos::create_promo,
        promos::update_promo,
        promos::delete_promo,
        subscriptions::get_subscription,
        subscriptions::create_subscription,
        subscriptions::cancel_subscription,
        wishlist::get_wishlist,
        wishlist::add_item,
        wishlist::remove_item,
        analytics::restaurant_analytics,
        analytics::customer_analytics,
        analytics::delivery_analytics,
        analytics::orders_analytics
    ),
    components(
        schemas(
            Order,
            OrderLine,
            OrderStatus,
            OrderRatings,
            RatingEntry,
            RatingRole,
            DeliveryAddress,
            DeliveryFix,
            LivePoint,
            GeoPoint,
            MenuItem,
            Restaurant,
            Rating,
            Promo,
            Subscription,
            Wishlist,
            WishlistItem,
            WishlistItemType,
            QuestProgress,
            User,
            CreateOrderRequest,
            UpdateStatusRequest,
            AssignDeliveryRequest,
            RateOrderRequest,
            OrderList,
            OrderWithLocation,
            SetLocationRequest,
            TrackData,
            RiderList,
            CreateRestaurantRequest,
            UpdateRestaurantRequest,
            UpdateMenuRequest,
            RestaurantList,
            RatingList,
            RatingStats,
            RecalculatedRating,
            CreatePromoRequest,
            UpdatePromoRequest,
            PromoList,
            CreateSubscriptionRequest,
            SubscriptionData,
            WishlistMutationRequest,
            WishlistData,
            RestaurantAnalytics,
            CustomerAnalytics,
            DeliveryAnalytics,
            OrdersAnalytics,
            OrderHistoryEntry,
            DeliveryHistoryEntry,
            params::AnalyticsRange,
            health::HealthData,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<OrderWithLocation>,
            ApiResponse<TrackData>,
            ApiResponse<Restaurant>,
            ApiResponse<RestaurantList>,
            ApiResponse<PromoList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Orders", description = "Order lifecycle endpoints"),
        (name = "Delivery", description = "Rider location and tracking endpoints"),
        (name = "Restaurants", description = "Restaurant and menu endpoints"),
        (name = "Ratings", description = "Rating listing and aggregate endpoints"),
        (name = "Promos", description = "Promotion endpoints"),
        (name = "Subscriptions", description = "Meal subscription endpoints"),
        (name = "Wishlist", description = "Wishlist endpoints"),
        (name = "Analytics", description = "Aggregated analytics endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
