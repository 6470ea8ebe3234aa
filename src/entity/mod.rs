pub mod delivery_locations;
pub mod orders;
pub mod promos;
pub mod ratings;
pub mod restaurants;
pub mod subscriptions;
pub mod users;
pub mod wishlists;

pub use delivery_locations::Entity as DeliveryLocations;
pub use orders::Entity as Orders;
pub use promos::Entity as Promos;
pub use ratings::Entity as Ratings;
pub use restaurants::Entity as Restaurants;
pub use subscriptions::Entity as Subscriptions;
pub use users::Entity as Users;
pub use wishlists::Entity as Wishlists;
