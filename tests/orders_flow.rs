use axum_delivery_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        delivery::SetLocationRequest,
        orders::{
            AssignDeliveryRequest, CreateOrderRequest, RateOrderRequest, UpdateStatusRequest,
        },
    },
    error::AppError,
    models::{DeliveryAddress, OrderLine, OrderStatus},
    services::{location_service, order_service, rating_service},
    state::AppState,
    tracking::{ServiceLocationSource, Tracker, TrackerConfig},
};
use std::time::Duration;
use uuid::Uuid;

// Integration flow: customer places an order -> dispatcher assigns a rider
// -> rider reports fixes -> customer tracks -> order delivered and rated.
#[tokio::test]
async fn order_lifecycle_with_tracking_and_rating() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let customer_id = Uuid::new_v4();
    let restaurant_id = Uuid::new_v4();
    let rider_id = Uuid::new_v4();

    let created = order_service::create_order(&state, order_request(customer_id, restaurant_id))
        .await?
        .data
        .unwrap();
    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.total_amount, 2000);
    assert!(created.delivery_partner_id.is_none());

    // The delivery-partner feed sees it while it is pending.
    let pending = order_service::list_pending(&state).await?.data.unwrap();
    assert!(pending.orders.iter().any(|o| o.id == created.id));

    // No partner yet: reads join no live location and tracking is a 400.
    let fetched = order_service::get_order(&state, created.id).await?.data.unwrap();
    assert!(fetched.live_location.is_none());
    let err = order_service::track_order(&state, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    order_service::assign_partner(
        &state,
        created.id,
        AssignDeliveryRequest {
            delivery_partner_id: Some(rider_id),
        },
    )
    .await?;

    // Rider reports; the customer read now carries the fix.
    location_service::set_location(
        &state,
        SetLocationRequest {
            rider_id: Some(rider_id),
            order_id: Some(created.id),
            lat: Some(1.0),
            lng: Some(1.0),
        },
    )
    .await?;

    let fetched = order_service::get_order(&state, created.id).await?.data.unwrap();
    let live = fetched.live_location.expect("live location after fix");
    assert_eq!(live.lat, 1.0);

    let track = order_service::track_order(&state, created.id).await?;
    assert_eq!(track.location.expect("tracked fix").lng, 1.0);

    // The polling client surfaces the same joined view.
    let tracker = Tracker::spawn(
        ServiceLocationSource::new(state.clone()),
        created.id,
        TrackerConfig {
            poll_interval: Duration::from_millis(50),
            ..TrackerConfig::default()
        },
    );
    let mut updates = tracker.subscribe();
    let polled = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            updates.changed().await.expect("poller alive");
            if let Some(point) = updates.borrow_and_update().clone() {
                return point;
            }
        }
    })
    .await
    .expect("tracker surfaces the fix");
    assert_eq!(polled.lat, 1.0);
    tracker.stop();

    let delivered = order_service::update_status(&state, created.id, status("delivered"))
        .await?
        .data
        .unwrap();
    let delivered_at = delivered.delivered_at.expect("delivered_at set");
    assert!(delivered_at >= delivered.created_at);

    // Repeating the same status neither errors nor resets the timestamp.
    let repeated = order_service::update_status(&state, created.id, status("delivered"))
        .await?
        .data
        .unwrap();
    assert_eq!(repeated.delivered_at, Some(delivered_at));

    // Delivered orders stop exposing a live location.
    let fetched = order_service::get_order(&state, created.id).await?.data.unwrap();
    assert!(fetched.live_location.is_none());

    let rated = order_service::rate_order(&state, created.id, rate(customer_id, 5))
        .await?
        .data
        .unwrap();
    assert_eq!(rated.ratings.customer.expect("customer rating").rating, 5);

    let err = order_service::rate_order(&state, created.id, rate(customer_id, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // The flat rating row feeds the aggregate.
    let aggregate = rating_service::recalculate_restaurant_rating(&state, restaurant_id).await?;
    assert_eq!(aggregate.total_ratings, 1);
    assert_eq!(aggregate.average_rating, 5.0);

    Ok(())
}

#[tokio::test]
async fn invalid_creation_requests_write_nothing() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let customer_id = Uuid::new_v4();
    let request = CreateOrderRequest {
        items: None,
        ..order_request(customer_id, Uuid::new_v4())
    };

    let err = order_service::create_order(&state, request).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let orders = order_service::list_by_customer(&state, customer_id)
        .await?
        .data
        .unwrap();
    assert!(orders.orders.is_empty(), "rejected create must not write");

    Ok(())
}

#[tokio::test]
async fn status_updates_enforce_the_transition_rules() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    // Unknown values are rejected before storage is touched: even a
    // nonexistent order id yields 400, not 404.
    let err = order_service::update_status(&state, Uuid::new_v4(), status("invalidStatus"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let order = order_service::create_order(&state, order_request(Uuid::new_v4(), Uuid::new_v4()))
        .await?
        .data
        .unwrap();

    order_service::update_status(&state, order.id, status("preparing")).await?;

    // Backwards is off the table.
    let err = order_service::update_status(&state, order.id, status("pending"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Terminal means terminal.
    order_service::update_status(&state, order.id, status("cancelled")).await?;
    let err = order_service::update_status(&state, order.id, status("out_for_delivery"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}

#[tokio::test]
async fn rating_is_owner_only_and_delivery_gated() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let customer_id = Uuid::new_v4();
    let order = order_service::create_order(&state, order_request(customer_id, Uuid::new_v4()))
        .await?
        .data
        .unwrap();

    // Wrong customer is forbidden regardless of status.
    let err = order_service::rate_order(&state, order.id, rate(Uuid::new_v4(), 5))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // The owner still cannot rate before delivery.
    let err = order_service::rate_order(&state, order.id, rate(customer_id, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Missing orders are a 404.
    let err = order_service::rate_order(&state, Uuid::new_v4(), rate(customer_id, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    Ok(())
}

fn order_request(customer_id: Uuid, restaurant_id: Uuid) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id: Some(customer_id),
        restaurant_id: Some(restaurant_id),
        items: Some(vec![OrderLine {
            item_id: Uuid::new_v4(),
            name: "Margherita".into(),
            price: 1000,
            quantity: 2,
        }]),
        total_amount: Some(2000),
        delivery_address: Some(DeliveryAddress {
            street: "12 Canal St".into(),
            city: None,
            state: None,
            postal_code: None,
            notes: None,
        }),
    }
}

fn status(value: &str) -> UpdateStatusRequest {
    UpdateStatusRequest {
        status: Some(value.to_string()),
    }
}

fn rate(customer_id: Uuid, rating: i32) -> RateOrderRequest {
    RateOrderRequest {
        customer_id: Some(customer_id),
        rating: Some(rating),
        review: Some("Great!".into()),
    }
}

// Tests share one database; every test works with fresh ids instead of
// truncating, so they can run concurrently.
async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    Ok(Some(AppState { pool, orm }))
}
