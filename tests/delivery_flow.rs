use axum_delivery_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        delivery::SetLocationRequest,
        orders::{AssignDeliveryRequest, CreateOrderRequest, UpdateStatusRequest},
    },
    entity::users,
    models::{DeliveryAddress, OrderLine},
    services::{location_service, order_service, user_service},
    state::AppState,
};
use chrono::Utc;
use sea_orm::ActiveModelTrait;
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

#[tokio::test]
async fn location_store_keeps_one_fix_per_rider() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let rider_id = Uuid::new_v4();
    let order_id = Uuid::new_v4();

    // Nothing reported yet.
    assert!(location_service::location_by_rider(&state, rider_id)
        .await?
        .is_none());
    assert!(location_service::location_by_order(&state, order_id)
        .await?
        .is_none());

    location_service::set_location(
        &state,
        SetLocationRequest {
            rider_id: Some(rider_id),
            order_id: None,
            lat: Some(10.0),
            lng: Some(20.0),
        },
    )
    .await?;

    let fix = location_service::location_by_rider(&state, rider_id)
        .await?
        .expect("fix after report");
    assert_eq!(fix.lat, 10.0);
    assert_eq!(fix.lng, 20.0);
    assert!(fix.order_id.is_none());

    // Still nothing tagged with the order.
    assert!(location_service::location_by_order(&state, order_id)
        .await?
        .is_none());

    // A second fix overwrites the first and tags the order.
    location_service::set_location(
        &state,
        SetLocationRequest {
            rider_id: Some(rider_id),
            order_id: Some(order_id),
            lat: Some(11.0),
            lng: Some(21.0),
        },
    )
    .await?;

    let fix = location_service::location_by_order(&state, order_id)
        .await?
        .expect("fix tagged with order");
    assert_eq!(fix.rider_id, rider_id);
    assert_eq!(fix.lat, 11.0);

    let fix = location_service::location_by_rider(&state, rider_id)
        .await?
        .expect("latest fix");
    assert_eq!(fix.lat, 11.0, "old fix must be gone");

    Ok(())
}

#[tokio::test]
async fn free_rider_feed_tracks_live_assignments() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let rider_id = seed_rider(&state).await?;

    let free = user_service::list_free_riders(&state).await?.data.unwrap();
    assert!(free.riders.iter().any(|r| r.id == rider_id));

    let order = order_service::create_order(
        &state,
        CreateOrderRequest {
            customer_id: Some(Uuid::new_v4()),
            restaurant_id: Some(Uuid::new_v4()),
            items: Some(vec![OrderLine {
                item_id: Uuid::new_v4(),
                name: "Pad Thai".into(),
                price: 1100,
                quantity: 1,
            }]),
            total_amount: Some(1100),
            delivery_address: Some(DeliveryAddress {
                street: "1 Main St".into(),
                city: None,
                state: None,
                postal_code: None,
                notes: None,
            }),
        },
    )
    .await?
    .data
    .unwrap();

    order_service::assign_partner(
        &state,
        order.id,
        AssignDeliveryRequest {
            delivery_partner_id: Some(rider_id),
        },
    )
    .await?;

    // On a live order: no longer free.
    let free = user_service::list_free_riders(&state).await?.data.unwrap();
    assert!(!free.riders.iter().any(|r| r.id == rider_id));

    order_service::update_status(
        &state,
        order.id,
        UpdateStatusRequest {
            status: Some("delivered".into()),
        },
    )
    .await?;

    // Delivery done: free again.
    let free = user_service::list_free_riders(&state).await?.data.unwrap();
    assert!(free.riders.iter().any(|r| r.id == rider_id));

    Ok(())
}

async fn seed_rider(state: &AppState) -> anyhow::Result<Uuid> {
    let id = Uuid::new_v4();
    users::ActiveModel {
        id: Set(id),
        name: Set("Test Rider".into()),
        email: Set(format!("rider-{id}@example.com")),
        role: Set("delivery".into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(id)
}

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
