use axum_delivery_api::dto::{
    delivery::SetLocationRequest,
    orders::{CreateOrderRequest, RateOrderRequest},
    promos::CreatePromoRequest,
    subscriptions::CreateSubscriptionRequest,
    wishlist::WishlistMutationRequest,
};
use axum_delivery_api::models::{DeliveryAddress, OrderLine};
use chrono::Utc;
use uuid::Uuid;

fn address() -> DeliveryAddress {
    DeliveryAddress {
        street: "12 Canal St".into(),
        city: Some("Amsterdam".into()),
        state: None,
        postal_code: Some("1011".into()),
        notes: None,
    }
}

fn lines() -> Vec<OrderLine> {
    vec![OrderLine {
        item_id: Uuid::new_v4(),
        name: "Margherita".into(),
        price: 1000,
        quantity: 2,
    }]
}

fn full_order_request() -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id: Some(Uuid::new_v4()),
        restaurant_id: Some(Uuid::new_v4()),
        items: Some(lines()),
        total_amount: Some(2000),
        delivery_address: Some(address()),
    }
}

#[test]
fn complete_order_request_passes() {
    let new_order = full_order_request().validate().expect("valid request");
    assert_eq!(new_order.total_amount, 2000);
    assert_eq!(new_order.items.len(), 1);
}

#[test]
fn each_missing_order_field_is_named() {
    let cases: Vec<(&str, CreateOrderRequest)> = vec![
        (
            "customer_id",
            CreateOrderRequest {
                customer_id: None,
                ..full_order_request()
            },
        ),
        (
            "restaurant_id",
            CreateOrderRequest {
                restaurant_id: None,
                ..full_order_request()
            },
        ),
        (
            "items",
            CreateOrderRequest {
                items: None,
                ..full_order_request()
            },
        ),
        (
            "total_amount",
            CreateOrderRequest {
                total_amount: None,
                ..full_order_request()
            },
        ),
        (
            "delivery_address",
            CreateOrderRequest {
                delivery_address: None,
                ..full_order_request()
            },
        ),
    ];

    for (field, request) in cases {
        let err = request.validate().expect_err("missing field must fail");
        assert!(err.contains(field), "error {err:?} should mention {field}");
    }
}

#[test]
fn empty_item_list_is_rejected() {
    let request = CreateOrderRequest {
        items: Some(Vec::new()),
        ..full_order_request()
    };
    assert!(request.validate().is_err());
}

#[test]
fn rating_must_be_one_to_five() {
    let customer = Uuid::new_v4();
    for rating in [1, 3, 5] {
        let request = RateOrderRequest {
            customer_id: Some(customer),
            rating: Some(rating),
            review: None,
        };
        assert!(request.validate().is_ok());
    }
    for rating in [0, 6, -1] {
        let request = RateOrderRequest {
            customer_id: Some(customer),
            rating: Some(rating),
            review: None,
        };
        assert!(request.validate().is_err(), "rating {rating} should fail");
    }

    let missing_rating = RateOrderRequest {
        customer_id: Some(customer),
        rating: None,
        review: None,
    };
    assert!(missing_rating.validate().is_err());

    let missing_customer = RateOrderRequest {
        customer_id: None,
        rating: Some(5),
        review: None,
    };
    assert!(missing_customer.validate().is_err());
}

#[test]
fn location_fix_requires_rider_and_finite_coordinates() {
    let missing_rider = SetLocationRequest {
        rider_id: None,
        order_id: None,
        lat: Some(1.0),
        lng: Some(2.0),
    };
    let err = missing_rider.validate().expect_err("rider required");
    assert!(err.contains("rider_id"));

    let nan = SetLocationRequest {
        rider_id: Some(Uuid::new_v4()),
        order_id: None,
        lat: Some(f64::NAN),
        lng: Some(2.0),
    };
    assert!(nan.validate().is_err());

    let valid = SetLocationRequest {
        rider_id: Some(Uuid::new_v4()),
        order_id: Some(Uuid::new_v4()),
        lat: Some(52.37),
        lng: Some(4.89),
    };
    let fix = valid.validate().expect("valid fix");
    assert_eq!(fix.lat, 52.37);
    assert!(fix.order_id.is_some());
}

#[test]
fn promo_validation_checks_discount_range() {
    let base = || CreatePromoRequest {
        restaurant_id: Some(Uuid::new_v4()),
        restaurant_name: Some("Demo Kitchen".into()),
        title: Some("Lunch deal".into()),
        description: None,
        discount_percent: Some(20),
        code: Some("LUNCH20".into()),
        valid_until: Some(Utc::now()),
    };

    assert!(base().validate().is_ok());

    let no_title = CreatePromoRequest {
        title: None,
        ..base()
    };
    assert!(no_title.validate().is_err());

    for discount in [0, 101] {
        let out_of_range = CreatePromoRequest {
            discount_percent: Some(discount),
            ..base()
        };
        assert!(out_of_range.validate().is_err());
    }
}

#[test]
fn subscription_plan_type_is_a_fixed_set() {
    for plan in ["weekly", "monthly"] {
        let request = CreateSubscriptionRequest {
            customer_id: Some(Uuid::new_v4()),
            plan_type: Some(plan.into()),
            preferences: None,
        };
        assert!(request.validate().is_ok());
    }

    let daily = CreateSubscriptionRequest {
        customer_id: Some(Uuid::new_v4()),
        plan_type: Some("daily".into()),
        preferences: None,
    };
    assert!(daily.validate().is_err());
}

#[test]
fn wishlist_mutation_validates_item_type() {
    let restaurant = WishlistMutationRequest {
        item_type: Some("restaurant".into()),
        item_id: Some(Uuid::new_v4()),
    };
    assert!(restaurant.validate().is_ok());

    let bogus = WishlistMutationRequest {
        item_type: Some("drink".into()),
        item_id: Some(Uuid::new_v4()),
    };
    assert!(bogus.validate().is_err());

    let missing_id = WishlistMutationRequest {
        item_type: Some("dish".into()),
        item_id: None,
    };
    assert!(missing_id.validate().is_err());
}
