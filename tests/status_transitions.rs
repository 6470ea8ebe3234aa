use axum_delivery_api::models::OrderStatus::{self, *};

#[test]
fn forward_steps_are_allowed() {
    assert!(Pending.can_transition(Confirmed));
    assert!(Confirmed.can_transition(Preparing));
    assert!(Preparing.can_transition(Ready));
    assert!(Ready.can_transition(OutForDelivery));
    assert!(OutForDelivery.can_transition(Delivered));
}

#[test]
fn skipping_steps_is_allowed() {
    // Progress may be observed late; a kitchen that never reported
    // "preparing" can still hand the order to a rider.
    assert!(Pending.can_transition(Ready));
    assert!(Pending.can_transition(Delivered));
    assert!(Confirmed.can_transition(OutForDelivery));
}

#[test]
fn backward_steps_are_rejected() {
    assert!(!Confirmed.can_transition(Pending));
    assert!(!Ready.can_transition(Preparing));
    assert!(!OutForDelivery.can_transition(Confirmed));
    assert!(!Delivered.can_transition(OutForDelivery));
}

#[test]
fn cancel_is_reachable_from_any_live_status() {
    for status in [Pending, Confirmed, Preparing, Ready, OutForDelivery] {
        assert!(status.can_transition(Cancelled), "{status} should cancel");
    }
}

#[test]
fn terminal_statuses_only_accept_themselves() {
    for terminal in [Delivered, Cancelled] {
        assert!(terminal.is_terminal());
        assert!(terminal.can_transition(terminal));
        for next in [Pending, Confirmed, Preparing, Ready, OutForDelivery] {
            assert!(
                !terminal.can_transition(next),
                "{terminal} must not move to {next}"
            );
        }
    }
    assert!(!Delivered.can_transition(Cancelled));
    assert!(!Cancelled.can_transition(Delivered));
}

#[test]
fn same_status_is_an_idempotent_no_op() {
    for status in [
        Pending,
        Confirmed,
        Preparing,
        Ready,
        OutForDelivery,
        Delivered,
        Cancelled,
    ] {
        assert!(status.can_transition(status));
    }
}

#[test]
fn terminal_statuses_are_not_trackable() {
    assert!(Pending.is_trackable());
    assert!(OutForDelivery.is_trackable());
    assert!(!Delivered.is_trackable());
    assert!(!Cancelled.is_trackable());
}

#[test]
fn parses_the_fixed_vocabulary() {
    for status in [
        Pending,
        Confirmed,
        Preparing,
        Ready,
        OutForDelivery,
        Delivered,
        Cancelled,
    ] {
        let parsed: OrderStatus = status.as_str().parse().expect("round trip");
        assert_eq!(parsed, status);
    }
    assert_eq!(OutForDelivery.to_string(), "out_for_delivery");
}

#[test]
fn rejects_unknown_status_strings() {
    assert!("invalidStatus".parse::<OrderStatus>().is_err());
    assert!("PENDING".parse::<OrderStatus>().is_err());
    assert!("".parse::<OrderStatus>().is_err());
}
