use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;
use uuid::Uuid;

use axum_delivery_api::models::LivePoint;
use axum_delivery_api::tracking::{LocationSource, SourceError, Tracker, TrackerConfig};

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Fix,
    NoRider,
    Transport,
}

#[derive(Clone)]
struct ScriptedSource {
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicBool>,
    overlapped: Arc<AtomicBool>,
    mode: Arc<AtomicUsize>,
    delay: Duration,
}

impl ScriptedSource {
    fn new(delay: Duration, mode: Mode) -> Self {
        let source = Self {
            calls: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicBool::new(false)),
            overlapped: Arc::new(AtomicBool::new(false)),
            mode: Arc::new(AtomicUsize::new(0)),
            delay,
        };
        source.set_mode(mode);
        source
    }

    fn set_mode(&self, mode: Mode) {
        let value = match mode {
            Mode::Fix => 0,
            Mode::NoRider => 1,
            Mode::Transport => 2,
        };
        self.mode.store(value, Ordering::SeqCst);
    }

    fn mode(&self) -> Mode {
        match self.mode.load(Ordering::SeqCst) {
            0 => Mode::Fix,
            1 => Mode::NoRider,
            _ => Mode::Transport,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LocationSource for ScriptedSource {
    fn fetch(
        &self,
        _order_id: Uuid,
    ) -> impl Future<Output = Result<Option<LivePoint>, SourceError>> + Send {
        let this = self.clone();
        async move {
            if this.in_flight.swap(true, Ordering::SeqCst) {
                this.overlapped.store(true, Ordering::SeqCst);
            }
            tokio::time::sleep(this.delay).await;
            this.in_flight.store(false, Ordering::SeqCst);
            let n = this.calls.fetch_add(1, Ordering::SeqCst);

            match this.mode() {
                Mode::Fix => Ok(Some(LivePoint {
                    lat: n as f64,
                    lng: 0.0,
                    updated_at: Utc::now(),
                })),
                Mode::NoRider => Err(SourceError::NoRider),
                Mode::Transport => Err(SourceError::Transport("connection refused".into())),
            }
        }
    }
}

fn fast_config() -> TrackerConfig {
    TrackerConfig {
        poll_interval: Duration::from_millis(20),
        initial_backoff: Duration::from_millis(10),
        max_backoff: Duration::from_millis(40),
    }
}

#[tokio::test]
async fn publishes_fixes_until_stopped() {
    let source = ScriptedSource::new(Duration::from_millis(1), Mode::Fix);
    let tracker = Tracker::spawn(source.clone(), Uuid::new_v4(), fast_config());

    let mut updates = tracker.subscribe();
    timeout(Duration::from_secs(1), updates.changed())
        .await
        .expect("first fix arrives promptly")
        .expect("poller alive");
    assert!(updates.borrow_and_update().is_some());
    assert!(tracker.latest().is_some());

    tracker.stop();
    tokio::time::sleep(Duration::from_millis(60)).await;
    let calls_after_stop = source.calls();
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(
        source.calls(),
        calls_after_stop,
        "no fetches may run after stop"
    );
}

#[tokio::test]
async fn slow_fetches_never_overlap() {
    // Each fetch takes several intervals; late ticks must collapse instead
    // of piling up concurrent requests.
    let source = ScriptedSource::new(Duration::from_millis(50), Mode::Fix);
    let tracker = Tracker::spawn(
        source.clone(),
        Uuid::new_v4(),
        TrackerConfig {
            poll_interval: Duration::from_millis(10),
            ..fast_config()
        },
    );

    tokio::time::sleep(Duration::from_millis(300)).await;
    tracker.stop();

    assert!(!source.overlapped.load(Ordering::SeqCst));
    assert!(source.calls() >= 2, "poller should keep making progress");
}

#[tokio::test]
async fn missing_rider_reads_as_no_location() {
    let source = ScriptedSource::new(Duration::from_millis(1), Mode::NoRider);
    let tracker = Tracker::spawn(source.clone(), Uuid::new_v4(), fast_config());

    let mut updates = tracker.subscribe();
    timeout(Duration::from_secs(1), updates.changed())
        .await
        .expect("poller publishes even without a rider")
        .expect("poller alive");
    assert!(updates.borrow_and_update().is_none());

    // Once the rider reports, the next poll surfaces the fix.
    source.set_mode(Mode::Fix);
    let located = timeout(Duration::from_secs(1), async {
        loop {
            updates.changed().await.expect("poller alive");
            if let Some(point) = updates.borrow_and_update().clone() {
                return point;
            }
        }
    })
    .await
    .expect("fix after rider appears");
    assert_eq!(located.lng, 0.0);

    tracker.stop();
}

#[tokio::test]
async fn transport_failures_back_off() {
    let source = ScriptedSource::new(Duration::ZERO, Mode::Transport);
    let tracker = Tracker::spawn(
        source.clone(),
        Uuid::new_v4(),
        TrackerConfig {
            poll_interval: Duration::from_millis(10),
            initial_backoff: Duration::from_millis(80),
            max_backoff: Duration::from_millis(200),
        },
    );

    tokio::time::sleep(Duration::from_millis(250)).await;
    tracker.stop();

    // Without backoff ~25 attempts would fit in the window; with an
    // 80ms/160ms/200ms ladder only a handful do.
    assert!(
        source.calls() <= 6,
        "expected backoff to throttle retries, saw {}",
        source.calls()
    );
}
