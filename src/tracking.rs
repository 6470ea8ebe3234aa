//! Client-side live tracking: a cancellable poller that follows one
//! order's courier while a tracking view is open.
//!
//! The poller fetches immediately on start, then on a fixed cadence. A
//! fetch slower than the cadence is never overlapped; late ticks collapse
//! into the next one. Transport failures back off exponentially and reset
//! on the next success. Stopping aborts the task, so an in-flight response
//! cannot land after the view is gone.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::LivePoint;
use crate::services::order_service;
use crate::state::AppState;

/// Where the poller reads fixes from. The in-process implementation sits
/// on top of the order service; an HTTP transport fits behind the same
/// seam.
pub trait LocationSource: Send + Sync + 'static {
    fn fetch(
        &self,
        order_id: Uuid,
    ) -> impl Future<Output = Result<Option<LivePoint>, SourceError>> + Send;
}

/// Fetch failures, split by how the poller reacts to them.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The order no longer exists. Rendered as "no location", not an error.
    #[error("order gone")]
    OrderGone,
    /// No rider has been assigned yet. Also just "no location".
    #[error("no rider assigned")]
    NoRider,
    /// The backend could not be reached; triggers backoff.
    #[error("transport failure: {0}")]
    Transport(String),
}

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub poll_interval: Duration,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(60),
        }
    }
}

/// Handle to a running poll task, bound to one tracking view.
pub struct Tracker {
    task: JoinHandle<()>,
    updates: watch::Receiver<Option<LivePoint>>,
}

impl Tracker {
    pub fn spawn<S: LocationSource>(source: S, order_id: Uuid, config: TrackerConfig) -> Self {
        let (tx, rx) = watch::channel(None);
        let task = tokio::spawn(poll_loop(source, order_id, config, tx));
        Self { task, updates: rx }
    }

    /// The most recent published fix, if any.
    pub fn latest(&self) -> Option<LivePoint> {
        self.updates.borrow().clone()
    }

    /// A receiver that resolves whenever a new fix is published.
    pub fn subscribe(&self) -> watch::Receiver<Option<LivePoint>> {
        self.updates.clone()
    }

    /// Detach from the view. Aborts the task mid-await if necessary.
    pub fn stop(self) {
        self.task.abort();
    }
}

async fn poll_loop<S: LocationSource>(
    source: S,
    order_id: Uuid,
    config: TrackerConfig,
    tx: watch::Sender<Option<LivePoint>>,
) {
    let mut ticker = time::interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut backoff = config.initial_backoff;

    loop {
        // First tick fires immediately; the view gets a fix without
        // waiting a full interval.
        ticker.tick().await;

        match source.fetch(order_id).await {
            Ok(point) => {
                backoff = config.initial_backoff;
                if tx.send(point).is_err() {
                    // Every receiver dropped; nobody is watching anymore.
                    return;
                }
            }
            Err(SourceError::OrderGone) | Err(SourceError::NoRider) => {
                backoff = config.initial_backoff;
                if tx.send(None).is_err() {
                    return;
                }
            }
            Err(SourceError::Transport(reason)) => {
                tracing::warn!(%order_id, %reason, "location fetch failed, backing off");
                time::sleep(backoff).await;
                backoff = (backoff * 2).min(config.max_backoff);
                ticker.reset();
            }
        }
    }
}

/// Reads fixes straight from the order service; what a tracking view uses
/// when it lives in the same process as the API.
#[derive(Clone)]
pub struct ServiceLocationSource {
    state: AppState,
}

impl ServiceLocationSource {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl LocationSource for ServiceLocationSource {
    fn fetch(
        &self,
        order_id: Uuid,
    ) -> impl Future<Output = Result<Option<LivePoint>, SourceError>> + Send {
        let state = self.state.clone();
        async move {
            match order_service::track_order(&state, order_id).await {
                Ok(data) => Ok(data.location),
                Err(AppError::NotFound) => Err(SourceError::OrderGone),
                Err(AppError::BadRequest(_)) => Err(SourceError::NoRider),
                Err(err) => Err(SourceError::Transport(err.to_string())),
            }
        }
    }
}
