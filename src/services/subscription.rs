use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use uuid::Uuid;

use crate::entity::TokenSnapshot;
use crate::services::client_cache::ClientTokenCache;

pub type SnapshotCallback = Arc<dyn Fn(Arc<TokenSnapshot>) + Send + Sync>;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a polling subscription.
///
/// `unsubscribe` (or dropping the handle) stops the timer. A fetch already in
/// flight is abandoned and its result is never delivered.
pub struct Subscription {
    id: Uuid,
    active: Arc<AtomicBool>,
    stop_tx: Mutex<Option<mpsc::Sender<()>>>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn unsubscribe(&self) {
        self.active.store(false, Ordering::SeqCst);

        // Dropping the sender wakes the task with `None`
        if self
            .stop_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
        {
            info!("Token subscription {} stopped", self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Spawns the polling task behind a subscription
pub(crate) fn spawn(
    cache: Arc<ClientTokenCache>,
    callback: SnapshotCallback,
    period: Duration,
) -> Subscription {
    let id = Uuid::new_v4();
    let active = Arc::new(AtomicBool::new(true));
    let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);

    let task_active = active.clone();
    tokio::spawn(async move {
        // The first tick fires immediately and delivers the initial snapshot
        let mut ticker = interval(period.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            select! {
                _ = ticker.tick() => {
                    let snapshot = select! {
                        snapshot = cache.fetch_snapshot() => snapshot,
                        _ = stop_rx.recv() => break,
                    };

                    if !task_active.load(Ordering::SeqCst) {
                        break;
                    }
                    callback(snapshot);
                }
                _ = stop_rx.recv() => break,
            }
        }

        debug!("Token subscription {} task finished", id);
    });

    info!(
        "Token subscription {} started (interval {:?})",
        id, period
    );

    Subscription {
        id,
        active,
        stop_tx: Mutex::new(Some(stop_tx)),
    }
}
