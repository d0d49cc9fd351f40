//! Lottery status poller
//!
//! Fetches a lottery's status once immediately and then on every interval tick,
//! publishing the latest snapshot on a watch channel. Each fetch runs as its own
//! task: stopping the poller stops scheduling but never aborts a request that is
//! already in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::models::StatusSnapshot;
use crate::services::LotteryService;

/// What a live view renders: the last good snapshot plus request state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollState {
    pub lottery_id: Option<String>,
    pub snapshot: Option<StatusSnapshot>,
    pub loading: bool,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct LotteryPoller {
    service: LotteryService,
    interval: Duration,
    state: Arc<watch::Sender<PollState>>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl LotteryPoller {
    pub fn new(service: LotteryService, interval: Duration) -> Self {
        let (tx, _rx) = watch::channel(PollState::default());
        Self {
            service,
            interval,
            state: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> PollState {
        self.state.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |t| !t.is_finished())
    }

    /// Point the poller at a lottery. An empty id stops polling.
    pub fn set_lottery(&mut self, lottery_id: &str) {
        self.stop();

        let lottery_id = lottery_id.trim().to_string();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.state.send_modify(|state| {
            *state = PollState {
                lottery_id: if lottery_id.is_empty() { None } else { Some(lottery_id.clone()) },
                ..PollState::default()
            };
        });

        if lottery_id.is_empty() {
            debug!("Lottery poller idle");
            return;
        }

        debug!(lottery_id = %lottery_id, interval_ms = self.interval.as_millis() as u64, "Starting lottery poller");

        let service = self.service.clone();
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let interval = self.interval;

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                spawn_fetch(
                    service.clone(),
                    lottery_id.clone(),
                    generation,
                    Arc::clone(&current),
                    Arc::clone(&state),
                );
            }
        }));
    }

    /// Stop scheduling further requests
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Lottery poller stopped");
        }
    }
}

impl Drop for LotteryPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_fetch(
    service: LotteryService,
    lottery_id: String,
    generation: u64,
    current: Arc<AtomicU64>,
    state: Arc<watch::Sender<PollState>>,
) {
    state.send_modify(|s| s.loading = true);

    tokio::spawn(async move {
        let result = service.status(&lottery_id).await;

        // Responses for a lottery the poller has moved away from are dropped;
        // overlapping requests for the same lottery race and the last one wins.
        if current.load(Ordering::SeqCst) != generation {
            debug!(lottery_id = %lottery_id, "Discarding status for a previous lottery");
            return;
        }

        state.send_modify(|s| {
            s.loading = false;
            match result {
                Ok(snapshot) => {
                    s.snapshot = Some(snapshot);
                    s.error = None;
                    s.updated_at = Some(Utc::now());
                }
                Err(e) => {
                    warn!(lottery_id = %lottery_id, error = %e, "Lottery status poll failed");
                    s.error = Some(e.user_message());
                }
            }
        });
    });
}
