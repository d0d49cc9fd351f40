//! Spin controller
//!
//! Client-side state machine for the live draw:
//!
//! ```text
//! Idle -> Ready(n) -> Spinning -> Ready(n+1) -> ... -> Complete(winners)
//! ```
//!
//! The spin animation starts as soon as the operator triggers it and always
//! runs for the configured duration, however quickly the server answers. When
//! it ends the participants are re-fetched once and the state is reconciled
//! against what the server reports.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::models::lottery::winners_of;
use crate::models::{LotteryStatus, Participant, SpinResult};
use crate::services::LotteryService;
use crate::utils::errors::{RetailChampionsError, Result};
use crate::utils::logging;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawState {
    /// No lottery selected
    Idle,
    /// Waiting for the operator to spin
    Ready {
        lottery_id: String,
        round: u32,
        remaining: u32,
    },
    /// Animation playing; the spin trigger is disabled
    Spinning {
        lottery_id: String,
        round: u32,
    },
    /// The server reported winners
    Complete {
        lottery_id: String,
        winners: Vec<Participant>,
    },
}

impl DrawState {
    pub fn name(&self) -> &'static str {
        match self {
            DrawState::Idle => "idle",
            DrawState::Ready { .. } => "ready",
            DrawState::Spinning { .. } => "spinning",
            DrawState::Complete { .. } => "complete",
        }
    }

    pub fn lottery_id(&self) -> Option<&str> {
        match self {
            DrawState::Idle => None,
            DrawState::Ready { lottery_id, .. }
            | DrawState::Spinning { lottery_id, .. }
            | DrawState::Complete { lottery_id, .. } => Some(lottery_id),
        }
    }

    fn round(&self) -> Option<u32> {
        match self {
            DrawState::Ready { round, .. } | DrawState::Spinning { round, .. } => Some(*round),
            _ => None,
        }
    }
}

/// What one completed spin produced
#[derive(Debug, Clone, PartialEq)]
pub struct SpinOutcome {
    pub round: u32,
    pub eliminated: Vec<Participant>,
    pub remaining: u32,
    pub winners: Vec<Participant>,
}

impl SpinOutcome {
    pub fn is_complete(&self) -> bool {
        !self.winners.is_empty()
    }
}

pub struct SpinController {
    service: LotteryService,
    spin_duration: Duration,
    state: watch::Sender<DrawState>,
    participants: Vec<Participant>,
    last_error: Option<String>,
}

impl SpinController {
    pub fn new(service: LotteryService, spin_duration: Duration) -> Self {
        let (tx, _rx) = watch::channel(DrawState::Idle);
        Self {
            service,
            spin_duration,
            state: tx,
            participants: Vec::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> DrawState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DrawState> {
        self.state.subscribe()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn spin_duration(&self) -> Duration {
        self.spin_duration
    }

    /// The spin trigger is enabled only in `Ready`
    pub fn can_spin(&self) -> bool {
        matches!(*self.state.borrow(), DrawState::Ready { .. })
    }

    fn transition(&self, next: DrawState) {
        let previous = self.state.borrow().clone();
        let lottery_id = next
            .lottery_id()
            .or(previous.lottery_id())
            .unwrap_or_default()
            .to_string();
        logging::log_lottery_transition(&lottery_id, previous.name(), next.name(), next.round());
        self.state.send_replace(next);
    }

    /// Load a lottery and enter `Ready`, or `Complete` if it already finished
    pub async fn load(&mut self, lottery_id: &str) -> Result<DrawState> {
        let lottery_id = lottery_id.trim();
        if lottery_id.is_empty() {
            return Err(RetailChampionsError::InvalidInput("Lottery id is required".to_string()));
        }
        if matches!(*self.state.borrow(), DrawState::Spinning { .. }) {
            return Err(RetailChampionsError::InvalidStateTransition {
                from: "spinning".to_string(),
                to: "ready".to_string(),
            });
        }

        let (snapshot, participants) = futures::try_join!(
            self.service.status(lottery_id),
            self.service.participants(lottery_id)
        )?;
        self.participants = participants;
        self.last_error = None;

        let mut winners = winners_of(&self.participants);
        if winners.is_empty() && snapshot.status == LotteryStatus::Completed {
            winners = self.service.winners(lottery_id).await?;
        }

        let next = if snapshot.status == LotteryStatus::Completed || !winners.is_empty() {
            DrawState::Complete {
                lottery_id: lottery_id.to_string(),
                winners,
            }
        } else {
            DrawState::Ready {
                lottery_id: lottery_id.to_string(),
                round: snapshot.current_round,
                remaining: snapshot.remaining_count,
            }
        };

        self.transition(next.clone());
        Ok(next)
    }

    /// Execute one spin.
    ///
    /// Fails fast, restoring `Ready`, if the server rejects the spin. On success
    /// waits out the animation, re-fetches participants once and settles in
    /// `Ready` for the next round or `Complete`.
    pub async fn spin(&mut self) -> Result<SpinOutcome> {
        let (lottery_id, round, remaining) = match self.state() {
            DrawState::Ready { lottery_id, round, remaining } => (lottery_id, round, remaining),
            other => {
                return Err(RetailChampionsError::InvalidStateTransition {
                    from: other.name().to_string(),
                    to: "spinning".to_string(),
                });
            }
        };

        let animation_ends = Instant::now() + self.spin_duration;
        self.transition(DrawState::Spinning {
            lottery_id: lottery_id.clone(),
            round,
        });

        let spin = match self.service.spin(&lottery_id).await {
            Ok(spin) => spin,
            Err(e) => {
                warn!(lottery_id = %lottery_id, error = %e, "Spin rejected, aborting animation");
                self.last_error = Some(e.user_message());
                self.transition(DrawState::Ready {
                    lottery_id,
                    round,
                    remaining,
                });
                return Err(e);
            }
        };

        tokio::time::sleep_until(animation_ends).await;

        match self.service.participants(&lottery_id).await {
            Ok(participants) => {
                self.participants = participants;
                self.last_error = None;
            }
            Err(e) => {
                warn!(lottery_id = %lottery_id, error = %e, "Participant refresh failed after spin");
                self.last_error = Some(e.user_message());
            }
        }

        let outcome = self.reconcile(round, spin);
        let next = if outcome.is_complete() {
            info!(lottery_id = %lottery_id, winners = outcome.winners.len(), "Draw complete");
            DrawState::Complete {
                lottery_id,
                winners: outcome.winners.clone(),
            }
        } else {
            DrawState::Ready {
                lottery_id,
                round: outcome.round,
                remaining: outcome.remaining,
            }
        };
        self.transition(next);

        Ok(outcome)
    }

    /// Winners from a complete spin response take precedence; otherwise any
    /// participant the server now marks as winner completes the draw.
    fn reconcile(&self, previous_round: u32, spin: SpinResult) -> SpinOutcome {
        let winners = if spin.is_complete && !spin.winners.is_empty() {
            spin.winners
        } else {
            winners_of(&self.participants)
        };

        SpinOutcome {
            round: spin.round.max(previous_round + 1),
            eliminated: spin.eliminated_users,
            remaining: spin.remaining_count,
            winners,
        }
    }

    /// Discard all local draw state. Server data is untouched.
    pub fn reset(&mut self) -> Result<()> {
        if matches!(*self.state.borrow(), DrawState::Spinning { .. }) {
            return Err(RetailChampionsError::InvalidStateTransition {
                from: "spinning".to_string(),
                to: "idle".to_string(),
            });
        }
        self.participants.clear();
        self.last_error = None;
        self.transition(DrawState::Idle);
        Ok(())
    }
}
