//! Live draw module
//!
//! Status polling, the spin state machine and their terminal rendering

pub mod controller;
pub mod display;
pub mod poller;

pub use controller::{DrawState, SpinController, SpinOutcome};
pub use display::{winner_cards, WinnerCard};
pub use poller::{LotteryPoller, PollState};
