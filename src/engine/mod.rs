//! Timer engine module.
//!
//! - `timer`: State transitions and event emission
//! - `notifier`: Best-effort completion alert
//! - `driver`: Real-time tick scheduling

pub mod driver;
pub mod notifier;
pub mod timer;

pub use driver::{TimerDriver, MIN_TICK_PERIOD, TICK_PERIOD};
pub use notifier::{CompletionNotifier, SharedSoundPlayer};
pub use timer::{TimerEngine, TimerEvent};
