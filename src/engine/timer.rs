//! Timer engine.
//!
//! This module provides the synchronous core of the timer:
//! - The transition table (toggle, reset, switch mode, tick)
//! - Event emission for the presentation layer
//! - The completion alert, fired once per finished countdown
//!
//! Scheduling lives in [`super::driver`]; the engine never sleeps.

use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::types::{TickOutcome, TimerMode, TimerState, TimerView};

use super::notifier::CompletionNotifier;

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        /// Current mode
        mode: TimerMode,
        /// Remaining seconds at start
        remaining_seconds: u32,
    },
    /// Countdown paused
    Paused {
        /// Current mode
        mode: TimerMode,
        /// Remaining seconds at pause
        remaining_seconds: u32,
    },
    /// Countdown reset to the full duration
    Reset {
        /// Current mode
        mode: TimerMode,
    },
    /// Mode switched (always a full reset)
    ModeSwitched {
        /// New mode
        mode: TimerMode,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// Countdown reached zero
    Completed {
        /// Mode that finished
        mode: TimerMode,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the timer state.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    /// Completion alert
    notifier: CompletionNotifier,
}

impl TimerEngine {
    /// Creates an engine in the session start state (Work, 25:00, idle).
    pub fn new(event_tx: mpsc::UnboundedSender<TimerEvent>, notifier: CompletionNotifier) -> Self {
        Self::with_state(TimerState::new(), event_tx, notifier)
    }

    /// Creates an engine from an existing state.
    ///
    /// `remaining_seconds` is clamped to the mode's total, and a state with
    /// no time left is never running.
    pub fn with_state(
        mut state: TimerState,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
        notifier: CompletionNotifier,
    ) -> Self {
        state.remaining_seconds = state.remaining_seconds.min(state.total_seconds());
        if state.remaining_seconds == 0 {
            state.is_running = false;
        }

        Self {
            state,
            event_tx,
            notifier,
        }
    }

    /// Starts or pauses the countdown.
    ///
    /// A finished countdown stays finished until reset or a mode switch.
    pub fn toggle_run(&mut self) -> TimerView {
        let was_running = self.state.is_running;
        self.state.toggle_run();

        let mode = self.state.mode;
        let remaining_seconds = self.state.remaining_seconds;

        match (was_running, self.state.is_running) {
            (false, true) => {
                info!("Timer started: {} at {}s", mode, remaining_seconds);
                self.emit(TimerEvent::Started {
                    mode,
                    remaining_seconds,
                });
            }
            (true, false) => {
                info!("Timer paused: {} at {}s", mode, remaining_seconds);
                self.emit(TimerEvent::Paused {
                    mode,
                    remaining_seconds,
                });
            }
            _ => debug!("Toggle ignored: countdown already finished"),
        }

        self.view()
    }

    /// Stops the countdown and restores the current mode's full duration.
    pub fn reset_timer(&mut self) -> TimerView {
        self.state.reset();
        info!("Timer reset: {}", self.state.mode);
        self.emit(TimerEvent::Reset {
            mode: self.state.mode,
        });
        self.view()
    }

    /// Switches to `mode`, stopping the countdown and restoring its duration.
    pub fn switch_mode(&mut self, mode: TimerMode) -> TimerView {
        self.state.switch_mode(mode);
        info!("Mode switched: {}", mode);
        self.emit(TimerEvent::ModeSwitched { mode });
        self.view()
    }

    /// Advances the countdown by one second.
    ///
    /// On the tick that reaches zero the alert fires exactly once.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.state.tick();

        match outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Advanced => {
                self.emit(TimerEvent::Tick {
                    remaining_seconds: self.state.remaining_seconds,
                });
            }
            TickOutcome::Completed => {
                self.emit(TimerEvent::Tick {
                    remaining_seconds: 0,
                });
                self.handle_timer_complete();
            }
        }

        outcome
    }

    fn handle_timer_complete(&mut self) {
        let mode = self.state.mode;
        info!("Countdown completed: {}", mode);
        self.notifier.notify();
        self.emit(TimerEvent::Completed { mode });
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            trace!("Event receiver dropped, discarding {:?}", event);
        }
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a read-only snapshot for rendering.
    pub fn view(&self) -> TimerView {
        self.state.view()
    }

    /// Returns true while the countdown is ticking.
    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Returns how many completion alerts have fired.
    pub fn alert_count(&self) -> u64 {
        self.notifier.trigger_count()
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub fn get_state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::sound::{MockSoundPlayer, SoundSource};
    use crate::types::TimerStatus;

    fn create_engine() -> (TimerEngine, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (TimerEngine::new(tx, CompletionNotifier::silent()), rx)
    }

    fn create_engine_with_mock() -> (
        TimerEngine,
        mpsc::UnboundedReceiver<TimerEvent>,
        Arc<MockSoundPlayer>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mock = Arc::new(MockSoundPlayer::new());
        let notifier = CompletionNotifier::new(mock.clone(), SoundSource::default_chime());
        (TimerEngine::new(tx, notifier), rx, mock)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    // ------------------------------------------------------------------------
    // Transition Tests
    // ------------------------------------------------------------------------

    mod transition_tests {
        use super::*;

        #[test]
        fn test_new_engine() {
            let (engine, _rx) = create_engine();
            let state = engine.state();

            assert_eq!(state.mode, TimerMode::Work);
            assert_eq!(state.remaining_seconds, 1500);
            assert!(!state.is_running);
            assert_eq!(engine.alert_count(), 0);
        }

        #[test]
        fn test_toggle_starts_and_pauses() {
            let (mut engine, mut rx) = create_engine();

            let view = engine.toggle_run();
            assert!(view.is_running);
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Started {
                    mode: TimerMode::Work,
                    remaining_seconds: 1500
                }
            );

            let view = engine.toggle_run();
            assert!(!view.is_running);
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Paused {
                    mode: TimerMode::Work,
                    remaining_seconds: 1500
                }
            );
        }

        #[test]
        fn test_three_ticks_from_start() {
            let (mut engine, mut rx) = create_engine();

            engine.toggle_run();
            let _ = rx.try_recv(); // consume Started

            for _ in 0..3 {
                assert_eq!(engine.tick(), TickOutcome::Advanced);
            }

            let view = engine.view();
            assert_eq!(view.remaining_seconds, 1497);
            assert_eq!(view.formatted_time(), "24:57");
            assert_eq!(
                drain(&mut rx),
                vec![
                    TimerEvent::Tick {
                        remaining_seconds: 1499
                    },
                    TimerEvent::Tick {
                        remaining_seconds: 1498
                    },
                    TimerEvent::Tick {
                        remaining_seconds: 1497
                    },
                ]
            );
        }

        #[test]
        fn test_tick_while_idle_is_noop() {
            let (mut engine, mut rx) = create_engine();

            assert_eq!(engine.tick(), TickOutcome::Ignored);
            assert_eq!(engine.state().remaining_seconds, 1500);
            assert!(rx.try_recv().is_err());
        }

        #[test]
        fn test_switch_mode_mid_countdown() {
            let (mut engine, mut rx) = create_engine();

            engine.toggle_run();
            engine.get_state_mut().remaining_seconds = 1000;
            let _ = rx.try_recv();

            let view = engine.switch_mode(TimerMode::Break);

            assert_eq!(view.mode, TimerMode::Break);
            assert_eq!(view.remaining_seconds, 300);
            assert!(!view.is_running);
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::ModeSwitched {
                    mode: TimerMode::Break
                }
            );
        }

        #[test]
        fn test_switch_to_same_mode_is_full_reset() {
            let (mut engine, _rx) = create_engine();

            engine.toggle_run();
            engine.get_state_mut().remaining_seconds = 42;

            let view = engine.switch_mode(TimerMode::Work);
            assert_eq!(view.remaining_seconds, 1500);
            assert!(!view.is_running);
        }

        #[test]
        fn test_reset_twice_equals_once() {
            let (mut engine, _rx) = create_engine();

            engine.switch_mode(TimerMode::Break);
            engine.toggle_run();
            engine.get_state_mut().remaining_seconds = 12;

            engine.reset_timer();
            let once = engine.state().clone();
            engine.reset_timer();

            assert_eq!(engine.state(), &once);
            assert_eq!(once.remaining_seconds, 300);
            assert!(!once.is_running);
        }

        #[test]
        fn test_with_state_clamps_remaining() {
            let (tx, _rx) = mpsc::unbounded_channel();
            let state = TimerState {
                mode: TimerMode::Break,
                remaining_seconds: 9999,
                is_running: false,
            };
            let engine = TimerEngine::with_state(state, tx, CompletionNotifier::silent());
            assert_eq!(engine.state().remaining_seconds, 300);
        }

        #[test]
        fn test_with_state_zero_is_not_running() {
            let (tx, _rx) = mpsc::unbounded_channel();
            let state = TimerState {
                mode: TimerMode::Work,
                remaining_seconds: 0,
                is_running: true,
            };
            let engine = TimerEngine::with_state(state, tx, CompletionNotifier::silent());
            assert!(!engine.is_running());
            assert_eq!(engine.state().status(), TimerStatus::Finished);
        }

        #[test]
        fn test_events_dropped_receiver_is_harmless() {
            let (mut engine, rx) = create_engine();
            drop(rx);

            engine.toggle_run();
            engine.tick();
            assert_eq!(engine.state().remaining_seconds, 1499);
        }
    }

    // ------------------------------------------------------------------------
    // Completion Tests
    // ------------------------------------------------------------------------

    mod completion_tests {
        use super::*;

        #[test]
        fn test_completion_fires_exactly_once() {
            let (mut engine, mut rx, mock) = create_engine_with_mock();

            engine.toggle_run();
            engine.get_state_mut().remaining_seconds = 1;
            let _ = rx.try_recv();

            assert_eq!(engine.tick(), TickOutcome::Completed);
            assert_eq!(engine.state().remaining_seconds, 0);
            assert!(!engine.is_running());
            assert_eq!(engine.alert_count(), 1);
            assert_eq!(mock.play_count(), 1);

            assert_eq!(engine.tick(), TickOutcome::Ignored);
            assert_eq!(engine.alert_count(), 1);
            assert_eq!(mock.play_count(), 1);

            assert_eq!(
                drain(&mut rx),
                vec![
                    TimerEvent::Tick {
                        remaining_seconds: 0
                    },
                    TimerEvent::Completed {
                        mode: TimerMode::Work
                    },
                ]
            );
        }

        #[test]
        fn test_failed_alert_does_not_block_transition() {
            let (mut engine, mut rx, mock) = create_engine_with_mock();
            mock.set_should_fail(true);

            engine.switch_mode(TimerMode::Break);
            engine.toggle_run();
            engine.get_state_mut().remaining_seconds = 1;
            drain(&mut rx);

            assert_eq!(engine.tick(), TickOutcome::Completed);
            assert_eq!(engine.state().status(), TimerStatus::Finished);
            assert_eq!(engine.alert_count(), 1);
            assert_eq!(mock.attempt_count(), 1);
            assert!(drain(&mut rx).contains(&TimerEvent::Completed {
                mode: TimerMode::Break
            }));
        }

        #[test]
        fn test_toggle_after_completion_is_ignored() {
            let (mut engine, mut rx, _mock) = create_engine_with_mock();

            engine.toggle_run();
            engine.get_state_mut().remaining_seconds = 1;
            engine.tick();
            drain(&mut rx);

            let view = engine.toggle_run();
            assert!(!view.is_running);
            assert!(rx.try_recv().is_err());
        }

        #[test]
        fn test_reset_after_completion_allows_second_alert() {
            let (mut engine, _rx, mock) = create_engine_with_mock();

            for _ in 0..2 {
                engine.toggle_run();
                engine.get_state_mut().remaining_seconds = 1;
                engine.tick();
                engine.reset_timer();
            }

            assert_eq!(engine.alert_count(), 2);
            assert_eq!(mock.play_count(), 2);
        }

        #[test]
        fn test_full_break_countdown() {
            let (mut engine, _rx, mock) = create_engine_with_mock();

            engine.switch_mode(TimerMode::Break);
            engine.toggle_run();

            let mut ticks = 0;
            while engine.tick() != TickOutcome::Ignored {
                ticks += 1;
            }

            assert_eq!(ticks, 300);
            assert_eq!(engine.view().progress_fraction, 1.0);
            assert_eq!(mock.play_count(), 1);
        }
    }
}
