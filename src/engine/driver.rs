//! Tick scheduling for the timer engine.
//!
//! `TimerDriver` owns the engine and at most one tick task. Every
//! transition goes through [`TimerDriver::rearm`], which aborts the current
//! task before arming a new one, so two countdowns can never run at once.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

use crate::types::{TimerMode, TimerView};

use super::timer::TimerEngine;

/// Real-time period between ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Shortest accepted tick period; `interval_at` rejects zero.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Drives a [`TimerEngine`] in real time.
///
/// Must be used from within a tokio runtime.
pub struct TimerDriver {
    /// Shared engine (also held by the tick task)
    engine: Arc<Mutex<TimerEngine>>,
    /// The single live tick task, if any
    ticker: Option<JoinHandle<()>>,
    /// Tick period
    period: Duration,
}

impl TimerDriver {
    /// Creates a driver ticking once per second.
    pub fn new(engine: TimerEngine) -> Self {
        Self::with_period(engine, TICK_PERIOD)
    }

    /// Creates a driver with a custom tick period.
    ///
    /// Periods shorter than [`MIN_TICK_PERIOD`] are raised to it.
    pub fn with_period(engine: TimerEngine, period: Duration) -> Self {
        let running = engine.is_running();
        let mut driver = Self {
            engine: Arc::new(Mutex::new(engine)),
            ticker: None,
            period: period.max(MIN_TICK_PERIOD),
        };
        driver.rearm(running);
        driver
    }

    /// Starts or pauses the countdown.
    pub async fn toggle_run(&mut self) -> TimerView {
        let engine = Arc::clone(&self.engine);
        let mut engine = engine.lock().await;
        let view = engine.toggle_run();
        self.rearm(view.is_running);
        view
    }

    /// Stops the countdown and restores the full duration.
    pub async fn reset_timer(&mut self) -> TimerView {
        let engine = Arc::clone(&self.engine);
        let mut engine = engine.lock().await;
        let view = engine.reset_timer();
        self.rearm(view.is_running);
        view
    }

    /// Switches mode, stopping the countdown.
    pub async fn switch_mode(&mut self, mode: TimerMode) -> TimerView {
        let engine = Arc::clone(&self.engine);
        let mut engine = engine.lock().await;
        let view = engine.switch_mode(mode);
        self.rearm(view.is_running);
        view
    }

    /// Returns the current snapshot.
    pub async fn view(&self) -> TimerView {
        self.engine.lock().await.view()
    }

    /// Returns how many completion alerts have fired.
    pub async fn alert_count(&self) -> u64 {
        self.engine.lock().await.alert_count()
    }

    /// Returns the tick period in use.
    pub fn period(&self) -> Duration {
        self.period
    }

    #[cfg(test)]
    fn engine(&self) -> Arc<Mutex<TimerEngine>> {
        Arc::clone(&self.engine)
    }

    /// Returns true if a tick task is live.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancels the tick task. The engine state is left as is.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
            debug!("Tick task cancelled on shutdown");
        }
    }

    /// Single scheduler entry point: cancel the previous task, then arm a
    /// new one only if the engine is running.
    ///
    /// Callers hold the engine lock, so the aborted task cannot be mid-tick.
    fn rearm(&mut self, running: bool) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
        if running {
            self.ticker = Some(self.spawn_ticker());
        }
    }

    fn spawn_ticker(&self) -> JoinHandle<()> {
        let engine = Arc::clone(&self.engine);
        let period = self.period;

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let mut engine = engine.lock().await;
                engine.tick();

                if !engine.is_running() {
                    debug!("Countdown stopped, tick task exiting");
                    break;
                }
            }
        })
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
