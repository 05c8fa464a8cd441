//! Interactive timer session.
//!
//! Wires stdin intents and engine events to the display:
//!
//! ```text
//! stdin thread ──lines──▶ ┌─────────────┐ ──intents──▶ TimerDriver
//!                         │ run_session │
//! TimerEngine ──events──▶ └─────────────┘ ──views────▶ Display
//! ```

use std::future::Future;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::{CompletionNotifier, TimerDriver, TimerEngine, TimerEvent};
use crate::sound::spawn_worker_blocking;
use crate::types::{TimerMode, TimerView};

use super::config::SessionConfig;
use super::display::Display;

/// Capacity of the stdin line channel.
const INPUT_BUFFER: usize = 16;

// ============================================================================
// Intent
// ============================================================================

/// A user intent parsed from one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Start or pause
    Toggle,
    /// Reset the current mode
    Reset,
    /// Switch to a mode
    SwitchMode(TimerMode),
    /// Show the command list
    Help,
    /// End the session
    Quit,
}

impl Intent {
    /// Parses one input line. Returns `None` for unknown input.
    ///
    /// An empty line (just Enter) toggles, like pressing the play button.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "s" | "space" | "toggle" | "start" | "pause" => Some(Intent::Toggle),
            "r" | "reset" => Some(Intent::Reset),
            "w" => Some(Intent::SwitchMode(TimerMode::Work)),
            "b" => Some(Intent::SwitchMode(TimerMode::Break)),
            "h" | "help" | "?" => Some(Intent::Help),
            "q" | "quit" | "exit" => Some(Intent::Quit),
            other => other.parse::<TimerMode>().ok().map(Intent::SwitchMode),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Builds the completion notifier for a session.
///
/// Falls back to a silent notifier if sound is disabled or no audio device
/// can be opened.
pub async fn build_notifier(config: &SessionConfig) -> CompletionNotifier {
    if !config.sound_enabled {
        debug!("Sound disabled by configuration");
        return CompletionNotifier::silent();
    }

    match spawn_worker_blocking().await {
        Some(worker) => CompletionNotifier::new(Arc::new(worker), config.sound.clone()),
        None => CompletionNotifier::silent(),
    }
}

/// Applies one intent to the driver and returns the new snapshot.
///
/// Returns `None` for intents that do not touch the timer.
pub async fn dispatch(driver: &mut TimerDriver, intent: Intent) -> Option<TimerView> {
    match intent {
        Intent::Toggle => Some(driver.toggle_run().await),
        Intent::Reset => Some(driver.reset_timer().await),
        Intent::SwitchMode(mode) => Some(driver.switch_mode(mode).await),
        Intent::Help | Intent::Quit => None,
    }
}

/// Reads stdin on a plain thread so a pending read never holds up runtime
/// shutdown.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(INPUT_BUFFER);

    let spawned = thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
        });

    if let Err(e) = spawned {
        warn!("Failed to spawn stdin reader: {}", e);
    }

    rx
}

/// Runs an interactive session until quit, end of input or Ctrl-C.
///
/// # Errors
///
/// Returns an error if output cannot be rendered.
pub async fn run_session(config: SessionConfig) -> Result<()> {
    let display = Display::new(config.output);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let engine = TimerEngine::new(event_tx, build_notifier(&config).await);
    let mut driver = TimerDriver::new(engine);
    let mut input = spawn_stdin_reader();

    info!("Session started");
    display.render(&driver.view().await)?;

    let result = session_loop(
        &display,
        &mut driver,
        &mut event_rx,
        &mut input,
        tokio::signal::ctrl_c(),
    )
    .await;

    driver.shutdown();
    info!("Session ended");
    result
}

/// Handles input and engine events until quit, end of input or `shutdown`.
///
/// `shutdown` is polled from one pinned future for the whole loop, so a
/// signal that lands while an arm body runs is still seen.
async fn session_loop<S>(
    display: &Display,
    driver: &mut TimerDriver,
    event_rx: &mut mpsc::UnboundedReceiver<TimerEvent>,
    input: &mut mpsc::Receiver<String>,
    shutdown: S,
) -> Result<()>
where
    S: Future<Output = io::Result<()>>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = input.recv() => {
                let Some(line) = line else {
                    debug!("End of input");
                    break;
                };
                match Intent::parse(&line) {
                    Some(Intent::Quit) => break,
                    Some(Intent::Help) => display.show_help(),
                    Some(intent) => {
                        if let Some(view) = dispatch(driver, intent).await {
                            display.render(&view)?;
                        }
                    }
                    None => display.show_unknown(&line),
                }
            }
            Some(event) = event_rx.recv() => {
                handle_event(display, driver, event).await?;
            }
            result = &mut shutdown => {
                result.context("Failed to listen for Ctrl-C")?;
                debug!("Interrupted");
                break;
            }
        }
    }

    Ok(())
}

async fn handle_event(display: &Display, driver: &TimerDriver, event: TimerEvent) -> Result<()> {
    match event {
        TimerEvent::Tick { .. } => display.render(&driver.view().await)?,
        TimerEvent::Completed { mode } => display.show_completed(mode),
        // Intent-driven transitions are rendered by the input branch.
        TimerEvent::Started { .. }
        | TimerEvent::Paused { .. }
        | TimerEvent::Reset { .. }
        | TimerEvent::ModeSwitched { .. } => {}
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
