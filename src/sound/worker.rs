//! Audio worker thread.
//!
//! rodio's output stream cannot leave the thread that opened it, so the
//! [`RodioSoundPlayer`] lives on a dedicated thread. [`AudioWorker`] is the
//! `Send + Sync` handle the timer holds: `play` enqueues a request over a
//! crossbeam channel and returns immediately.

use std::thread;

use crossbeam_channel::{bounded, unbounded, Sender};
use tracing::{debug, warn};

use super::error::SoundError;
use super::player::RodioSoundPlayer;
use super::source::SoundSource;
use super::SoundPlayer;

/// Name of the audio worker thread.
const WORKER_THREAD_NAME: &str = "audio-worker";

/// Handle to the audio worker thread.
///
/// Dropping the handle closes the request channel and lets the thread exit.
#[derive(Debug)]
pub struct AudioWorker {
    requests: Sender<SoundSource>,
}

impl AudioWorker {
    /// Spawns the worker thread and opens the default output device on it.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if the device cannot be
    /// opened, or `SoundError::WorkerUnavailable` if the thread dies before
    /// reporting.
    ///
    /// Blocks until the device is open; async callers use
    /// [`spawn_worker_blocking`].
    pub fn spawn() -> Result<Self, SoundError> {
        let (requests, inbox) = unbounded::<SoundSource>();
        let (ready_tx, ready_rx) = bounded::<Result<(), SoundError>>(1);

        thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let player = match RodioSoundPlayer::new() {
                    Ok(player) => {
                        let _ = ready_tx.send(Ok(()));
                        player
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                for source in inbox.iter() {
                    if let Err(e) = player.play(&source) {
                        debug!("Alert playback failed: {}", e);
                    }
                }

                debug!("Audio worker exiting");
            })
            .map_err(|e| SoundError::PlaybackError(e.to_string()))?;

        ready_rx
            .recv()
            .map_err(|_| SoundError::WorkerUnavailable)??;

        Ok(Self { requests })
    }
}

impl SoundPlayer for AudioWorker {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        self.requests
            .send(source.clone())
            .map_err(|_| SoundError::WorkerUnavailable)
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Spawns the audio worker, returning `None` if audio is unavailable.
///
/// Failure is logged once as a warning; the timer then runs silently.
#[must_use]
pub fn try_spawn_worker() -> Option<AudioWorker> {
    match AudioWorker::spawn() {
        Ok(worker) => Some(worker),
        Err(e) => {
            warn!("Audio not available, alerts disabled: {}", e);
            None
        }
    }
}

/// Like [`try_spawn_worker`], but opens the device on tokio's blocking pool
/// so a slow device never stalls the runtime.
pub async fn spawn_worker_blocking() -> Option<AudioWorker> {
    open_on_blocking_pool(try_spawn_worker).await
}

async fn open_on_blocking_pool<T, F>(open: F) -> Option<T>
where
    F: FnOnce() -> Option<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(open).await {
        Ok(opened) => opened,
        Err(e) => {
            warn!("Audio worker startup failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AudioWorker>();
    }

    #[test]
    fn test_try_spawn_worker_no_panic() {
        // Some or None depending on the machine's audio device.
        let _ = try_spawn_worker();
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_device_open_runs_off_runtime_thread() {
        let runtime_thread = thread::current().id();

        let opened_on = open_on_blocking_pool(|| Some(thread::current().id())).await;

        assert!(opened_on.is_some());
        assert_ne!(opened_on, Some(runtime_thread));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_spawn_worker_blocking_no_panic() {
        let _ = spawn_worker_blocking().await;
    }

    #[test]
    fn test_worker_accepts_requests() {
        let worker = match AudioWorker::spawn() {
            Ok(w) => w,
            Err(_) => return,
        };

        assert!(worker.is_available());
        assert!(worker.play(&SoundSource::default_chime()).is_ok());
    }
}
