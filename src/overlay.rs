//! Effect overlay: the per-frame tick loop bound to one overlay mount.
//!
//! DESIGN
//! ======
//! `EffectOverlay` is keyed by `(kind, width, height)`. `sync` compares the
//! requested key with the running one: same key is a no-op, anything else
//! aborts the running tick task and (for simulated kinds with a non-empty
//! size) seeds a fresh field and spawns a new task. Dropping the overlay
//! aborts the task, so no loop outlives its mount and no two loops ever
//! drive the same overlay.
//!
//! Frames are published on a `watch` channel: the view layer only ever
//! needs the latest frame, and a slow renderer must not back up the loop.
//! `None` on the channel means "nothing to draw".

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::consts::FRAME_INTERVAL_MS;
use crate::effects::{EffectKind, Frame, ParticleField};

/// Identity of an overlay mount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayKey {
    pub kind: EffectKind,
    pub width: f64,
    pub height: f64,
}

/// Lifecycle state of the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayState {
    /// No simulation loop is running.
    Idle,
    /// A tick task is advancing and drawing a particle field.
    Simulating(OverlayKey),
}

pub struct EffectOverlay {
    key: Option<OverlayKey>,
    task: Option<JoinHandle<()>>,
    frames: Arc<watch::Sender<Option<Frame>>>,
    mounts: u64,
}

impl Default for EffectOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectOverlay {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { key: None, task: None, frames: Arc::new(tx), mounts: 0 }
    }

    /// Receiver for the latest frame.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Frame>> {
        self.frames.subscribe()
    }

    /// Reconcile the overlay with the card's effect and the canvas size.
    ///
    /// Must be called from within a Tokio runtime when the result is
    /// `Simulating`, since that spawns the tick task.
    pub fn sync(&mut self, kind: EffectKind, width: f64, height: f64) -> OverlayState {
        let key = OverlayKey { kind, width, height };
        if self.key == Some(key) && self.task.is_some() {
            return self.state();
        }

        self.stop();

        let Some(field) = ParticleField::new(kind, width, height) else {
            debug!(?kind, width, height, "overlay: idle");
            return OverlayState::Idle;
        };

        info!(?kind, width, height, particles = field.particles().len(), "overlay: simulation started");
        self.task = Some(spawn_tick_loop(field, Arc::clone(&self.frames)));
        self.key = Some(key);
        self.mounts += 1;
        OverlayState::Simulating(key)
    }

    /// Cancel the running loop, if any, and clear the published frame.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            if let Some(key) = self.key {
                info!(kind = ?key.kind, "overlay: simulation stopped");
            }
        }
        self.key = None;
        self.frames.send_replace(None);
    }

    #[must_use]
    pub fn state(&self) -> OverlayState {
        match (self.key, &self.task) {
            (Some(key), Some(_)) => OverlayState::Simulating(key),
            _ => OverlayState::Idle,
        }
    }

    /// Whether a tick task is alive right now.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Number of simulation loops started over this overlay's lifetime.
    #[must_use]
    pub fn mounts(&self) -> u64 {
        self.mounts
    }
}

impl Drop for EffectOverlay {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn spawn_tick_loop(mut field: ParticleField, frames: Arc<watch::Sender<Option<Frame>>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let started = Instant::now();
        let mut ticker = tokio::time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            frames.send_replace(Some(field.tick(elapsed_ms)));
        }
    })
}
