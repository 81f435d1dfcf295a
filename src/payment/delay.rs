//! Delays standing in for gateway latency.

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;

/// Non-blocking wait.
#[async_trait(?Send)]
pub trait Delay: Send + Sync {
    /// Resolve after `duration`.
    async fn wait(&self, duration: Duration);
}

/// Resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait(?Send)]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

/// Resolves immediately and remembers every requested wait.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    /// Recorder with no waits yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits requested so far.
    pub fn waits(&self) -> Vec<Duration> {
        self.waits
            .lock()
            .map(|waits| waits.clone())
            .unwrap_or_default()
    }
}

#[async_trait(?Send)]
impl Delay for RecordingDelay {
    async fn wait(&self, duration: Duration) {
        if let Ok(mut waits) = self.waits.lock() {
            waits.push(duration);
        }
    }
}
