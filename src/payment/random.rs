//! Random sources

use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    /// Next draw.
    fn next_unit(&self) -> f64;
}

/// Thread-local generator from `rand`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::random::<f64>()
    }
}

/// Always returns the same draw.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_unit(&self) -> f64 {
        self.0
    }
}

/// Returns the given draws in order, repeating the last one once exhausted.
#[derive(Debug)]
pub struct SequenceRandom {
    draws: Vec<f64>,
    next: AtomicUsize,
}

impl SequenceRandom {
    /// Sequence over `draws`. An empty sequence always draws `0.0`.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            next: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&self) -> f64 {
        let index = self.next.fetch_add(1, Ordering::Relaxed);

        self.draws
            .get(index)
            .or_else(|| self.draws.last())
            .copied()
            .unwrap_or(0.0)
    }
}
