//! Timer-backed payment delay.

use std::time::Duration;

use async_trait::async_trait;
use storefront::payment::Delay;

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TokioDelay;

#[async_trait(?Send)]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[tokio::test]
    async fn waits_at_least_the_requested_time() {
        let started = Instant::now();

        TokioDelay.wait(Duration::from_millis(20)).await;

        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
