//! App Context

use std::sync::Arc;

use storefront::{
    payment::{Clock, Delay, PaymentSimulator, RandomSource, SystemClock, ThreadRandom},
    store::{FileStore, OrderStore},
};

use crate::{config::StoreConfig, delay::TokioDelay};

/// Shared services for one CLI invocation.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) store: Arc<dyn OrderStore>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) payments: PaymentSimulator,
}

impl AppContext {
    /// File-backed context with real time, randomness and delay.
    pub(crate) fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            Arc::new(FileStore::new(&config.store_dir)),
            Arc::new(ThreadRandom),
            Arc::new(SystemClock),
            Arc::new(TokioDelay),
        )
        .with_latency(config)
    }

    pub(crate) fn new(
        store: Arc<dyn OrderStore>,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
        delay: Arc<dyn Delay>,
    ) -> Self {
        let payments = PaymentSimulator::new(
            Arc::clone(&store),
            random,
            Arc::clone(&clock),
            delay,
        );

        Self {
            store,
            clock,
            payments,
        }
    }

    fn with_latency(mut self, config: &StoreConfig) -> Self {
        self.payments = self.payments.with_latency(config.payment_latency());
        self
    }
}
