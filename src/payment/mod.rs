//! Payment simulator
//!
//! Stands in for a payment gateway: waits out a fixed latency, draws a uniform
//! number and settles the attempt by writing either an order or a failure
//! record to the store. Randomness, time and the wait itself are injected so
//! tests can pin every outcome.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    customer::{CustomerInfo, ValidatedCustomer},
    flow::routes::Route,
    orders::{FailureRecord, OrderRecord, PaymentMethod},
    products::{Product, ProductSnapshot},
    store::{OrderStore, OrderStoreExt, Slot, StoreError},
};

pub mod clock;
pub mod delay;
pub mod random;

pub use clock::{Clock, FixedClock, SteppingClock, SystemClock};
pub use delay::{Delay, NoDelay, RecordingDelay};
#[cfg(not(target_arch = "wasm32"))]
pub use random::ThreadRandom;
pub use random::{FixedRandom, RandomSource, SequenceRandom};

/// Simulated gateway latency.
pub const PAYMENT_LATENCY: Duration = Duration::from_millis(3000);

/// Error recorded when a first attempt fails.
pub const FIRST_FAILURE_MESSAGE: &str = "Payment failed due to technical issues";

/// Error recorded when a retry fails.
pub const RETRY_FAILURE_MESSAGE: &str = "Payment failed again due to network issues";

/// Error recorded by the success page's demo failure shortcut.
pub const DEMO_FAILURE_MESSAGE: &str = "Payment failed due to network issues (Demo)";

/// Which attempt is being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Submitted from the checkout form
    First,
    /// Submitted from the failure page
    Retry,
}

impl Attempt {
    /// Draws strictly above this value succeed.
    pub const fn success_threshold(self) -> f64 {
        match self {
            Self::First => 0.3,
            Self::Retry => 0.2,
        }
    }

    /// Whether a draw settles this attempt successfully.
    pub fn succeeds(self, draw: f64) -> bool {
        draw > self.success_threshold()
    }

    /// Error stored when this attempt fails.
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::First => FIRST_FAILURE_MESSAGE,
            Self::Retry => RETRY_FAILURE_MESSAGE,
        }
    }
}

/// How an attempt settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Payment went through; the record is now in the order slot
    Succeeded(OrderRecord),
    /// Payment was declined; the record is now in the failure slot
    Failed(FailureRecord),
}

impl PaymentOutcome {
    /// Page to show next.
    pub const fn route(&self) -> Route {
        match self {
            Self::Succeeded(_) => Route::Success,
            Self::Failed(_) => Route::Failure,
        }
    }

    /// Whether the payment went through.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Payment errors
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Another attempt has not settled yet
    #[error("a payment attempt is already in progress")]
    AttemptInFlight,

    /// Settled record could not be stored
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Simulated payment gateway.
///
/// Clones share the store and the in-flight flag, so at most one attempt is
/// pending across all of them.
#[derive(Clone)]
pub struct PaymentSimulator {
    store: Arc<dyn OrderStore>,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    delay: Arc<dyn Delay>,
    latency: Duration,
    in_flight: Arc<AtomicBool>,
}

impl fmt::Debug for PaymentSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentSimulator")
            .field("latency", &self.latency)
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

impl PaymentSimulator {
    /// Simulator with the standard latency.
    pub fn new(
        store: Arc<dyn OrderStore>,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
        delay: Arc<dyn Delay>,
    ) -> Self {
        Self {
            store,
            random,
            clock,
            delay,
            latency: PAYMENT_LATENCY,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Override the simulated latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Simulated latency.
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Store the simulator settles into.
    pub fn store(&self) -> &Arc<dyn OrderStore> {
        &self.store
    }

    /// Clock used to stamp records.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Whether an attempt is waiting to settle.
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Pay for `product` with the details entered at checkout.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::AttemptInFlight`] if another attempt is pending,
    /// or a store error if the settled record cannot be written.
    pub async fn pay(
        &self,
        customer: &ValidatedCustomer,
        product: &Product,
        method: PaymentMethod,
    ) -> Result<PaymentOutcome, PaymentError> {
        self.settle(
            Attempt::First,
            customer.info().clone(),
            product.snapshot(),
            method,
        )
        .await
    }

    /// Retry a failed attempt with the same customer and product.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::AttemptInFlight`] if another attempt is pending,
    /// or a store error if the settled record cannot be written.
    pub async fn retry(
        &self,
        failure: &FailureRecord,
        method: PaymentMethod,
    ) -> Result<PaymentOutcome, PaymentError> {
        self.settle(
            Attempt::Retry,
            failure.customer().clone(),
            failure.product().clone(),
            method,
        )
        .await
    }

    async fn settle(
        &self,
        attempt: Attempt,
        customer: CustomerInfo,
        product: ProductSnapshot,
        method: PaymentMethod,
    ) -> Result<PaymentOutcome, PaymentError> {
        let _pending = PendingGuard::acquire(&self.in_flight)?;

        info!(?attempt, %method, amount = product.price, "payment attempt started");

        self.delay.wait(self.latency).await;

        let draw = self.random.next_unit();
        let record = OrderRecord::placed(customer, product, method, self.clock.now());

        if attempt.succeeds(draw) {
            self.commit_order(&record)?;

            info!(order_id = %record.order_id, %method, "payment succeeded");

            return Ok(PaymentOutcome::Succeeded(record));
        }

        let failure = FailureRecord::new(record, attempt.failure_message());

        self.store.write_failure(&failure)?;

        warn!(
            order_id = %failure.attempt.order_id,
            %method,
            error = %failure.error,
            "payment failed"
        );

        Ok(PaymentOutcome::Failed(failure))
    }

    /// Clear the failure slot and store `order`. If the order cannot be
    /// written the previous failure is put back, so the two slots never hold a
    /// new order next to a stale failure.
    fn commit_order(&self, order: &OrderRecord) -> Result<(), StoreError> {
        let previous_failure = self.store.get(Slot::Failure)?;

        self.store.clear(Slot::Failure)?;

        let Err(error) = self.store.write_order(order) else {
            return Ok(());
        };

        if let Some(raw) = previous_failure {
            if let Err(restore_error) = self.store.set(Slot::Failure, raw) {
                warn!(%restore_error, "failed to restore previous failure");
            }
        }

        Err(error)
    }
}

/// Holds the in-flight flag for the life of one attempt.
#[derive(Debug)]
struct PendingGuard {
    flag: Arc<AtomicBool>,
}

impl PendingGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, PaymentError> {
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PaymentError::AttemptInFlight);
        }

        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        customer::{CheckoutField, CheckoutForm},
        products::RUNNING_SHOES,
        store::{MemoryStore, MockOrderStore},
    };

    use super::*;

    fn customer() -> TestResult<ValidatedCustomer> {
        Ok(CheckoutForm::new()
            .with(CheckoutField::Name, "Asha")
            .with(CheckoutField::Age, "29")
            .with(CheckoutField::Mobile, "9876543210")
            .with(CheckoutField::Email, "a@b.com")
            .validate()?)
    }

    fn simulator(store: Arc<dyn OrderStore>, draw: f64) -> TestResult<PaymentSimulator> {
        Ok(PaymentSimulator::new(
            store,
            Arc::new(FixedRandom(draw)),
            Arc::new(FixedClock(Timestamp::from_millisecond(1_760_616_000_000)?)),
            Arc::new(NoDelay),
        ))
    }

    #[test]
    fn first_attempt_threshold_is_exclusive() {
        assert!(!Attempt::First.succeeds(0.3));
        assert!(Attempt::First.succeeds(0.300_001));
        assert!(!Attempt::First.succeeds(0.0));
    }

    #[test]
    fn retry_threshold_is_lower() {
        assert!(!Attempt::Retry.succeeds(0.2));
        assert!(Attempt::Retry.succeeds(0.3));
        assert!(Attempt::Retry.succeeds(0.25));
    }

    #[test]
    fn each_attempt_has_its_own_failure_message() {
        assert_eq!(
            Attempt::First.failure_message(),
            "Payment failed due to technical issues"
        );
        assert_eq!(
            Attempt::Retry.failure_message(),
            "Payment failed again due to network issues"
        );
    }

    #[tokio::test]
    async fn successful_payment_writes_order_and_clears_failure() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        store.set(Slot::Failure, "{}".to_string())?;

        let outcome = simulator(store.clone(), 0.5)?
            .pay(&customer()?, &RUNNING_SHOES, PaymentMethod::Razorpay)
            .await?;

        assert_eq!(outcome.route(), Route::Success);

        let order = store.read_order()?.ok_or("order slot is empty")?;

        assert_eq!(order.amount, 2999);
        assert_eq!(order.payment_method, PaymentMethod::Razorpay);
        assert_eq!(order.order_id.as_str(), "ORD1760616000000");
        assert_eq!(store.get(Slot::Failure)?, None);

        Ok(())
    }

    #[tokio::test]
    async fn declined_payment_only_writes_failure_slot() -> TestResult {
        let mut store = MockOrderStore::new();

        store
            .expect_set()
            .withf(|slot, value| {
                *slot == Slot::Failure && value.contains(FIRST_FAILURE_MESSAGE)
            })
            .times(1)
            .returning(|_, _| Ok(()));
        store.expect_clear().times(0);

        let outcome = simulator(Arc::new(store), 0.1)?
            .pay(&customer()?, &RUNNING_SHOES, PaymentMethod::Paytm)
            .await?;

        let PaymentOutcome::Failed(failure) = outcome else {
            return Err("expected a failed payment".into());
        };

        assert_eq!(failure.error, FIRST_FAILURE_MESSAGE);
        assert_eq!(failure.attempt.payment_method, PaymentMethod::Paytm);

        Ok(())
    }

    #[tokio::test]
    async fn retry_keeps_customer_and_product() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let first = simulator(store.clone(), 0.1)?
            .pay(&customer()?, &RUNNING_SHOES, PaymentMethod::Razorpay)
            .await?;

        let PaymentOutcome::Failed(failure) = first else {
            return Err("expected a failed payment".into());
        };

        let retried = simulator(store.clone(), 0.15)?
            .retry(&failure, PaymentMethod::Paytm)
            .await?;

        let PaymentOutcome::Failed(again) = retried else {
            return Err("expected the retry to fail".into());
        };

        assert_eq!(again.error, RETRY_FAILURE_MESSAGE);
        assert_eq!(again.customer(), failure.customer());
        assert_eq!(again.product(), failure.product());
        assert_eq!(again.attempt.payment_method, PaymentMethod::Paytm);
        assert_eq!(store.read_failure()?, Some(again));

        Ok(())
    }

    #[tokio::test]
    async fn every_attempt_waits_out_the_latency() -> TestResult {
        let delay = Arc::new(RecordingDelay::new());
        let payments = PaymentSimulator::new(
            Arc::new(MemoryStore::new()),
            Arc::new(FixedRandom(0.9)),
            Arc::new(SystemClock),
            delay.clone(),
        );

        payments
            .pay(&customer()?, &RUNNING_SHOES, PaymentMethod::Razorpay)
            .await?;

        assert_eq!(delay.waits(), [Duration::from_millis(3000)]);

        Ok(())
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_payment_error() -> TestResult {
        let mut store = MockOrderStore::new();

        store.expect_get().returning(|_| Ok(None));
        store.expect_clear().returning(|_| Ok(()));
        store
            .expect_set()
            .returning(|_, _| Err(StoreError::Unavailable("quota exceeded".to_string())));

        let result = simulator(Arc::new(store), 0.9)?
            .pay(&customer()?, &RUNNING_SHOES, PaymentMethod::Razorpay)
            .await;

        assert!(matches!(
            result,
            Err(PaymentError::Store(StoreError::Unavailable(_)))
        ));

        Ok(())
    }

    /// Memory store whose `clear` always fails.
    #[derive(Debug, Default)]
    struct UnclearableStore(MemoryStore);

    impl OrderStore for UnclearableStore {
        fn get(&self, slot: Slot) -> Result<Option<String>, StoreError> {
            self.0.get(slot)
        }

        fn set(&self, slot: Slot, value: String) -> Result<(), StoreError> {
            self.0.set(slot, value)
        }

        fn clear(&self, _slot: Slot) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("storage locked".to_string()))
        }
    }

    #[tokio::test]
    async fn failed_clear_leaves_both_slots_untouched() -> TestResult {
        let store = Arc::new(UnclearableStore::default());
        store.set(Slot::Order, "previous order".to_string())?;
        store.set(Slot::Failure, "previous failure".to_string())?;

        let result = simulator(store.clone(), 0.9)?
            .pay(&customer()?, &RUNNING_SHOES, PaymentMethod::Razorpay)
            .await;

        assert!(matches!(
            result,
            Err(PaymentError::Store(StoreError::Unavailable(_)))
        ));
        assert_eq!(store.get(Slot::Order)?.as_deref(), Some("previous order"));
        assert_eq!(
            store.get(Slot::Failure)?.as_deref(),
            Some("previous failure")
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_order_write_restores_previous_failure() -> TestResult {
        let mut store = MockOrderStore::new();

        store
            .expect_get()
            .withf(|slot| *slot == Slot::Failure)
            .times(1)
            .returning(|_| Ok(Some("previous failure".to_string())));
        store
            .expect_clear()
            .withf(|slot| *slot == Slot::Failure)
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_set()
            .withf(|slot, _| *slot == Slot::Order)
            .times(1)
            .returning(|_, _| Err(StoreError::Unavailable("quota exceeded".to_string())));
        store
            .expect_set()
            .withf(|slot, value| *slot == Slot::Failure && value == "previous failure")
            .times(1)
            .returning(|_, _| Ok(()));

        let result = simulator(Arc::new(store), 0.9)?
            .pay(&customer()?, &RUNNING_SHOES, PaymentMethod::Razorpay)
            .await;

        assert!(matches!(result, Err(PaymentError::Store(_))));

        Ok(())
    }

    #[test]
    fn second_attempt_is_refused_while_one_is_pending() -> TestResult {
        let flag = Arc::new(AtomicBool::new(false));
        let pending = PendingGuard::acquire(&flag)?;

        assert!(matches!(
            PendingGuard::acquire(&flag),
            Err(PaymentError::AttemptInFlight)
        ));

        drop(pending);

        assert!(PendingGuard::acquire(&flag).is_ok());

        Ok(())
    }

    #[test]
    fn pending_flag_is_shared_between_clones() -> TestResult {
        let payments = simulator(Arc::new(MemoryStore::new()), 0.5)?;
        let clone = payments.clone();

        let _pending = PendingGuard::acquire(&payments.in_flight)?;

        assert!(clone.is_pending());

        Ok(())
    }
}
