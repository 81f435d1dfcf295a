//! Checkout flow
//!
//! [`CheckoutSession`] drives one shopper through the [`CheckoutState`]
//! machine, validating the form before any payment is attempted and moving to
//! the outcome state once the simulator settles.

use thiserror::Error;
use tracing::debug;

use crate::{
    customer::{CheckoutForm, ValidationError},
    orders::{FailureRecord, PaymentMethod},
    payment::{PaymentError, PaymentOutcome, PaymentSimulator},
    products::Product,
};

pub mod routes;
pub mod state;

pub use routes::Route;
pub use state::{CheckoutState, FlowEvent, TransitionError};

/// Flow errors
#[derive(Debug, Error)]
pub enum FlowError {
    /// Form did not validate; nothing was submitted
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Action not allowed in the current state
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Attempt could not be made or recorded
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// One shopper's path from product page to outcome.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    state: CheckoutState,
    payments: PaymentSimulator,
}

impl CheckoutSession {
    /// Session starting on the product page.
    pub fn new(payments: PaymentSimulator) -> Self {
        Self {
            state: CheckoutState::Browsing,
            payments,
        }
    }

    /// Session resumed on the failure page, e.g. after a reload.
    pub fn at_failure_page(payments: PaymentSimulator) -> Self {
        Self {
            state: CheckoutState::Failed,
            payments,
        }
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Page for the current state.
    pub fn route(&self) -> Route {
        self.state.route()
    }

    /// Simulator attempts are made with.
    pub fn payments(&self) -> &PaymentSimulator {
        &self.payments
    }

    /// Move from the product page to the checkout form.
    ///
    /// # Errors
    ///
    /// Returns a transition error outside browsing or checkout.
    pub fn open_checkout(&mut self) -> Result<(), FlowError> {
        self.advance(FlowEvent::OpenCheckout)
    }

    /// Validate the form and make the first payment attempt.
    ///
    /// A form that does not validate leaves the session where it was and
    /// never reaches the store.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] with the first rule the form breaks,
    /// a transition error when not on the checkout form, or a payment error
    /// if the attempt could not be recorded. After a payment error the
    /// session is back on the checkout form.
    pub async fn submit(
        &mut self,
        form: &CheckoutForm,
        product: &Product,
        method: PaymentMethod,
    ) -> Result<PaymentOutcome, FlowError> {
        let processing = self.state.apply(FlowEvent::Submit)?;
        let customer = form.validate()?;
        let payments = self.payments.clone();

        self.settle(processing, payments.pay(&customer, product, method))
            .await
    }

    /// Retry a failed attempt.
    ///
    /// # Errors
    ///
    /// Returns a transition error unless the last attempt failed, or a payment
    /// error if the attempt could not be recorded. After a payment error the
    /// session is back on the failure page.
    pub async fn retry(
        &mut self,
        failure: &FailureRecord,
        method: PaymentMethod,
    ) -> Result<PaymentOutcome, FlowError> {
        let retrying = self.state.apply(FlowEvent::Retry)?;
        let payments = self.payments.clone();

        self.settle(retrying, payments.retry(failure, method)).await
    }

    /// Give up and return to the product page.
    ///
    /// # Errors
    ///
    /// Returns a transition error while an attempt is pending or after success.
    pub fn abandon(&mut self) -> Result<(), FlowError> {
        self.advance(FlowEvent::Abandon)
    }

    fn advance(&mut self, event: FlowEvent) -> Result<(), FlowError> {
        let next = self.state.apply(event)?;

        debug!(from = %self.state, to = %next, %event, "checkout transition");

        self.state = next;

        Ok(())
    }

    async fn settle(
        &mut self,
        pending: CheckoutState,
        attempt: impl Future<Output = Result<PaymentOutcome, PaymentError>>,
    ) -> Result<PaymentOutcome, FlowError> {
        let before = self.state;

        debug!(from = %before, to = %pending, "checkout transition");

        self.state = pending;

        let outcome = match attempt.await {
            Ok(outcome) => outcome,
            Err(error) => {
                self.state = before;
                return Err(error.into());
            }
        };

        let settled = if outcome.is_success() {
            FlowEvent::PaymentSucceeded
        } else {
            FlowEvent::PaymentFailed
        };

        self.advance(settled)?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        customer::CheckoutField,
        payment::{FixedClock, FixedRandom, NoDelay, SequenceRandom},
        products::RUNNING_SHOES,
        store::{MemoryStore, MockOrderStore, OrderStore, OrderStoreExt},
    };

    use super::*;

    fn payments(store: Arc<dyn OrderStore>, draws: &[f64]) -> TestResult<PaymentSimulator> {
        Ok(PaymentSimulator::new(
            store,
            Arc::new(SequenceRandom::new(draws)),
            Arc::new(FixedClock(Timestamp::from_millisecond(1_000)?)),
            Arc::new(NoDelay),
        ))
    }

    fn form() -> CheckoutForm {
        CheckoutForm::new()
            .with(CheckoutField::Name, "Asha")
            .with(CheckoutField::Age, "29")
            .with(CheckoutField::Mobile, "9876543210")
            .with(CheckoutField::Email, "a@b.com")
    }

    #[tokio::test]
    async fn invalid_form_changes_nothing_and_skips_the_store() -> TestResult {
        let store = MockOrderStore::new();
        let mut session = CheckoutSession::new(payments(Arc::new(store), &[0.9])?);

        session.open_checkout()?;

        let result = session
            .submit(
                &form().with(CheckoutField::Mobile, "12345"),
                &RUNNING_SHOES,
                PaymentMethod::Razorpay,
            )
            .await;

        assert!(matches!(
            result,
            Err(FlowError::Validation(ValidationError::InvalidMobile))
        ));
        assert_eq!(session.state(), CheckoutState::FillingCheckout);

        Ok(())
    }

    #[tokio::test]
    async fn submit_from_product_page_is_rejected() -> TestResult {
        let mut session = CheckoutSession::new(payments(Arc::new(MemoryStore::new()), &[0.9])?);

        let result = session
            .submit(&form(), &RUNNING_SHOES, PaymentMethod::Razorpay)
            .await;

        assert!(matches!(result, Err(FlowError::Transition(_))));
        assert_eq!(session.state(), CheckoutState::Browsing);

        Ok(())
    }

    #[tokio::test]
    async fn declined_then_retried_to_success() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let mut session = CheckoutSession::new(payments(store.clone(), &[0.1, 0.5])?);

        session.open_checkout()?;

        let first = session
            .submit(&form(), &RUNNING_SHOES, PaymentMethod::Razorpay)
            .await?;

        let PaymentOutcome::Failed(failure) = first else {
            return Err("expected a failed payment".into());
        };

        assert_eq!(session.state(), CheckoutState::Failed);
        assert_eq!(session.route(), Route::Failure);

        let second = session.retry(&failure, PaymentMethod::Paytm).await?;

        assert!(second.is_success());
        assert_eq!(session.state(), CheckoutState::Succeeded);
        assert!(store.read_failure()?.is_none());
        assert_eq!(
            store.read_order()?.map(|order| order.payment_method),
            Some(PaymentMethod::Paytm)
        );

        Ok(())
    }

    #[tokio::test]
    async fn retry_is_rejected_after_success() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let mut session = CheckoutSession::new(payments(store.clone(), &[0.1, 0.9])?);

        session.open_checkout()?;

        let PaymentOutcome::Failed(failure) = session
            .submit(&form(), &RUNNING_SHOES, PaymentMethod::Razorpay)
            .await?
        else {
            return Err("expected a failed payment".into());
        };

        session.retry(&failure, PaymentMethod::Razorpay).await?;

        let again = session.retry(&failure, PaymentMethod::Razorpay).await;

        assert!(matches!(again, Err(FlowError::Transition(_))));

        Ok(())
    }

    #[tokio::test]
    async fn store_error_returns_to_checkout_form() -> TestResult {
        let mut store = MockOrderStore::new();

        store.expect_get().returning(|_| Ok(None));
        store.expect_clear().returning(|_| Ok(()));
        store.expect_set().returning(|_, _| {
            Err(crate::store::StoreError::Unavailable("disk full".to_string()))
        });

        let mut session = CheckoutSession::new(PaymentSimulator::new(
            Arc::new(store),
            Arc::new(FixedRandom(0.9)),
            Arc::new(FixedClock(Timestamp::UNIX_EPOCH)),
            Arc::new(NoDelay),
        ));

        session.open_checkout()?;

        let result = session
            .submit(&form(), &RUNNING_SHOES, PaymentMethod::Razorpay)
            .await;

        assert!(matches!(result, Err(FlowError::Payment(_))));
        assert_eq!(session.state(), CheckoutState::FillingCheckout);

        Ok(())
    }

    #[test]
    fn abandon_from_failure_returns_to_catalog() -> TestResult {
        let mut session =
            CheckoutSession::at_failure_page(payments(Arc::new(MemoryStore::new()), &[])?);

        session.abandon()?;

        assert_eq!(session.route(), Route::Catalog);

        Ok(())
    }
}
