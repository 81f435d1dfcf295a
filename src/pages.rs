//! Outcome pages
//!
//! What the success and failure pages show, loaded from the store. Both pages
//! treat a missing record as a normal empty state. A record that cannot be read
//! is logged and shown the same way.

use tracing::{info, warn};

use crate::{
    formatting::format_rupees,
    invoice::Invoice,
    orders::{FailureRecord, OrderId, OrderRecord, PaymentMethod},
    payment::{Clock, DEMO_FAILURE_MESSAGE, PaymentOutcome},
    store::{OrderStore, OrderStoreExt, StoreError},
};

/// Message shown in place of a missing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    /// Heading
    pub title: &'static str,

    /// Explanation under the heading
    pub message: &'static str,
}

/// Success page with no order.
pub const NO_ORDER: EmptyState = EmptyState {
    title: "No Order Found",
    message: "We couldn't find any order information.",
};

/// Failure page with no failed attempt.
pub const NO_FAILURE: EmptyState = EmptyState {
    title: "No Payment Information Found",
    message: "We couldn't find any payment information.",
};

/// Success page heading.
pub const SUCCESS_TITLE: &str = "Payment Successful!";

/// Success page message under the heading.
pub const SUCCESS_MESSAGE: &str =
    "Thank you for your order. Your payment has been processed successfully.";

/// Delivery estimate shown with a confirmed order.
pub const DELIVERY_NOTE: &str = "Your order will be delivered within 3-5 business days. You'll receive tracking information via email.";

/// Failure page heading.
pub const FAILURE_TITLE: &str = "Payment Failed";

/// Failure page message under the heading.
pub const FAILURE_MESSAGE: &str =
    "Unfortunately, your payment could not be processed at this time.";

/// Retry section hint on the failure page.
pub const RETRY_HINT: &str = "Your order details have been saved. You can retry the payment using the same or different payment method.";

/// Confirmation asked before staging the demo failure.
pub const DEMO_FAILURE_PROMPT: &str = "Do you want to see the failure page demo?\n\nThis will simulate a payment failure scenario for demonstration purposes.";

/// Troubleshooting hints listed on the failure page.
pub const COMMON_ISSUES: [&str; 4] = [
    "Check if your card has sufficient balance or credit limit",
    "Ensure your card is enabled for online transactions",
    "Verify that all card details (number, expiry, CVV) are correct",
    "Try using a different payment method or card",
];

/// Support mailbox shown on the failure page.
pub const SUPPORT_EMAIL: &str = "support@sportmax.com";

/// Support phone line shown on the failure page.
pub const SUPPORT_PHONE: &str = "+91 98765 43210";

/// Success page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuccessPage {
    order: Option<OrderRecord>,
}

impl SuccessPage {
    /// Load the current order.
    pub fn load(store: &dyn OrderStore) -> Self {
        Self {
            order: read_or_empty(store.read_order()),
        }
    }

    /// Page for a known order.
    pub fn with_order(order: OrderRecord) -> Self {
        Self { order: Some(order) }
    }

    /// Order on show.
    pub fn order(&self) -> Option<&OrderRecord> {
        self.order.as_ref()
    }

    /// What to show instead when there is no order.
    pub fn empty_state(&self) -> Option<EmptyState> {
        self.order.is_none().then_some(NO_ORDER)
    }

    /// Downloadable invoice for the order.
    pub fn invoice(&self) -> Option<Invoice<'_>> {
        self.order.as_ref().map(Invoice::new)
    }

    /// Stage a failed attempt copied from the current order, for
    /// demonstrating the failure page.
    ///
    /// The copy gets a fresh id and timestamp and the demo error; method and
    /// amount are kept. Returns `None` when there is no order to copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the failure record cannot be written.
    pub fn stage_failure_demo(
        &self,
        store: &dyn OrderStore,
        clock: &dyn Clock,
    ) -> Result<Option<FailureRecord>, StoreError> {
        let Some(order) = &self.order else {
            return Ok(None);
        };

        let now = clock.now();
        let failure = FailureRecord::new(
            OrderRecord {
                order_id: OrderId::at(now),
                timestamp: now,
                ..order.clone()
            },
            DEMO_FAILURE_MESSAGE,
        );

        store.write_failure(&failure)?;

        info!(order_id = %failure.attempt.order_id, "staged demo failure");

        Ok(Some(failure))
    }
}

/// Failure page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailurePage {
    failure: Option<FailureRecord>,
}

impl FailurePage {
    /// Load the current failed attempt.
    pub fn load(store: &dyn OrderStore) -> Self {
        Self {
            failure: read_or_empty(store.read_failure()),
        }
    }

    /// Page for a known failure.
    pub fn with_failure(failure: FailureRecord) -> Self {
        Self {
            failure: Some(failure),
        }
    }

    /// Failed attempt on show.
    pub fn failure(&self) -> Option<&FailureRecord> {
        self.failure.as_ref()
    }

    /// What to show instead when there is no failed attempt.
    pub fn empty_state(&self) -> Option<EmptyState> {
        self.failure.is_none().then_some(NO_FAILURE)
    }

    /// Label of the retry button for `method`.
    pub fn retry_label(&self, method: PaymentMethod) -> Option<String> {
        self.failure.as_ref().map(|failure| {
            format!(
                "Retry with {method} - {}",
                format_rupees(failure.product().price)
            )
        })
    }

    /// Take in the outcome of a retry.
    ///
    /// A failed retry replaces the record on show. A successful one leaves the
    /// page unchanged, since the shopper moves on to the success page.
    pub fn settle(&mut self, outcome: &PaymentOutcome) {
        if let PaymentOutcome::Failed(failure) = outcome {
            self.failure = Some(failure.clone());
        }
    }
}

fn read_or_empty<T>(read: Result<Option<T>, StoreError>) -> Option<T> {
    read.unwrap_or_else(|error| {
        warn!(%error, "ignoring unreadable record");
        None
    })
}
