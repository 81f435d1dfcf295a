//! Checkout state machine
//!
//! ```text
//! Browsing -> FillingCheckout -> Processing -> Succeeded | Failed
//! Failed -> Retrying -> Succeeded | Failed
//! ```
//!
//! `Succeeded` is terminal. `Failed` is left only by retrying or by abandoning
//! the flow, which returns to `Browsing`.

use std::fmt;

use thiserror::Error;

use super::routes::Route;

/// Where the shopper is in the purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckoutState {
    /// Looking at the product
    #[default]
    Browsing,
    /// Editing the checkout form
    FillingCheckout,
    /// First payment attempt pending
    Processing,
    /// Payment went through
    Succeeded,
    /// Last attempt was declined
    Failed,
    /// Retry pending
    Retrying,
}

/// Something that moves the flow along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowEvent {
    /// Shopper chose to buy
    OpenCheckout,
    /// Validated form was submitted
    Submit,
    /// Pending attempt went through
    PaymentSucceeded,
    /// Pending attempt was declined
    PaymentFailed,
    /// Shopper retried from the failure page
    Retry,
    /// Shopper went back to the store
    Abandon,
}

/// Event not allowed in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {event} while {state}")]
pub struct TransitionError {
    /// State the event arrived in
    pub state: CheckoutState,
    /// Rejected event
    pub event: FlowEvent,
}

impl CheckoutState {
    /// State after `event`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] when `event` is not allowed here.
    pub fn apply(self, event: FlowEvent) -> Result<Self, TransitionError> {
        use CheckoutState::{Browsing, Failed, FillingCheckout, Processing, Retrying, Succeeded};
        use FlowEvent::{Abandon, OpenCheckout, PaymentFailed, PaymentSucceeded, Retry, Submit};

        match (self, event) {
            (Browsing | FillingCheckout, OpenCheckout) => Ok(FillingCheckout),
            (FillingCheckout, Submit) => Ok(Processing),
            (Processing | Retrying, PaymentSucceeded) => Ok(Succeeded),
            (Processing | Retrying, PaymentFailed) => Ok(Failed),
            (Failed, Retry) => Ok(Retrying),
            (Browsing | FillingCheckout | Failed, Abandon) => Ok(Browsing),
            (state, event) => Err(TransitionError { state, event }),
        }
    }

    /// No event leaves this state.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// A payment attempt is waiting to settle.
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Processing | Self::Retrying)
    }

    /// Page shown in this state.
    pub const fn route(self) -> Route {
        match self {
            Self::Browsing => Route::Catalog,
            Self::FillingCheckout | Self::Processing => Route::Checkout,
            Self::Succeeded => Route::Success,
            Self::Failed | Self::Retrying => Route::Failure,
        }
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Browsing => "browsing",
            Self::FillingCheckout => "filling checkout",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Retrying => "retrying",
        })
    }
}

impl fmt::Display for FlowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OpenCheckout => "open checkout",
            Self::Submit => "submit",
            Self::PaymentSucceeded => "settle successfully",
            Self::PaymentFailed => "settle as failed",
            Self::Retry => "retry",
            Self::Abandon => "abandon",
        })
    }
}
