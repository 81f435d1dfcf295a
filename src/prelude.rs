//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{CatalogError, ProductDetails, ProductPage},
    customer::{CheckoutField, CheckoutForm, CustomerInfo, ValidatedCustomer, ValidationError},
    flow::{CheckoutSession, CheckoutState, FlowError, FlowEvent, Route, TransitionError},
    formatting::{format_money, format_order_date, format_rupees},
    invoice::Invoice,
    orders::{FailureRecord, OrderId, OrderRecord, PaymentMethod},
    pages::{EmptyState, FailurePage, SuccessPage},
    payment::{
        Attempt, Clock, Delay, FixedClock, FixedRandom, NoDelay, PaymentError, PaymentOutcome,
        PaymentSimulator, RandomSource, SequenceRandom, SystemClock,
    },
    products::{Product, ProductSnapshot, RUNNING_SHOES},
    store::{MemoryStore, OrderStore, OrderStoreExt, Slot, StoreError},
};

#[cfg(not(target_arch = "wasm32"))]
pub use crate::{payment::ThreadRandom, store::FileStore};
