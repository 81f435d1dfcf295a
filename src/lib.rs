//! Storefront
//!
//! Storefront is a single-product shop: a product page, a checkout form, a
//! simulated payment step and success/failure outcome pages, with the outcome
//! of the current attempt kept in a two-slot key-value store.

pub mod catalog;
pub mod customer;
pub mod flow;
pub mod formatting;
pub mod invoice;
pub mod orders;
pub mod pages;
pub mod payment;
pub mod prelude;
pub mod products;
pub mod store;
