//! Integration tests for the directory-backed store.

use std::{fs, sync::Arc};

use jiff::Timestamp;
use testresult::TestResult;

use storefront::{
    customer::{CheckoutField, CheckoutForm},
    orders::PaymentMethod,
    pages::SuccessPage,
    payment::{FixedClock, FixedRandom, NoDelay, PaymentSimulator},
    products::RUNNING_SHOES,
    store::{FileStore, OrderStoreExt, Slot},
};

#[tokio::test]
async fn test_order_persists_across_store_instances() -> TestResult {
    let dir = tempfile::tempdir()?;
    let customer = CheckoutForm::new()
        .with(CheckoutField::Name, "Asha")
        .with(CheckoutField::Age, "29")
        .with(CheckoutField::Mobile, "9876543210")
        .with(CheckoutField::Email, "a@b.com")
        .validate()?;

    let payments = PaymentSimulator::new(
        Arc::new(FileStore::new(dir.path())),
        Arc::new(FixedRandom(0.5)),
        Arc::new(FixedClock(Timestamp::from_millisecond(1_760_616_000_000)?)),
        Arc::new(NoDelay),
    );

    payments
        .pay(&customer, &RUNNING_SHOES, PaymentMethod::Razorpay)
        .await?;

    let reopened = FileStore::new(dir.path());
    let page = SuccessPage::load(&reopened);
    let order = page.order().ok_or("order did not persist")?;

    assert_eq!(order.amount, 2999);
    assert_eq!(order.customer.email, "a@b.com");

    let raw = fs::read_to_string(reopened.path(Slot::Order))?;

    assert!(raw.contains("\"orderId\":\"ORD1760616000000\""));
    assert!(raw.contains("\"paymentMethod\":\"Razorpay\""));

    Ok(())
}

#[test]
fn test_corrupt_file_is_reported_by_typed_reads() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path());

    fs::write(store.path(Slot::Failure), "{ truncated")?;

    assert!(store.read_failure().is_err());

    Ok(())
}
