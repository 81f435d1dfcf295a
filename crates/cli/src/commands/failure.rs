use std::io::Write;

use clap::Args;
use storefront::{
    flow::CheckoutSession,
    orders::PaymentMethod,
    pages::{FailurePage, SuccessPage},
    payment::PaymentOutcome,
};

use crate::{context::AppContext, render};

use super::output_error;

#[derive(Debug, Args)]
pub(crate) struct FailureArgs {
    /// Retry the failed payment with this method (razorpay, paytm)
    #[arg(long, value_name = "METHOD")]
    retry: Option<PaymentMethod>,
}

pub(crate) async fn run(
    args: FailureArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), String> {
    let mut page = FailurePage::load(context.store.as_ref());

    let (Some(method), Some(failure)) = (args.retry, page.failure().cloned()) else {
        return render::failure_page(out, &page).map_err(output_error);
    };

    let mut session = CheckoutSession::at_failure_page(context.payments.clone());

    render::processing(out, method).map_err(output_error)?;
    out.flush().map_err(output_error)?;

    let outcome = session
        .retry(&failure, method)
        .await
        .map_err(|error| format!("retry failed: {error}"))?;

    match &outcome {
        PaymentOutcome::Succeeded(order) => {
            render::success_page(out, &SuccessPage::with_order(order.clone()))
                .map_err(output_error)?;
        }
        PaymentOutcome::Failed(_) => {
            page.settle(&outcome);
            render::failure_page(out, &page).map_err(output_error)?;
        }
    }

    render::route(out, session.route()).map_err(output_error)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storefront::{
        customer::{CheckoutField, CheckoutForm},
        orders::{FailureRecord, OrderRecord},
        payment::FIRST_FAILURE_MESSAGE,
        products::RUNNING_SHOES,
        store::{MemoryStore, OrderStoreExt},
    };
    use testresult::TestResult;

    use crate::commands::test_support::context;

    use super::*;

    fn seed_failure(store: &MemoryStore) -> TestResult<FailureRecord> {
        let customer = CheckoutForm::new()
            .with(CheckoutField::Name, "Asha")
            .with(CheckoutField::Age, "29")
            .with(CheckoutField::Mobile, "9876543210")
            .with(CheckoutField::Email, "a@b.com")
            .draft()
            .clone();

        let failure = FailureRecord::new(
            OrderRecord::placed(
                customer,
                RUNNING_SHOES.snapshot(),
                PaymentMethod::Razorpay,
                jiff::Timestamp::from_millisecond(1_000)?,
            ),
            FIRST_FAILURE_MESSAGE,
        );

        store.write_failure(&failure)?;

        Ok(failure)
    }

    #[tokio::test]
    async fn page_without_retry_shows_failure() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        seed_failure(&store)?;
        let context = context(store, &[])?;
        let mut out = Vec::new();

        run(FailureArgs { retry: None }, &context, &mut out).await?;

        let text = String::from_utf8(out)?;

        assert!(text.starts_with("Payment Failed\n"));
        assert!(text.contains("Retry with Razorpay - ₹2999"));
        assert!(text.contains("Try using a different payment method or card"));

        Ok(())
    }

    #[tokio::test]
    async fn retry_without_failure_shows_empty_state() -> TestResult {
        let context = context(Arc::new(MemoryStore::new()), &[0.9])?;
        let mut out = Vec::new();

        run(
            FailureArgs {
                retry: Some(PaymentMethod::Paytm),
            },
            &context,
            &mut out,
        )
        .await?;

        assert!(String::from_utf8(out)?.starts_with("No Payment Information Found\n"));

        Ok(())
    }

    #[tokio::test]
    async fn successful_retry_moves_to_success() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        seed_failure(&store)?;
        let context = context(store.clone(), &[0.5])?;
        let mut out = Vec::new();

        run(
            FailureArgs {
                retry: Some(PaymentMethod::Paytm),
            },
            &context,
            &mut out,
        )
        .await?;

        assert!(String::from_utf8(out)?.ends_with("-> /success\n"));
        assert!(store.read_failure()?.is_none());
        assert_eq!(
            store.read_order()?.map(|order| order.payment_method),
            Some(PaymentMethod::Paytm)
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_retry_replaces_failure() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let first = seed_failure(&store)?;
        let context = context(store.clone(), &[0.2])?;
        let mut out = Vec::new();

        run(
            FailureArgs {
                retry: Some(PaymentMethod::Razorpay),
            },
            &context,
            &mut out,
        )
        .await?;

        let text = String::from_utf8(out)?;
        let latest = store.read_failure()?.ok_or("failure was cleared")?;

        assert!(text.contains("Payment failed again due to network issues"));
        assert!(text.ends_with("-> /failure\n"));
        assert_ne!(latest.attempt.order_id, first.attempt.order_id);

        Ok(())
    }
}
