use std::io::{self, Write};

use clap::Subcommand;

use crate::context::AppContext;

mod checkout;
mod failure;
mod product;
mod success;

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Show the product page
    Product(product::ProductArgs),
    /// Fill in the checkout form and pay
    Checkout(checkout::CheckoutArgs),
    /// Show the latest order
    Success(success::SuccessArgs),
    /// Show the latest failed payment
    Failure(failure::FailureArgs),
}

impl Commands {
    pub(crate) async fn run(self, context: &AppContext, out: &mut impl Write) -> Result<(), String> {
        match self {
            Self::Product(args) => product::run(args, out),
            Self::Checkout(args) => checkout::run(args, context, out).await,
            Self::Success(args) => success::run(args, context, out),
            Self::Failure(args) => failure::run(args, context, out).await,
        }
    }
}

fn output_error(error: io::Error) -> String {
    format!("failed to write output: {error}")
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use jiff::Timestamp;
    use storefront::{
        payment::{NoDelay, SequenceRandom, SteppingClock},
        store::MemoryStore,
    };
    use testresult::TestResult;

    use crate::context::AppContext;

    pub(crate) const START_MILLIS: i64 = 1_760_616_000_000;

    pub(crate) fn context(store: Arc<MemoryStore>, draws: &[f64]) -> TestResult<AppContext> {
        Ok(AppContext::new(
            store,
            Arc::new(SequenceRandom::new(draws)),
            Arc::new(SteppingClock::new(
                Timestamp::from_millisecond(START_MILLIS)?,
                1_000,
            )),
            Arc::new(NoDelay),
        ))
    }
}
