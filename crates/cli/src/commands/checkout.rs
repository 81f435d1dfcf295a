use std::io::Write;

use clap::Args;
use storefront::{
    catalog::{DEFAULT_COLOR, DEFAULT_SIZE},
    customer::{CheckoutField, CheckoutForm},
    flow::{CheckoutSession, FlowError},
    orders::PaymentMethod,
    pages::{FailurePage, SuccessPage},
    payment::PaymentOutcome,
    products::RUNNING_SHOES,
};
use tracing::debug;

use crate::{context::AppContext, render};

use super::output_error;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Full name
    #[arg(long, default_value = "")]
    name: String,

    /// Age in years
    #[arg(long, default_value = "")]
    age: String,

    /// 10-digit mobile number
    #[arg(long, default_value = "")]
    mobile: String,

    /// Email address
    #[arg(long, default_value = "")]
    email: String,

    /// Delivery address
    #[arg(long, default_value = "")]
    address: String,

    /// PIN code
    #[arg(long, default_value = "")]
    pincode: String,

    /// Shoe size
    #[arg(long, default_value = DEFAULT_SIZE)]
    size: String,

    /// Shoe color
    #[arg(long, default_value = DEFAULT_COLOR)]
    color: String,

    /// Payment method (razorpay, paytm)
    #[arg(long)]
    method: PaymentMethod,
}

impl CheckoutArgs {
    fn form(&self) -> CheckoutForm {
        CheckoutForm::new()
            .with(CheckoutField::Name, self.name.as_str())
            .with(CheckoutField::Age, self.age.as_str())
            .with(CheckoutField::Mobile, self.mobile.as_str())
            .with(CheckoutField::Email, self.email.as_str())
            .with(CheckoutField::Address, self.address.as_str())
            .with(CheckoutField::Pincode, self.pincode.as_str())
            .with(CheckoutField::Size, self.size.as_str())
            .with(CheckoutField::Color, self.color.as_str())
    }
}

pub(crate) async fn run(
    args: CheckoutArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), String> {
    let mut session = CheckoutSession::new(context.payments.clone());

    session
        .open_checkout()
        .map_err(|error| error.to_string())?;

    let form = args.form();

    debug!(method = %args.method, "submitting checkout form");

    render::processing(out, args.method).map_err(output_error)?;
    out.flush().map_err(output_error)?;

    let outcome = session
        .submit(&form, &RUNNING_SHOES, args.method)
        .await
        .map_err(|error| match error {
            FlowError::Validation(error) => error.to_string(),
            error => format!("checkout failed: {error}"),
        })?;

    let rendered = match &outcome {
        PaymentOutcome::Succeeded(order) => {
            render::success_page(out, &SuccessPage::with_order(order.clone()))
        }
        PaymentOutcome::Failed(failure) => {
            render::failure_page(out, &FailurePage::with_failure(failure.clone()))
        }
    };

    rendered.map_err(output_error)?;

    render::route(out, outcome.route()).map_err(output_error)
}
