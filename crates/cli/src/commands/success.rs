use std::{fs, io::Write, path::PathBuf};

use clap::Args;
use storefront::{
    flow::Route,
    pages::{FailurePage, SuccessPage},
};
use tracing::info;

use crate::{context::AppContext, render};

use super::output_error;

#[derive(Debug, Args)]
pub(crate) struct SuccessArgs {
    /// Save the invoice into this directory
    #[arg(long, value_name = "DIR")]
    invoice: Option<PathBuf>,

    /// Stage a demo payment failure from this order and open the failure page
    #[arg(long)]
    demo_failure: bool,
}

pub(crate) fn run(
    args: SuccessArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), String> {
    let page = SuccessPage::load(context.store.as_ref());

    render::success_page(out, &page).map_err(output_error)?;

    if let (Some(dir), Some(invoice)) = (&args.invoice, page.invoice()) {
        let path = dir.join(invoice.file_name());

        fs::write(&path, invoice.render())
            .map_err(|error| format!("failed to save invoice to {}: {error}", path.display()))?;

        info!(path = %path.display(), "saved invoice");

        writeln!(out, "\nInvoice saved to {}", path.display()).map_err(output_error)?;
    }

    if args.demo_failure {
        let staged = page
            .stage_failure_demo(context.store.as_ref(), context.clock.as_ref())
            .map_err(|error| format!("failed to stage demo failure: {error}"))?;

        if let Some(failure) = staged {
            writeln!(out).map_err(output_error)?;
            render::failure_page(out, &FailurePage::with_failure(failure))
                .map_err(output_error)?;
            render::route(out, Route::Failure).map_err(output_error)?;
        }
    }

    Ok(())
}
