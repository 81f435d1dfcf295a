use std::io::Write;

use clap::Args;
use storefront::catalog::ProductPage;

use crate::render;

use super::output_error;

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Size to select
    #[arg(long)]
    size: Option<String>,

    /// Color to select
    #[arg(long)]
    color: Option<String>,
}

pub(crate) fn run(args: ProductArgs, out: &mut impl Write) -> Result<(), String> {
    let mut page = ProductPage::running_shoes()
        .map_err(|error| format!("failed to load product: {error}"))?;

    if let Some(size) = &args.size {
        page.select_size(size).map_err(|error| error.to_string())?;
    }

    if let Some(color) = &args.color {
        page.select_color(color).map_err(|error| error.to_string())?;
    }

    render::product_page(out, &page).map_err(output_error)
}
