//! Render command implementation.
//!
//! Prints a page body as HTML: Markdown is converted, HTML templates are
//! printed as written.

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, Printer};

use super::PageArgs;

/// Render a page body as HTML
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub page: PageArgs,
}

pub fn run(args: RenderArgs, printer: &Printer) -> Result<()> {
    let registry = args.page.site.load_registry()?;
    let mut page = args.page.find_page(&registry)?;

    let html = page.as_html()?;

    if let (Some(source), Some(kind)) = (page.source(), page.source_kind()) {
        printer.status(
            "Rendered",
            &format!("{} ({kind})", printer.cyan(&display_path(source))),
        );
    }
    println!("{html}");

    Ok(())
}
