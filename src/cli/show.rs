//! Show command implementation.
//!
//! Prints a page's title and merged render context as JSON.

use clap::Args;
use serde_json::{json, Value};

use crate::error::{PagesError, Result};
use crate::output::{display_path, Printer};

use super::PageArgs;

/// Show a page's title and merged context
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub page: PageArgs,
}

pub fn run(args: ShowArgs, printer: &Printer) -> Result<()> {
    let registry = args.page.site.load_registry()?;
    let mut page = args.page.find_page(&registry)?;

    let title = page.title()?;
    let context = page.context()?;

    if let Some(source) = page.source() {
        printer.info("Source", &display_path(source));
    }

    let summary = json!({
        "request_path": page.request_path(),
        "title": title,
        "context": Value::Object(context),
    });
    let pretty = serde_json::to_string_pretty(&summary).map_err(|e| PagesError::Config {
        message: format!("Cannot serialize context: {}", e),
        help: None,
    })?;
    println!("{pretty}");

    Ok(())
}
