//! List command implementation.
//!
//! Enumerates every request path in each collection, e.g. for a static
//! exporter to crawl.

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, plural, Printer};

use super::SiteArgs;

/// List every request path in each collection
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print URLs instead of request paths
    #[arg(long)]
    pub urls: bool,

    #[command(flatten)]
    pub site: SiteArgs,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let registry = args.site.load_registry()?;

    if registry.is_empty() {
        printer.warning("Empty", "no collections configured");
        return Ok(());
    }

    for collection in &registry {
        let paths = collection.request_paths();
        printer.info(
            collection.name(),
            &format!(
                "{} in {}",
                plural(paths.len(), "page", "pages"),
                display_path(collection.root())
            ),
        );

        for request_path in &paths {
            if args.urls {
                println!("{}", collection.url_for(request_path));
            } else {
                println!("{request_path}");
            }
        }
    }

    Ok(())
}
