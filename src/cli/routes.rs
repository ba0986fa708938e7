//! Routes command implementation.

use clap::Args;

use crate::error::Result;
use crate::output::Printer;

use super::SiteArgs;

/// Print the routes each collection serves
#[derive(Args, Debug)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

pub fn run(args: RoutesArgs, printer: &Printer) -> Result<()> {
    let registry = args.site.load_registry()?;

    for collection in &registry {
        for route in collection.routes() {
            let pattern = match route.pattern.as_str() {
                "" => "(index)",
                other => other,
            };
            printer.info(
                &route.name,
                &format!("{} {} {}", collection.mount(), printer.dim("->"), pattern),
            );
        }
    }

    Ok(())
}
