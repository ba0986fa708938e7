use clap::Parser;
use miette::Result;
use nanopages::cli::{Cli, Commands};
use nanopages::output::Printer;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Render(args) => nanopages::cli::render::run(args, &printer)?,
        Commands::Show(args) => nanopages::cli::show::run(args, &printer)?,
        Commands::List(args) => nanopages::cli::list::run(args, &printer)?,
        Commands::Routes(args) => nanopages::cli::routes::run(args, &printer)?,
        Commands::Completions(args) => nanopages::cli::completions::run(args)?,
    }

    Ok(())
}
