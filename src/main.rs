use anyhow::Result;
use clap::Parser;

use pubmed_corpus::cli::{Cli, Commands};
use pubmed_corpus::commands::{run_abstracts, run_count, run_fulltext, run_journals};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Journals(args) => {
            run_journals(args)?;
        }
        Commands::Abstracts(args) => {
            run_abstracts(args)?;
        }
        Commands::Fulltext(args) => {
            run_fulltext(args)?;
        }
        Commands::Count(args) => {
            run_count(args)?;
        }
    }

    Ok(())
}
