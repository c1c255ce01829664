//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use sofa_career::{
    cli::{Commands, SofaCareer},
    commands::scrape_players::{handle_scrape_players, ScrapePlayersParams},
    output::output_columns,
    Result,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = SofaCareer::parse();

    match app.command {
        Commands::Scrape {
            input,
            output,
            json,
            limit,
            headed,
            verbose,
        } => {
            handle_scrape_players(ScrapePlayersParams {
                input,
                output,
                as_json: json,
                limit,
                headed,
                verbose,
            })
            .await?
        }

        Commands::Columns => {
            println!("{}", output_columns().join(","));
        }
    }

    Ok(())
}
