//! epitrack: per-country COVID-19 case histories from the terminal.
//!
//! Usage examples
//! --------------
//!
//! - List the catalog, optionally filtered
//!   $ epitrack list
//!   $ epitrack list --search an
//!
//! - Show a country (the last viewed one when omitted)
//!   $ epitrack show Mexico
//!   $ epitrack show Mexico --date 2023-03-05
//!   $ epitrack show Mexico --from 2023-03-01 --to 2023-03-07 --last 14
//!
//! - Compare the latest figures of several countries
//!   $ epitrack compare Mexico Canada Japan
//!
//! Configuration is read from the environment (and a `.env` file); see
//! `config.rs`. Without `EPITRACK_API_KEY` every answer comes from the
//! bundled snapshot.

mod cli;
mod commands;
mod config;
mod main_lib;
mod prefs_store;

use clap::Parser;

use cli::{Cli, Command};
use commands::Selection;
use config::Config;
use main_lib::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing();
    let state = build_state(&config, cli.offline)?;

    let output = match cli.command {
        Command::List { search } => commands::list(&state, search.as_deref(), cli.json)?,
        Command::Show {
            country,
            date,
            from,
            to,
            last,
        } => {
            let selection = Selection::from_args(date, from, to);
            commands::show(&state, country, selection, last, cli.json).await?
        }
        Command::Compare { countries } => commands::compare(&state, countries, cli.json).await?,
    };

    println!("{}", output);
    Ok(())
}
