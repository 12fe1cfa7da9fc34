//! CLI argument parsing for the epitrack binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "epitrack", about = "Per-country COVID-19 case histories")]
pub struct Cli {
    /// Never call the remote provider; answer from the snapshot only
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the countries in the catalog
    List {
        /// Only countries whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one country's statistics (defaults to the last viewed country)
    Show {
        country: Option<String>,
        /// Stats for a single day (YYYY-MM-DD)
        #[arg(long, conflicts_with_all = ["from", "to"])]
        date: Option<String>,
        /// Start of an inclusive range (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End of an inclusive range (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Number of most recent days to chart
        #[arg(long, default_value_t = 7)]
        last: usize,
    },
    /// Compare the latest figures of several countries
    Compare {
        #[arg(required = true, num_args = 2..)]
        countries: Vec<String>,
    },
}
