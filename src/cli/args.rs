use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "devstreak", version, author, about = "Coding consistency dashboard for your terminal")]
pub struct Cli {
    /// Account to analyze instead of the configured identity
    #[arg(long, short, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print streaks, grade and weekly/monthly breakdown for a year
    Stats {
        /// Calendar year (defaults to the current year)
        #[arg(long, short)]
        year: Option<i32>,
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draw the contribution heatmap for a year
    Heatmap {
        /// Calendar year (defaults to the current year)
        #[arg(long, short)]
        year: Option<i32>,
    },
    /// Show profile totals, top languages and recent activity
    Profile {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Replace an existing file
        #[arg(long)]
        overwrite: bool,
    },
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
}
