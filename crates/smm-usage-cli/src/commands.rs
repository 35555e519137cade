use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "smm-usage")]
#[command(about = "Browse a user's uploaded media and their AI generation outputs", long_about = None)]
pub struct Cli {
    /// Disable coloured terminal output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the gallery for one email address
    Show {
        /// Email address, matched exactly
        email: String,
        /// Write a standalone HTML page to FILE instead of printing to the terminal
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },
    /// Prompt for email addresses until an empty line is entered (default)
    Interactive,
    /// List the email addresses that can be looked up
    Users,
    /// Check that the database is reachable
    Ping,
    /// Print configuration values
    PrintConfig,
}
