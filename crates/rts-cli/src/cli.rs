//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rts_app::config::AttemptStorage;
use rts_domain::service::PayloadEncoding;
use rts_types::OutputFormat;

#[derive(Parser)]
#[command(name = "rts-confirm")]
#[command(version)]
#[command(about = "Confirm rail transport orders received as links")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, csv). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a link payload and print the text
    Decode {
        /// Encoded payload
        value: String,

        /// Payload encoding (auto, percent, base64, plain)
        #[arg(long, short = 'e', default_value = "auto")]
        encoding: PayloadEncoding,
    },

    /// List the orders carried by a link
    Orders {
        /// Full link, query string or raw data value
        link: String,

        /// Report the opened orders to the workflow
        #[arg(long)]
        notify: bool,
    },

    /// Print a time slot table
    Slots {
        /// Interval in minutes. Uses the configured departure interval if not specified.
        #[arg(long, short = 'i')]
        interval: Option<u32>,
    },

    /// Write the order form as HTML
    Render {
        /// Full link, query string or raw data value
        link: String,

        /// Output HTML file (stdout if omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Log in to the workflow service
    Login {
        #[arg(long, short = 'u')]
        username: String,

        /// Password (read from RTS_PASSWORD if omitted)
        #[arg(long, short = 'p')]
        password: Option<String>,
    },

    /// Confirm and submit the orders of a link
    Submit {
        /// Full link, query string or raw data value
        link: String,

        #[arg(long, short = 'u')]
        username: String,

        /// Password (read from RTS_PASSWORD if omitted)
        #[arg(long, short = 'p')]
        password: Option<String>,

        /// JSON file with edits keyed by order id
        #[arg(long)]
        edits: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set authentication endpoint URL
        #[arg(long)]
        set_auth_url: Option<String>,

        /// Set order submission endpoint URL
        #[arg(long)]
        set_submit_url: Option<String>,

        /// Set link-opened endpoint URL
        #[arg(long)]
        set_link_opened_url: Option<String>,

        /// Set login attempt storage (file, memory)
        #[arg(long)]
        set_storage: Option<AttemptStorage>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
