//! nktk CLI
//!
//! Command-line tools for nktk track links.
//!
//! # Commands
//!
//! - `encode` - Encode JSON track records as a fragment sequence or share URL
//! - `decode` - Decode a fragment, sequence or share URL
//! - `legacy` - Decode a version 0 URL parameter value
//! - `link` - Show the fetch that resolves a short link
//! - `response` - Decode a stored track body fetched for a short link
//! - `inspect` - Dump the field layout of one fragment

mod commands;

use clap::{Parser, Subcommand};
use nktk_codec::{LinkConfig, DEFAULT_STORAGE_URL};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// nktk track link tools.
#[derive(Parser)]
#[command(name = "nktk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the track storage server
    #[arg(global = true, long, env = "NKTK_STORAGE_URL", default_value = DEFAULT_STORAGE_URL)]
    storage_url: String,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON track records
    Encode {
        /// JSON file with one track record or an array of them (stdin if omitted)
        input: Option<PathBuf>,

        /// Print a share URL on this page instead of the bare sequence
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Decode a fragment, a fragment sequence or a share URL
    Decode {
        /// Fragment text, `/`-separated sequence, or URL with `#...nktk=`
        data: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Decode a version 0 URL parameter value
    Legacy {
        /// Parameter value
        data: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the fetch that resolves a short link
    Link {
        /// URL with `#...nktl=<id>`
        url: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Decode a stored track body
    Response {
        /// File holding the fetched body
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Dump the field layout of one fragment
    Inspect {
        /// Fragment text
        fragment: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = LinkConfig::new(cli.storage_url);

    match cli.command {
        Commands::Encode { input, url } => {
            commands::encode::run(input.as_deref(), url.as_deref())?;
        }
        Commands::Decode { data, format } => {
            commands::decode::run(&data, &format)?;
        }
        Commands::Legacy { data, format } => {
            commands::legacy::run(&data, &format)?;
        }
        Commands::Link { url, format } => {
            commands::link::run(config, &url, &format)?;
        }
        Commands::Response { file, format } => {
            commands::response::run(config, &file, &format)?;
        }
        Commands::Inspect { fragment, format } => {
            commands::inspect::run(&fragment, &format)?;
        }
        Commands::Version => {
            println!("nktk CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Track format v{}", nktk_codec::FORMAT_VERSION);
        }
    }

    Ok(())
}
