use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ConfigOverrides;

#[derive(Parser)]
#[command(name = "precis")]
#[command(about = "Precis: greedy encoder-decoder summarization", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./precis.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the summarization HTTP service
    Serve {
        /// Listen host
        #[arg(long)]
        host: Option<String>,

        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the exported model
        #[arg(long)]
        model_dir: Option<PathBuf>,

        /// Maximum summary length in tokens
        #[arg(long)]
        max_length: Option<usize>,

        /// Minimum summary length in tokens
        #[arg(long)]
        min_length: Option<usize>,

        /// Fail requests that take longer than this many seconds
        #[arg(long)]
        request_timeout_secs: Option<u64>,
    },

    /// Summarize text once and print the result
    Summarize {
        /// Input text (or file path, or stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Directory holding the exported model
        #[arg(long)]
        model_dir: Option<PathBuf>,

        /// Maximum summary length in tokens
        #[arg(long)]
        max_length: Option<usize>,

        /// Minimum summary length in tokens
        #[arg(long)]
        min_length: Option<usize>,

        /// Only print the summary
        #[arg(short, long)]
        quiet: bool,
    },
}

impl Commands {
    /// Config values given on the command line for this subcommand.
    pub fn overrides(&self) -> ConfigOverrides {
        match self {
            Commands::Serve {
                host,
                port,
                model_dir,
                max_length,
                min_length,
                request_timeout_secs,
            } => ConfigOverrides {
                host: host.clone(),
                port: *port,
                model_dir: model_dir.clone(),
                max_length: *max_length,
                min_length: *min_length,
                request_timeout_secs: *request_timeout_secs,
            },
            Commands::Summarize {
                model_dir,
                max_length,
                min_length,
                ..
            } => ConfigOverrides {
                model_dir: model_dir.clone(),
                max_length: *max_length,
                min_length: *min_length,
                ..Default::default()
            },
        }
    }
}
