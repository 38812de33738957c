//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Referral network explorer: fetch, search and lay out referral trees
#[derive(Parser, Debug)]
#[command(name = "refnet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: ./.refnet.toml if present)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Read the referral document from a JSON file instead of the service
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// User whose referral network is shown (default: api.user_id)
    #[arg(short, long, global = true, env = "REFNET_USER")]
    pub user: Option<String>,

    /// Referral service base URL (default: api.base_url)
    #[arg(long, global = true, value_hint = ValueHint::Url)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the referral tree
    Tree {
        /// Highlight the path to the first match
        #[arg(short, long)]
        search: Option<String>,
        /// Ignore the initial collapse depth
        #[arg(short, long)]
        expand_all: bool,
    },

    /// Print the root-to-match path for a name
    Search {
        /// Case-insensitive name fragment
        term: String,
    },

    /// Show details of the first user matching a name
    Show {
        /// Case-insensitive name fragment
        name: String,
    },

    /// Emit draw instructions as JSON
    Layout {
        /// Container width
        #[arg(long)]
        width: Option<f64>,
        /// Container height
        #[arg(long)]
        height: Option<f64>,
        /// Zoom in this many steps
        #[arg(long, default_value_t = 0, conflicts_with = "zoom_out")]
        zoom_in: u32,
        /// Zoom out this many steps
        #[arg(long, default_value_t = 0)]
        zoom_out: u32,
        /// Highlight the path to the first match
        #[arg(short, long)]
        search: Option<String>,
        /// Ignore the initial collapse depth
        #[arg(short, long)]
        expand_all: bool,
    },

    /// Interactive explorer reading commands from stdin
    Explore,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,

    /// Print config template
    Template,
}
