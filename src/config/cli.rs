//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// wire-bot: command-line client for the Wire bot API
///
/// Sends messages, lists devices, fetches prekeys and transfers assets
/// on behalf of a bot.
#[derive(Debug, Parser)]
#[command(name = "wire-bot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Bot bearer token
    #[arg(long, global = true, env = defaults::TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Seconds without progress before a request is aborted
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Maximum response body size in bytes (0 = unbounded)
    #[arg(long = "max-body-bytes", global = true)]
    pub max_body_bytes: Option<usize>,

    /// Extra HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V", global = true)]
    pub headers: Vec<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for wire-bot
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE_NAME)]
        output: PathBuf,
    },

    /// Post an encrypted message envelope read from a JSON file
    SendMessage {
        /// JSON file holding the message envelope
        payload: PathBuf,

        /// Accept the message even if some recipient devices are missing
        #[arg(long = "ignore-missing")]
        ignore_missing: bool,
    },

    /// List the bot's devices
    Clients {
        /// Optional JSON file sent as the request body
        payload: Option<PathBuf>,
    },

    /// Fetch prekey bundles for the users and devices in a JSON file
    Prekeys {
        /// JSON file mapping user IDs to device IDs
        payload: PathBuf,
    },

    /// Download an asset
    GetAsset {
        /// Asset ID (key)
        asset_id: String,

        /// Asset access token
        #[arg(long = "asset-token")]
        asset_token: String,

        /// Write the asset here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Upload a pre-encoded multipart/mixed asset body
    UploadAsset {
        /// File holding the multipart body (boundary `frontier`)
        file: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning parse errors.
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown flags or missing arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
