//! Argument parsing for the operator CLI.

use clap::{Parser, Subcommand};

/// Operator CLI for validating configuration and exercising the Seedr
/// download-client adapter by hand, outside the surrounding import
/// pipeline. Configuration is read from `SEEDR_*` environment variables
/// (see `seedr-config`).
#[derive(Debug, Parser)]
#[command(name = "seedr-cli", version, about)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the adapter's health checks (`Test`): account reachability,
    /// quota, download directory, and ownership registry connectivity.
    Test,
    /// Submit a release by magnet URI and print the resulting download id.
    Submit {
        /// Magnet URI to upload to the cloud account.
        #[arg(long)]
        magnet: String,
        /// Display title to fall back to if the cloud and caller both omit
        /// a hash.
        #[arg(long, default_value = "")]
        title: String,
        /// BitTorrent info-hash, if already known to the caller.
        #[arg(long)]
        info_hash: Option<String>,
    },
    /// Fetch and print the current `GetItems` view as JSON.
    Items,
    /// Remove a tracked item by download id.
    Remove {
        /// The download id (info-hash, or `seedr-<id>`) to remove.
        download_id: String,
        /// Also delete the local payload from the download directory.
        #[arg(long)]
        delete_local: bool,
    },
    /// Mark a tracked item as imported by download id.
    Import {
        /// The download id (info-hash, or `seedr-<id>`) to mark imported.
        download_id: String,
    },
}
