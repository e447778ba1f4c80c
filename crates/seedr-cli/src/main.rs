#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
#![allow(unexpected_cfgs)]

//! Operator CLI binary: loads `SEEDR_*` configuration, wires up one adapter
//! instance, and runs a single operation against it.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use seedr_adapter::{NullGrabHistorySource, SeedrAdapter};
use seedr_config::AdapterConfig;
use seedr_core::{Release, ReleasePayload};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AdapterConfig::from_env().context("loading SEEDR_* configuration")?;
    let adapter = SeedrAdapter::build(config, Arc::new(NullGrabHistorySource))
        .await
        .context("building the seedr adapter")?;
    let reconciler = adapter.reconciler();

    match cli.command {
        Command::Test => {
            let failures = reconciler.test().await;
            println!("{}", serde_json::to_string_pretty(&failures)?);
            if failures.iter().any(|f| f.severity == seedr_core::ValidationSeverity::Error) {
                anyhow::bail!("one or more validation checks failed");
            }
        }
        Command::Submit { magnet, title, info_hash } => {
            let release = Release {
                info_hash,
                payload: ReleasePayload::Magnet(magnet),
                title,
            };
            let download_id = reconciler.submit(release).await.context("submitting release")?;
            println!("{download_id}");
        }
        Command::Items => {
            let items = reconciler.get_items().await;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Command::Remove { download_id, delete_local } => {
            reconciler
                .remove_item(&download_id, delete_local)
                .await
                .context("removing item")?;
        }
        Command::Import { download_id } => {
            reconciler
                .mark_item_as_imported(&download_id)
                .await
                .context("marking item imported")?;
        }
    }

    Ok(())
}
