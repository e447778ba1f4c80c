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
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
#![allow(unexpected_cfgs)]

//! Environment-driven configuration for the Seedr adapter.
//!
//! Mirrors the settings table in the adapter's submission contract:
//! credentials, the local download directory, the cloud-delete-on-import
//! flag, and the optional shared-account ownership knobs. Parsing is split
//! from environment access (`AdapterConfig::from_settings`) so it can be
//! exercised without touching real process environment variables.

mod error;

use std::collections::HashMap;
use std::path::PathBuf;

pub use error::ConfigError;

use regex::Regex;

const ENV_PREFIX: &str = "SEEDR_";

/// `instanceTag` must match this pattern (also the shape of a valid Redis
/// ownership-set member).
fn instance_tag_pattern() -> Regex {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("static pattern is valid")
}

/// Fully resolved, validated adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Seedr account email.
    pub email: String,
    /// Seedr account password.
    pub password: String,
    /// Local target root for completed downloads.
    pub download_directory: PathBuf,
    /// Whether `MarkItemAsImported` deletes cloud state. Defaults to `true`.
    pub delete_from_cloud: bool,
    /// Whether multi-instance ownership logic is enabled. Defaults to
    /// `false`.
    pub shared_account: bool,
    /// This instance's identifier in the ownership registry. Required when
    /// `shared_account` is set.
    pub instance_tag: Option<String>,
    /// Ownership registry connection string, when multi-tenancy uses a real
    /// backend rather than the no-op fallback.
    pub redis_connection_string: Option<String>,
}

impl AdapterConfig {
    /// Build and validate a configuration from the current process
    /// environment, reading keys prefixed `SEEDR_` (e.g. `SEEDR_EMAIL`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings: HashMap<String, String> = std::env::vars()
            .filter_map(|(key, value)| key.strip_prefix(ENV_PREFIX).map(|stripped| (stripped.to_string(), value)))
            .collect();
        Self::from_settings(&settings)
    }

    /// Build and validate a configuration from a plain key/value map, with
    /// keys matching the option names in the submission contract
    /// (`email`, `password`, `downloadDirectory`, `deleteFromCloud`,
    /// `sharedAccount`, `instanceTag`, `redisConnectionString`), compared
    /// case-insensitively with either camelCase or `SCREAMING_SNAKE_CASE`
    /// keys accepted.
    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let lookup = normalize_keys(settings);

        let email = required(&lookup, "email")?;
        let password = required(&lookup, "password")?;
        let download_directory = required(&lookup, "downloaddirectory")?;

        let delete_from_cloud = optional_bool(&lookup, "deletefromcloud", "deleteFromCloud", true)?;
        let shared_account = optional_bool(&lookup, "sharedaccount", "sharedAccount", false)?;

        let instance_tag = lookup.get("instancetag").cloned();
        if let Some(tag) = &instance_tag {
            if !instance_tag_pattern().is_match(tag) {
                return Err(ConfigError::InvalidInstanceTag { value: tag.clone() });
            }
        }
        if shared_account && instance_tag.is_none() {
            return Err(ConfigError::MissingInstanceTag);
        }

        let redis_connection_string = lookup.get("redisconnectionstring").cloned();

        Ok(Self {
            email,
            password,
            download_directory: PathBuf::from(download_directory),
            delete_from_cloud,
            shared_account,
            instance_tag,
            redis_connection_string,
        })
    }

    /// Whether a real ownership registry backend should be constructed (as
    /// opposed to the no-op fallback): multi-tenancy must be enabled and a
    /// connection string supplied.
    #[must_use]
    pub fn registry_configured(&self) -> bool {
        self.shared_account && self.redis_connection_string.is_some()
    }
}

fn normalize_keys(settings: &HashMap<String, String>) -> HashMap<String, String> {
    settings
        .iter()
        .map(|(key, value)| (key.to_lowercase(), value.clone()))
        .collect()
}

fn required(lookup: &HashMap<String, String>, key: &'static str) -> Result<String, ConfigError> {
    lookup
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing { name: key })
}

fn optional_bool(
    lookup: &HashMap<String, String>,
    key: &'static str,
    display_name: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup.get(key) {
        None => Ok(default),
        Some(value) => match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidBool {
                name: display_name,
                value: value.clone(),
            }),
        },
    }
}
