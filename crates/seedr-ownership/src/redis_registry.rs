//! Redis-backed ownership registry.
//!
//! Key scheme: `seedr:owners:<UPPER_HEX_INFO_HASH>`, member values are
//! instance tags. A single [`redis::aio::ConnectionManager`] is shared
//! process-wide; it reconnects automatically, so a transient connection
//! drop surfaces as one failed command rather than a fatal error.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use seedr_core::{OwnershipCheck, OwnershipRegistry, ReleaseOutcome};
use tokio::time::timeout;

use crate::error::OwnershipError;

const TTL_SECONDS: i64 = 7 * 24 * 60 * 60;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const COMMAND_TIMEOUT: Duration = Duration::from_secs(3);

/// Lua script that atomically removes a member, reads cardinality, and
/// deletes the key when it reaches zero, otherwise refreshes the TTL.
/// Returns 1 when the caller was the last owner, 0 otherwise.
const RELEASE_SCRIPT: &str = r"
local removed = redis.call('SREM', KEYS[1], ARGV[1])
local remaining = redis.call('SCARD', KEYS[1])
if remaining == 0 then
    redis.call('DEL', KEYS[1])
    return 1
else
    redis.call('EXPIRE', KEYS[1], ARGV[2])
    return 0
end
";

fn owner_set_key(info_hash: &str) -> String {
    format!("seedr:owners:{info_hash}")
}

/// `OwnershipRegistry` backed by a remote Redis-compatible store.
pub struct RedisOwnershipRegistry {
    manager: redis::aio::ConnectionManager,
    instance_tag: String,
    release_script: redis::Script,
}

impl RedisOwnershipRegistry {
    /// Connect to `connection_string` and build a registry that claims
    /// ownership under `instance_tag`.
    ///
    /// `instance_tag` is assumed already validated against
    /// `[A-Za-z0-9_-]+` by the configuration layer.
    pub async fn connect(connection_string: &str, instance_tag: impl Into<String>) -> Result<Self, OwnershipError> {
        let client = redis::Client::open(connection_string)
            .map_err(|source| OwnershipError::Connect { source })?;
        let manager = timeout(CONNECT_TIMEOUT, client.get_connection_manager())
            .await
            .map_err(|_| OwnershipError::Timeout {
                operation: "connect",
            })?
            .map_err(|source| OwnershipError::Connect { source })?;
        Ok(Self {
            manager,
            instance_tag: instance_tag.into(),
            release_script: redis::Script::new(RELEASE_SCRIPT),
        })
    }
}

#[async_trait]
impl OwnershipRegistry for RedisOwnershipRegistry {
    async fn claim_ownership(&self, info_hash: &str) {
        let mut conn = self.manager.clone();
        let key = owner_set_key(info_hash);
        let result = timeout(COMMAND_TIMEOUT, async {
            conn.sadd::<_, _, ()>(&key, &self.instance_tag).await?;
            conn.expire::<_, ()>(&key, TTL_SECONDS).await
        })
        .await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(source)) => {
                tracing::warn!(error = %source, info_hash, "ownership claim command failed");
            }
            Err(_) => {
                tracing::warn!(info_hash, "ownership claim timed out");
            }
        }
    }

    async fn is_owned_by_me(&self, info_hash: &str) -> OwnershipCheck {
        let mut conn = self.manager.clone();
        let key = owner_set_key(info_hash);
        let result = timeout(
            COMMAND_TIMEOUT,
            conn.sismember::<_, _, bool>(&key, &self.instance_tag),
        )
        .await;

        match result {
            Ok(Ok(true)) => OwnershipCheck::Owned,
            Ok(Ok(false)) => OwnershipCheck::NotOwned,
            Ok(Err(source)) => {
                tracing::warn!(error = %source, info_hash, "ownership membership check failed");
                OwnershipCheck::Unknown
            }
            Err(_) => {
                tracing::warn!(info_hash, "ownership membership check timed out");
                OwnershipCheck::Unknown
            }
        }
    }

    async fn release_ownership(&self, info_hash: &str) -> ReleaseOutcome {
        let mut conn = self.manager.clone();
        let key = owner_set_key(info_hash);
        let result = timeout(
            COMMAND_TIMEOUT,
            self.release_script
                .key(&key)
                .arg(&self.instance_tag)
                .arg(TTL_SECONDS)
                .invoke_async::<i64>(&mut conn),
        )
        .await;

        match result {
            Ok(Ok(1)) => ReleaseOutcome::WasLastOwner,
            Ok(Ok(_)) => ReleaseOutcome::OthersRemain,
            Ok(Err(source)) => {
                tracing::warn!(error = %source, info_hash, "ownership release script failed");
                ReleaseOutcome::Unknown
            }
            Err(_) => {
                tracing::warn!(info_hash, "ownership release timed out");
                ReleaseOutcome::Unknown
            }
        }
    }

    async fn test_connection(&self) -> Option<String> {
        let mut conn = self.manager.clone();
        let result = timeout(COMMAND_TIMEOUT, redis::cmd("PING").query_async::<String>(&mut conn)).await;
        match result {
            Ok(Ok(_)) => None,
            Ok(Err(source)) => Some(source.to_string()),
            Err(_) => Some("ownership registry ping timed out".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_set_key_uses_expected_scheme() {
        assert_eq!(owner_set_key("ABCDEF"), "seedr:owners:ABCDEF");
    }
}
