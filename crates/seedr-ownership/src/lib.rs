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

//! Shared-account ownership coordination (C2): lets multiple adapter
//! instances on one Seedr account avoid deleting each other's cloud state.
//!
//! [`RedisOwnershipRegistry`] is the default implementation; when
//! multi-tenancy is disabled the [`NoopOwnershipRegistry`] is used instead.
//! Neither ever propagates an error out of the
//! [`seedr_core::OwnershipRegistry`] trait: failures collapse to the
//! `Unknown` arm of the three-valued results in [`seedr_core::ownership`].

pub mod error;
mod noop;
mod redis_registry;

pub use error::OwnershipError;
pub use noop::NoopOwnershipRegistry;
pub use redis_registry::RedisOwnershipRegistry;
