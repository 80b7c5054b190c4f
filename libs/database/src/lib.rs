//! Database connectors for the shop services.
//!
//! The storefront persists users, products and orders in MongoDB. This crate owns
//! connection settings, startup retry with backoff and health probes so that domain
//! crates only ever see a ready [`mongodb::Database`] handle.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector and health checks
//! - `config` (default) - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
