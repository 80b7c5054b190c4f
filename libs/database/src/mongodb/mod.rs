//! MongoDB connection management and health probes.

mod codec;
mod config;
mod connector;
mod health;

pub use codec::{bson_datetime, uuid_to_bson};
pub use config::MongoConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
