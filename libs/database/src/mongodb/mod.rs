//! Connection management and health probes for MongoDB.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{
    MongoError, connect, connect_from_config, connect_from_config_with_retry, connect_with_retry,
};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-exported so downstream crates rarely need a direct mongodb dependency
pub use mongodb::{Client, Collection, Database};
