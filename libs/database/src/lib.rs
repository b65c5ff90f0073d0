//! MongoDB connectivity for the workspace, plus retry helpers shared by any
//! future backend.
//!
//! Feature flags: `mongodb` (default) pulls in the connector, `config` adds
//! environment loading through `core_config::FromEnv`, `all` enables both.
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let products = client.database("storefront").collection::<Document>("products");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry, retry_with_backoff};
