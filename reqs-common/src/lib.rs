// reqs-common/src/lib.rs
pub mod availability;
pub mod cache;
pub mod config;
pub mod error;

// Re-export key types
pub use availability::Availability;
pub use cache::Cache;
pub use config::Config;
pub use error::{ReqsError, Result};
