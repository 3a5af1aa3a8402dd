// reqs-net/src/lib.rs
pub mod http;
pub mod validation;

pub use http::{build_http_client, fetch_catalog};
pub use validation::validate_url;
