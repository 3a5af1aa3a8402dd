use std::time::Duration;

use reqs_common::config::Config;
use reqs_common::error::{ReqsError, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::{debug, error};

use crate::validation::validate_url;

const REQUEST_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT_STRING: &str = "reqs dependency orderer (Rust)";

pub fn build_http_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ReqsError::Api(format!("Failed to build HTTP client: {e}")))
}

/// Downloads the raw availability catalog. Blocks until the body is read.
pub fn fetch_catalog(config: &Config) -> Result<String> {
    let url = config.catalog_url.as_str();
    validate_url(url)?;
    debug!("Fetching availability catalog from {}", url);

    let client = build_http_client()?;
    let response = client.get(url).send().map_err(|e| {
        error!("HTTP request failed for {}: {}", url, e);
        ReqsError::from(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .unwrap_or_else(|e| format!("(Failed to read response body: {e})"));
        error!(
            "HTTP request to {} returned non-success status: {}",
            url, status
        );
        return Err(ReqsError::Api(format!(
            "HTTP status {status} from {url}. Response body: {body}"
        )));
    }

    let body = response.text()?;
    if body.trim().is_empty() {
        error!("Response body for {} was empty.", url);
        return Err(ReqsError::Api(format!(
            "Empty response body received from {url}"
        )));
    }
    debug!("Fetched {} bytes of catalog data", body.len());
    Ok(body)
}
