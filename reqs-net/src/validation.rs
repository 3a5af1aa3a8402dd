use reqs_common::error::{ReqsError, Result};
use url::Url;

/// Validates a URL, ensuring it uses the HTTPS scheme.
pub fn validate_url(url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| ReqsError::ValidationError(format!("Failed to parse URL '{url_str}': {e}")))?;
    if url.scheme() == "https" {
        Ok(())
    } else {
        Err(ReqsError::ValidationError(format!(
            "Invalid URL scheme for '{}': Must be https, but got '{}'",
            url_str,
            url.scheme()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_https_only() {
        assert!(validate_url("https://example.com/catalog.json").is_ok());
        assert!(matches!(
            validate_url("http://example.com/catalog.json"),
            Err(ReqsError::ValidationError(_))
        ));
        assert!(validate_url("not a url").is_err());
    }
}
