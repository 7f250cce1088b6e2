//! URL handling module for Briefex
//!
//! This module provides URL validation before network access, resolution of
//! card links against a listing page, and canonicalization of article URLs
//! used as the deduplication key.

mod normalize;

use crate::UrlError;
use url::Url;

pub use normalize::canonicalize_url;

/// Characters that may never appear raw inside a fetchable URL
const FORBIDDEN_CHARS: &[char] = &[' ', '\n', '\r', '\t'];

/// Validates a URL before it is handed to the HTTP client
///
/// The URL is trimmed, then must be non-empty, use exactly the `http` or
/// `https` scheme, carry a non-empty host and contain no raw whitespace.
///
/// # Arguments
///
/// * `url_str` - The URL string to validate
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The URL is not acceptable for fetching
///
/// # Examples
///
/// ```
/// use briefex::url::validate_url;
///
/// assert!(validate_url("https://example.com/path").is_ok());
/// assert!(validate_url("ftp://x.com").is_err());
/// assert!(validate_url("http://has space.com").is_err());
/// ```
pub fn validate_url(url_str: &str) -> Result<Url, UrlError> {
    let trimmed = url_str.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Malformed("URL is empty".to_string()));
    }

    if let Some(c) = trimmed.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(UrlError::Malformed(format!(
            "URL contains whitespace character {:?}",
            c
        )));
    }

    let url = Url::parse(trimmed).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost),
    }
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

/// Returns the raw item identifier of an article URL
///
/// This is the last non-empty path segment, followed by `?` and the query when
/// the URL carries one, so `read?id=1` and `read?id=2` stay distinct. Falls
/// back to the full URL when the path has no segments.
pub fn raw_item_id(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last());

    match (segment, url.query()) {
        (Some(segment), Some(query)) if !query.is_empty() => format!("{}?{}", segment, query),
        (Some(segment), _) => segment.to_string(),
        (None, _) => url.to_string(),
    }
}
