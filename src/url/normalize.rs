use crate::UrlError;
use url::Url;

/// Tracking query parameters dropped during canonicalization
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "mc_eid", "yclid"];

/// Canonicalizes an article URL so the same article always maps to one string
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an http(s) scheme and a host
/// 3. Lowercase the host (done by the parser)
/// 4. Remove the fragment
/// 5. Remove tracking query parameters (`utm_*`, `fbclid`, ...), keeping the
///    order of the remaining ones
/// 6. Remove an empty query string
///
/// Scheme and path are kept as-is: the canonical URL is also the address the
/// detail page is fetched from.
///
/// # Examples
///
/// ```
/// use briefex::url::canonicalize_url;
///
/// let url = canonicalize_url("https://NEWS.example.com/a/1?utm_source=x#top").unwrap();
/// assert_eq!(url.as_str(), "https://news.example.com/a/1");
/// ```
pub fn canonicalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    if url.query().is_some() {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !is_tracking_param(key))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(kept);
        }
    }

    Ok(url)
}

/// Checks if a query parameter is a tracking parameter
fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}
