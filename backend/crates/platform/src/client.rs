//! Client identification utilities
//!
//! Common functions for reading client facts out of HTTP headers:
//! the caller's IP, the requested host, and whether the request came
//! from script (`fetch`/XHR) or from a plain form post.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Header set by `fetch`/XHR callers that want a JSON response
pub const X_REQUESTED_WITH: &str = "x-requested-with";

/// Response encoding chosen for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Html,
}

/// Decide between JSON and HTML responses.
///
/// `X-Requested-With: XMLHttpRequest` or `X-Requested-With: fetch`
/// (case-insensitive) selects JSON; anything else gets HTML.
pub fn detect_response_format(headers: &HeaderMap) -> ResponseFormat {
    let requested_with = headers
        .get(X_REQUESTED_WITH)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_ascii_lowercase());

    match requested_with.as_deref() {
        Some("xmlhttprequest") | Some("fetch") => ResponseFormat::Json,
        _ => ResponseFormat::Html,
    }
}

/// Resolve the client IP address.
///
/// The direct peer address is used as-is unless `trust_forwarded_for`
/// is set, in which case the first `X-Forwarded-For` hop wins when it
/// parses.
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trust_forwarded_for: bool,
) -> Option<IpAddr> {
    if trust_forwarded_for {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|xff| xff.split(',').next())
            .and_then(|first| first.trim().parse::<IpAddr>().ok());
        if forwarded.is_some() {
            return forwarded;
        }
    }
    direct_ip
}

/// Hostname from the `Host` header, without port and IPv6 brackets
pub fn request_host(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?.trim();

    let hostname = if let Some(rest) = host.strip_prefix('[') {
        // [::1]:8080
        rest.split(']').next()?
    } else if host.matches(':').count() == 1 {
        host.split(':').next()?
    } else {
        host
    };

    if hostname.is_empty() {
        None
    } else {
        Some(hostname.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_header(name: &'static str, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_detect_json_variants() {
        for value in ["XMLHttpRequest", "xmlhttprequest", "fetch", "FETCH"] {
            let headers = with_header(X_REQUESTED_WITH, value);
            assert_eq!(detect_response_format(&headers), ResponseFormat::Json, "{value}");
        }
    }

    #[test]
    fn test_detect_html_fallback() {
        assert_eq!(
            detect_response_format(&HeaderMap::new()),
            ResponseFormat::Html
        );
        let headers = with_header(X_REQUESTED_WITH, "curl");
        assert_eq!(detect_response_format(&headers), ResponseFormat::Html);
    }

    #[test]
    fn test_client_ip_ignores_forwarded_by_default() {
        let headers = with_header("x-forwarded-for", "203.0.113.9, 10.0.0.1");
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(direct), false), Some(direct));
    }

    #[test]
    fn test_client_ip_trusted_forwarded() {
        let headers = with_header("x-forwarded-for", "203.0.113.9, 10.0.0.1");
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        assert_eq!(
            extract_client_ip(&headers, Some(direct), true),
            Some("203.0.113.9".parse().unwrap())
        );
    }

    #[test]
    fn test_client_ip_bad_forwarded_falls_back() {
        let headers = with_header("x-forwarded-for", "garbage");
        let direct: IpAddr = "192.0.2.1".parse().unwrap();
        assert_eq!(extract_client_ip(&headers, Some(direct), true), Some(direct));
    }

    #[test]
    fn test_request_host() {
        assert_eq!(
            request_host(&with_header("host", "localhost:8000")),
            Some("localhost".to_string())
        );
        assert_eq!(
            request_host(&with_header("host", "Example.COM")),
            Some("example.com".to_string())
        );
        assert_eq!(
            request_host(&with_header("host", "[::1]:8080")),
            Some("::1".to_string())
        );
        assert_eq!(request_host(&with_header("host", "::1")), Some("::1".to_string()));
        assert_eq!(request_host(&HeaderMap::new()), None);
    }
}
