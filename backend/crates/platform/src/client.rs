//! Client identification utilities
//!
//! Intake submissions are anonymous; the client address is only recorded in
//! logs so staff can trace spam waves back to a source.

use http::HeaderMap;
use std::net::IpAddr;

/// Client IP address for logging.
///
/// Prefers the first entry of `X-Forwarded-For` (reverse proxy setups),
/// then `X-Real-IP`, then the direct connection address.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    };

    forwarded.or_else(real_ip).or(direct_ip)
}

/// Same as [`extract_client_ip`], rendered for a log field.
pub fn client_ip_for_log(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> String {
    extract_client_ip(headers, direct_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_real_ip_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));

        let direct: IpAddr = "127.0.0.1".parse().unwrap();
        let ip = extract_client_ip(&headers, Some(direct));
        assert_eq!(ip, Some("198.51.100.4".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("garbage"));
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }

    #[test]
    fn test_client_ip_for_log_unknown() {
        assert_eq!(client_ip_for_log(&HeaderMap::new(), None), "unknown");
    }
}
