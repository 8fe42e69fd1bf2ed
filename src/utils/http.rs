//! HTTP utility functions for extracting request information.

use actix_web::HttpRequest;

/// Proxy headers consulted for the client address, most trusted first
const CLIENT_IP_HEADERS: [&str; 4] = [
    "X-Forwarded-For",
    "X-Real-IP",
    "CF-Connecting-IP",
    "Forwarded",
];

/// Client IP address for request logging.
///
/// Takes the first hop of the proxy headers, falling back to the peer address.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    CLIENT_IP_HEADERS
        .iter()
        .filter_map(|name| req.headers().get(*name)?.to_str().ok().map(|v| (*name, v)))
        .find_map(|(name, value)| first_hop(name, value))
        .or_else(|| req.connection_info().peer_addr().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Extract user agent from request headers
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

fn first_hop(header: &str, value: &str) -> Option<String> {
    let hop = value.split(',').next()?.trim();

    // RFC 7239: `Forwarded: for=192.0.2.60;proto=http`
    let hop = if header == "Forwarded" {
        hop.split(';')
            .find_map(|pair| pair.trim().strip_prefix("for="))?
            .trim_matches('"')
    } else {
        hop
    };

    (!hop.is_empty()).then(|| hop.to_string())
}
