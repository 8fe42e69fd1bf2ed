//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Metrics label for a request's route.
///
/// Uses the matched resource pattern when routing has happened, so unknown
/// paths collapse into one label instead of one series per URL.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    if let Some(pattern) = req.match_pattern() {
        return pattern;
    }

    if req.path().starts_with('/') {
        "/unmatched".to_string()
    } else {
        "/unknown".to_string()
    }
}
