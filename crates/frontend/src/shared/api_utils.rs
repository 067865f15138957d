//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::config;

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/solicitudes/resumen");
/// ```
///
/// # Arguments
/// * `path` - The API path (should start with "/")
pub fn api_url(path: &str) -> String {
    join_url(&config().api.base_url, path)
}

/// Absolute link to a server-relative resource such as an uploaded document.
/// Already absolute URLs are returned unchanged.
pub fn resource_url(reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        reference.to_string()
    } else {
        api_url(reference)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:8000", "/api/solicitudes/resumen"),
            "http://localhost:8000/api/solicitudes/resumen"
        );
        assert_eq!(join_url("http://h/", "token"), "http://h/token");
    }

    #[test]
    fn test_resource_url_keeps_absolute_links() {
        assert_eq!(
            resource_url("https://cdn.svan.es/sepa.pdf"),
            "https://cdn.svan.es/sepa.pdf"
        );
        assert!(resource_url("/uploads/documents/a.pdf").ends_with("/uploads/documents/a.pdf"));
    }
}
