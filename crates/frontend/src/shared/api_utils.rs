//! API utilities for frontend-backend communication
//!
//! Resolves relative API paths against the backend origin.

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// Absolute URLs (`http://`, `https://`) are returned unchanged, so the
/// fleet selector can be pointed at another host through its config.
///
/// # Example
/// ```rust,ignore
/// let base = api_url("/api/p909/fleet");
/// ```
pub fn api_url(path: &str) -> String {
    if is_absolute(path) {
        return path.to_string();
    }
    format!("{}{}", api_base(), path)
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_detection() {
        assert!(is_absolute("https://fleet.example.com/api"));
        assert!(is_absolute("http://127.0.0.1:3000/api/p909/fleet"));
        assert!(!is_absolute("/api/p909/fleet"));
    }
}
