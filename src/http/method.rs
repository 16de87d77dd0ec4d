//! HTTP method constants and utilities

/// HTTP GET method
pub const GET: &str = "GET";

/// HTTP POST method
pub const POST: &str = "POST";

/// HTTP PUT method
pub const PUT: &str = "PUT";

/// HTTP PATCH method
pub const PATCH: &str = "PATCH";

/// HTTP DELETE method
pub const DELETE: &str = "DELETE";

/// HTTP HEAD method
pub const HEAD: &str = "HEAD";

/// HTTP OPTIONS method
pub const OPTIONS: &str = "OPTIONS";

/// Verbs a request line may start with
pub const RECOGNIZED_METHODS: &[&str] = &[GET, POST, PUT, DELETE, PATCH, HEAD, OPTIONS];

/// Upper-case a recognized verb, `None` for anything else
pub fn normalize(method: &str) -> Option<&'static str> {
    RECOGNIZED_METHODS
        .iter()
        .copied()
        .find(|m| m.eq_ignore_ascii_case(method))
}

/// Infer the method for a request that did not name one
pub fn infer(has_body: bool) -> &'static str {
    if has_body {
        POST
    } else {
        GET
    }
}
