//! Canonical path handling.
//!
//! Every path the engine touches is normalized to the canonical form first:
//! exactly one leading slash, exactly one trailing slash, the empty path
//! collapsing to `/`. Templates and inbound request paths go through the
//! same normalization, so matching and reversal agree on shape.

/// Normalizes a path to canonical form.
pub fn canonicalize(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return "/".to_owned();
    }
    format!("/{trimmed}/")
}

/// Joins a base path and a sub path into one canonical path.
pub fn join(base: &str, path: &str) -> String {
    let base = base.trim().trim_matches('/');
    let path = path.trim().trim_matches('/');

    match (base.is_empty(), path.is_empty()) {
        (true, true) => "/".to_owned(),
        (true, false) => format!("/{path}/"),
        (false, true) => format!("/{base}/"),
        (false, false) => format!("/{base}/{path}/"),
    }
}
