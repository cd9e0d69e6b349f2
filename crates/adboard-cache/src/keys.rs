//! Cache key builders for all Adboard cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use adboard_entity::SessionKind;

/// Prefix applied to all Adboard cache keys.
const PREFIX: &str = "adboard";

// ── Session keys ───────────────────────────────────────────

/// Cache key for a browser session record.
///
/// Public and admin sessions live in separate namespaces so that an
/// identifier leaked from one surface cannot address the other.
pub fn session(kind: SessionKind, session_id: &str) -> String {
    format!("{PREFIX}:session:{kind}:{session_id}")
}

// ── Permission keys ────────────────────────────────────────

/// Cache key for the expanded permission set of a role combination.
///
/// `roles` must already be normalized and sorted so that equivalent
/// combinations map to the same entry.
pub fn permission_set(roles_version: i64, roles: &[String]) -> String {
    format!("{PREFIX}:perm:v{roles_version}:{}", roles.join("+"))
}

/// Prefix covering every expanded permission set entry, for invalidation.
pub fn permission_set_prefix() -> String {
    format!("{PREFIX}:perm:")
}
