//! User identity keys.
//!
//! Users are identified by email address everywhere: query ownership,
//! recommendation authorship and bookmark records. Every email is passed
//! through [`normalize_email`] before it is compared or stored, so one user
//! never ends up with two keys that differ only by case.

/// Canonical form of an email address used as an identity key.
///
/// ```
/// use prodboard_core::identity::normalize_email;
/// assert_eq!(normalize_email(" Ada@Example.COM "), "ada@example.com");
/// ```
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
