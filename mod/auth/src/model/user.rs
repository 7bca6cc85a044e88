use serde::Deserialize;

/// A user account row.
///
/// No serde derives: the password hash must never cross the HTTP
/// boundary.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned row id. Immutable.
    pub id: i64,

    /// Lowercased username. Unique at the store level.
    pub username: String,

    /// Display name.
    pub name: String,

    /// Argon2id PHC string.
    pub password_hash: String,
}

/// Input for POST /register.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub name: String,
    pub password: String,
}

/// Input for POST /login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Lowercase a username so uniqueness and lookup are case-insensitive
/// while storage stays canonical.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_username("CS101"), "cs101");
        assert_eq!(normalize_username("  Alice "), "alice");
        assert_eq!(normalize_username("already"), "already");
    }
}
