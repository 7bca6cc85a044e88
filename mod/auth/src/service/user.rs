use notehub_sql::{Row, SQLError, Value};
use tracing::info;

use crate::model::{normalize_username, RegisterRequest, User};
use crate::service::{password, AuthError, AuthService};

impl AuthService {
    /// Register a new account.
    ///
    /// The username is lowercased before the insert. Duplicate detection
    /// relies on the store's UNIQUE constraint, so two concurrent
    /// registrations of the same normalized username cannot both succeed
    /// and a failed duplicate leaves existing rows untouched.
    pub fn register(&self, input: RegisterRequest) -> Result<User, AuthError> {
        let username = normalize_username(&input.username);
        let name = input.name.trim().to_string();
        if username.is_empty() || name.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "username, name and password are required".into(),
            ));
        }

        let hash = password::hash_password(&input.password)?;
        let id = self
            .sql
            .insert(
                "INSERT INTO users (username, password, name) VALUES (?1, ?2, ?3)",
                &[
                    Value::Text(username.clone()),
                    Value::Text(hash.clone()),
                    Value::Text(name.clone()),
                ],
            )
            .map_err(|e| match e {
                SQLError::Constraint(_) => AuthError::DuplicateUsername,
                other => AuthError::Storage(other.to_string()),
            })?;

        info!(username = %username, id, "registered new user");

        Ok(User {
            id,
            username,
            name,
            password_hash: hash,
        })
    }

    /// Look up a user by username. The lookup normalizes, so any casing
    /// of a registered name resolves to the same row.
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let rows = self
            .sql
            .query(
                "SELECT id, username, password, name FROM users WHERE username = ?1",
                &[Value::Text(normalize_username(username))],
            )
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        rows.first().map(user_from_row).transpose()
    }
}

/// Map a users row into the model struct.
fn user_from_row(row: &Row) -> Result<User, AuthError> {
    Ok(User {
        id: row
            .get_i64("id")
            .ok_or_else(|| AuthError::Internal("users row missing id".into()))?,
        username: row.get_str("username").unwrap_or_default().to_string(),
        name: row.get_str("name").unwrap_or_default().to_string(),
        password_hash: row.get_str("password").unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use notehub_sql::{SQLStore, SqliteStore};

    use super::*;
    use crate::service::AuthConfig;

    fn test_service() -> Arc<AuthService> {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        AuthService::new(sql, AuthConfig::default()).unwrap()
    }

    fn register_input(username: &str, name: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn register_stores_normalized_username() {
        let svc = test_service();
        let user = svc.register(register_input("CS101", "Alice A", "pw1")).unwrap();
        assert_eq!(user.username, "cs101");
        assert!(user.id > 0);

        // Any casing resolves to the same row.
        let found = svc.find_by_username("Cs101").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.name, "Alice A");
    }

    #[test]
    fn register_rejects_empty_fields() {
        let svc = test_service();
        assert!(matches!(
            svc.register(register_input("", "Alice", "pw")),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            svc.register(register_input("alice", "  ", "pw")),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            svc.register(register_input("alice", "Alice", "")),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn duplicate_username_is_case_insensitive() {
        let svc = test_service();
        svc.register(register_input("CS101", "Alice A", "pw1")).unwrap();

        let err = svc
            .register(register_input("cs101", "Alice B", "pw2"))
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));
        assert_eq!(err.to_string(), "this username is already registered");

        // The first registration survives intact.
        let found = svc.find_by_username("cs101").unwrap().unwrap();
        assert_eq!(found.name, "Alice A");
    }

    #[test]
    fn password_is_stored_hashed() {
        let svc = test_service();
        let user = svc.register(register_input("alice", "Alice", "pw1")).unwrap();
        assert_ne!(user.password_hash, "pw1");
        assert!(password::verify_password("pw1", &user.password_hash));
    }

    #[test]
    fn find_unknown_username_is_none() {
        let svc = test_service();
        assert!(svc.find_by_username("ghost").unwrap().is_none());
    }
}
