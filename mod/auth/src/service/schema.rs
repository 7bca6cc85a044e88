use notehub_sql::SQLStore;

use crate::service::AuthError;

/// Initialize the SQLite schema for user accounts.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), AuthError> {
    let statements = [
        // Users table. Usernames are stored lowercased; the UNIQUE
        // constraint arbitrates concurrent registrations of the same
        // name, so the service never does check-then-insert.
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            name TEXT NOT NULL
        )",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])
            .map_err(|e| AuthError::Storage(e.to_string()))?;
    }

    Ok(())
}
