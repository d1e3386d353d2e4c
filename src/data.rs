use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub type DBConnection = Arc<Mutex<Connection>>;

/// Creates the `todos` table when it does not exist yet. Timestamps are
/// stored as RFC 3339 text; `AUTOINCREMENT` keeps deleted ids from being
/// reused.
pub fn init_schema(connection: &Connection) -> rusqlite::Result<()> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            due_date TEXT
        )",
        [],
    )?;
    Ok(())
}

pub fn open_database(path: &str) -> rusqlite::Result<DBConnection> {
    let connection = Connection::open(path)?;
    init_schema(&connection)?;
    Ok(Arc::new(Mutex::new(connection)))
}
