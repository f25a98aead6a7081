//! Database Connection and Setup
//!
//! Manages the local SQLite database and its migrations.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Database state wrapper
///
/// Managed before the connection exists; `conn` is filled in once the
/// background initialization finishes.
#[derive(Clone)]
pub struct DbState {
    pub conn: Arc<Mutex<Option<Connection>>>,
    pub path: PathBuf,
}

impl DbState {
    pub fn new(path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            path,
        }
    }
}

/// Open the database at `db_path` (`:memory:` for tests) and migrate it
pub async fn init_db(db_path: &Path) -> Result<DbState, String> {
    let conn = Connection::open(db_path)
        .map_err(|e| format!("Failed to open db {}: {}", db_path.display(), e))?;

    run_migrations(&conn)?;

    let state = DbState::new(db_path.to_path_buf());
    *state.conn.lock().await = Some(conn);
    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS drafts (
            app_id TEXT NOT NULL,
            module_id TEXT NOT NULL,
            layout_id TEXT NOT NULL,
            document TEXT NOT NULL,
            saved_at INTEGER NOT NULL,
            PRIMARY KEY (app_id, module_id, layout_id)
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    // Older databases predate the reason column
    if !column_exists(conn, "drafts", "reason") {
        conn.execute("ALTER TABLE drafts ADD COLUMN reason TEXT", [])
            .map_err(|e| format!("Failed to add reason: {}", e))?;
    }

    Ok(())
}
