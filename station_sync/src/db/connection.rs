//! SQLite connection helpers.
//!
//! Provides [`connect_sqlite`] that opens a connection and applies the PRAGMAs the
//! sync relies on: WAL journaling, foreign_keys=ON (fact rows must reference a
//! station), and a 5000ms busy_timeout so concurrent runs wait for the write lock
//! instead of failing.

use diesel::{Connection, RunQueryDsl, SqliteConnection, sql_query};

use crate::db::sqlite_path;
use crate::error::PersistenceError;

/// Open a SQLite connection and apply connection-wide PRAGMAs.
pub fn connect_sqlite(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let mut conn = SqliteConnection::establish(sqlite_path(database_url))?;

    sql_query("PRAGMA journal_mode=WAL;").execute(&mut conn)?;
    sql_query("PRAGMA foreign_keys=ON;").execute(&mut conn)?;
    sql_query("PRAGMA busy_timeout=5000;").execute(&mut conn)?;
    Ok(conn)
}
