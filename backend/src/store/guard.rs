use rusqlite::{params, Connection};

/// Number of clients whose `package_id` is `package_id`, read from the
/// connection (or open transaction) at call time.
pub(crate) fn client_count_for(conn: &Connection, package_id: i64) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM clients WHERE package_id = ?1",
        params![package_id],
        |row| row.get(0),
    )
}
