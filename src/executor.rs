use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::error::QueryError;

/// Owns the process-wide database connection. One statement executes at a
/// time; the connection runs in auto-commit mode and is closed on drop.
pub struct SqlExecutor {
    conn: Connection,
}

/// Outcome of a single statement: a result set for reads, a changed-row
/// count for writes.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Affected {
        count: usize,
    },
}

impl SqlExecutor {
    /// Open the database file, creating it if absent.
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| anyhow::anyhow!("Failed to open database '{}': {}", path, e))?;
        Ok(SqlExecutor { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> anyhow::Result<Self> {
        Ok(SqlExecutor { conn: Connection::open_in_memory()? })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Execute one SQL statement. Read statements return the full result
    /// set; write statements return the number of rows changed. Errors are
    /// returned, never raised, and leave the connection usable.
    pub fn execute(&self, sql: &str) -> Result<QueryResult, QueryError> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(QueryError::Other("empty statement".to_string()));
        }

        if is_read_statement(sql) {
            self.execute_read(sql)
        } else {
            self.execute_write(sql)
        }
    }

    fn execute_read(&self, sql: &str) -> Result<QueryResult, QueryError> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> =
            stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut out = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                values.push(format_value(row.get_ref(i)?));
            }
            out.push(values);
        }

        Ok(QueryResult::Rows { columns, rows: out })
    }

    fn execute_write(&self, sql: &str) -> Result<QueryResult, QueryError> {
        let count = self.conn.execute(sql, [])?;
        Ok(QueryResult::Affected { count })
    }

    /// List user tables, routed through the normal result pipeline.
    pub fn list_tables(&self) -> Result<QueryResult, QueryError> {
        self.execute(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name;",
        )
    }

    /// Describe a table's columns via `PRAGMA table_info`. The name is
    /// checked against `sqlite_master` first: pragmas cannot take bound
    /// parameters, so only known table names are interpolated.
    pub fn describe_table(&self, table: &str) -> Result<QueryResult, QueryError> {
        let exists: bool = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get::<_, i64>(0),
            )
            .map(|n| n > 0)?;

        if !exists {
            return Err(QueryError::Other(format!("no such table: {table}")));
        }

        self.execute(&format!("PRAGMA table_info({table});"))
    }
}

/// Statements whose leading keyword produces rows. Everything else goes
/// through the write path and reports an affected-row count.
fn is_read_statement(sql: &str) -> bool {
    let keyword = sql
        .trim_start()
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_uppercase();
    matches!(keyword.as_str(), "SELECT" | "WITH" | "PRAGMA")
}

fn format_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} byte blob>", b.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_executor() -> SqlExecutor {
        let executor = SqlExecutor::open_in_memory().unwrap();
        executor
            .connection()
            .execute_batch(
                "CREATE TABLE users (
                     id INTEGER PRIMARY KEY,
                     name TEXT NOT NULL,
                     age INTEGER
                 );
                 INSERT INTO users VALUES (1, 'Alice', 34);
                 INSERT INTO users VALUES (2, 'Bob', NULL);",
            )
            .unwrap();
        executor
    }

    #[test]
    fn classifies_leading_keyword() {
        assert!(is_read_statement("SELECT 1"));
        assert!(is_read_statement("  select * from t"));
        assert!(is_read_statement("WITH x AS (SELECT 1) SELECT * FROM x"));
        assert!(is_read_statement("PRAGMA table_info(users)"));
        assert!(!is_read_statement("INSERT INTO t VALUES (1)"));
        assert!(!is_read_statement("UPDATE t SET a = 1"));
        assert!(!is_read_statement("CREATE TABLE t (id INT)"));
        assert!(!is_read_statement(""));
    }

    #[test]
    fn select_returns_columns_matching_row_arity() {
        let executor = seeded_executor();
        match executor.execute("SELECT id, name, age FROM users ORDER BY id;").unwrap() {
            QueryResult::Rows { columns, rows } => {
                assert_eq!(columns, vec!["id", "name", "age"]);
                assert_eq!(rows.len(), 2);
                for row in &rows {
                    assert_eq!(row.len(), columns.len());
                }
                assert_eq!(rows[0], vec!["1", "Alice", "34"]);
                assert_eq!(rows[1], vec!["2", "Bob", "NULL"]);
            }
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn write_reports_rows_changed() {
        let executor = seeded_executor();

        let result = executor
            .execute("UPDATE users SET age = 40 WHERE age IS NOT NULL;")
            .unwrap();
        assert_eq!(result, QueryResult::Affected { count: 1 });

        // Verify through a follow-up read.
        match executor.execute("SELECT COUNT(*) FROM users WHERE age = 40;").unwrap() {
            QueryResult::Rows { rows, .. } => assert_eq!(rows[0][0], "1"),
            other => panic!("expected rows, got {other:?}"),
        }

        let result = executor.execute("DELETE FROM users;").unwrap();
        assert_eq!(result, QueryResult::Affected { count: 2 });
    }

    #[test]
    fn constraint_error_leaves_connection_usable() {
        let executor = seeded_executor();

        let err = executor
            .execute("INSERT INTO users VALUES (1, 'Duplicate', 1);")
            .unwrap_err();
        assert!(matches!(err, QueryError::Constraint(_)));

        // The session continues after a failed statement.
        let result = executor
            .execute("INSERT INTO users VALUES (3, 'Carol', 28);")
            .unwrap();
        assert_eq!(result, QueryResult::Affected { count: 1 });
    }

    #[test]
    fn syntax_error_is_classified() {
        let executor = seeded_executor();
        let err = executor.execute("SELEC * FROM users;").unwrap_err();
        assert!(matches!(err, QueryError::Syntax(_)));
    }

    #[test]
    fn empty_statement_is_rejected() {
        let executor = seeded_executor();
        assert!(matches!(executor.execute("   "), Err(QueryError::Other(_))));
    }

    #[test]
    fn pragma_on_missing_table_returns_empty_rows() {
        let executor = seeded_executor();
        match executor.execute("PRAGMA table_info(nonexistent_table);").unwrap() {
            QueryResult::Rows { columns, rows } => {
                assert_eq!(columns, vec!["cid", "name", "type", "notnull", "dflt_value", "pk"]);
                assert!(rows.is_empty());
            }
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn list_tables_names_user_tables_only() {
        let executor = seeded_executor();
        match executor.list_tables().unwrap() {
            QueryResult::Rows { rows, .. } => {
                assert_eq!(rows, vec![vec!["users".to_string()]]);
            }
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn describe_table_checks_existence() {
        let executor = seeded_executor();

        match executor.describe_table("users").unwrap() {
            QueryResult::Rows { rows, .. } => assert_eq!(rows.len(), 3),
            other => panic!("expected rows, got {other:?}"),
        }

        let err = executor.describe_table("missing").unwrap_err();
        assert!(matches!(err, QueryError::Other(_)));
    }
}
