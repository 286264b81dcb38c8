use rusqlite::ErrorCode;
use thiserror::Error;

/// Recoverable query failures. These are reported to the user and the
/// session continues; the connection stays usable.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("{0}")]
    Other(String),
}

impl From<rusqlite::Error> for QueryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqlInputError { msg, .. } => QueryError::Syntax(msg),
            rusqlite::Error::SqliteFailure(e, msg) => {
                let text = msg.unwrap_or_else(|| e.to_string());
                if e.code == ErrorCode::ConstraintViolation {
                    QueryError::Constraint(text)
                } else {
                    QueryError::Other(text)
                }
            }
            other => QueryError::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn maps_prepare_failure_to_syntax() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.prepare("SELEC 1").unwrap_err();
        assert!(matches!(QueryError::from(err), QueryError::Syntax(_)));
    }

    #[test]
    fn maps_constraint_failure() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (id INTEGER PRIMARY KEY);
             INSERT INTO t VALUES (1);",
        )
        .unwrap();
        let err = conn.execute("INSERT INTO t VALUES (1)", []).unwrap_err();
        match QueryError::from(err) {
            QueryError::Constraint(msg) => assert!(msg.contains("t.id")),
            other => panic!("expected constraint error, got {other:?}"),
        }
    }
}
