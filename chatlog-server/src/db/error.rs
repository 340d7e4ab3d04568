//! Database error type

use sqlx::error::ErrorKind;

/// Database error, classified by what the caller could do about it.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// No pooled connection became free within the acquire timeout
    #[error("timed out waiting for a pooled connection")]
    Timeout,

    /// The pool has been shut down
    #[error("connection pool is closed")]
    PoolClosed,

    /// Could not reach or talk to the server (I/O, TLS, protocol)
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Unique, foreign-key, not-null or check constraint rejected the row
    #[error("constraint violation: {source}")]
    Constraint {
        constraint: Option<String>,
        #[source]
        source: sqlx::Error,
    },

    /// Any other statement failure (syntax, value too long, statement timeout)
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),
}

impl DbError {
    /// Short stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::PoolClosed => "pool_closed",
            Self::Connection(_) => "connection",
            Self::Constraint { .. } => "constraint",
            Self::Query(_) => "query",
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut => Self::Timeout,
            sqlx::Error::PoolClosed => Self::PoolClosed,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::WorkerCrashed => Self::Connection(e),
            sqlx::Error::Database(ref db_err) if is_constraint(db_err.kind()) => {
                let constraint = db_err.constraint().map(str::to_owned);
                Self::Constraint {
                    constraint,
                    source: e,
                }
            }
            other => Self::Query(other),
        }
    }
}

fn is_constraint(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation
    )
}
