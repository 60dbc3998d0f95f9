//! Unified error types and result handling.
//!
//! Constraint violations are detected by the database engine. This module only
//! classifies them so callers can tell a dangling reference from a duplicate key
//! without string matching on driver messages.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors produced by the schema helpers and the provisioning binary
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed or applied
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable cause
        message: String,
    },

    /// The engine rejected a row whose foreign key has no target
    #[error("Referential integrity violation: {message}")]
    ForeignKeyViolation {
        /// Driver message describing the failed constraint
        message: String,
    },

    /// The engine rejected a row whose primary or unique key already exists
    #[error("Duplicate key: {message}")]
    DuplicateKey {
        /// Driver message describing the failed constraint
        message: String,
    },

    /// A row required by the operation does not exist
    #[error("{table} row {key} not found")]
    NotFound {
        /// Table that was searched
        table: &'static str,
        /// Rendered primary key
        key: String,
    },

    /// Deletion refused because other rows still reference the target
    #[error("Cannot delete {table} row {key}: still referenced by {dependants}")]
    DeleteRestricted {
        /// Table of the row being deleted
        table: &'static str,
        /// Rendered primary key
        key: String,
        /// Tables (with counts) that still hold references
        dependants: String,
    },

    /// An order graph contains rows that point outside the graph
    #[error("Inconsistent order graph: {message}")]
    InvalidGraph {
        /// Which row is out of place
        message: String,
    },

    /// Any other database error
    #[error("Database error: {0}")]
    Database(DbErr),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                Self::ForeignKeyViolation { message }
            }
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::DuplicateKey { message },
            _ => Self::Database(err),
        }
    }
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(table: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            table,
            key: key.to_string(),
        }
    }

    /// Whether this error is a referential-integrity rejection.
    #[must_use]
    pub const fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::ForeignKeyViolation { .. })
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
