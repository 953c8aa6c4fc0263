//! Driver cursor boundary.
//!
//! The dialect talks to the database only through [`Cursor`]. Any ODBC
//! binding can implement it; [`RecordingCursor`] is an in-memory
//! implementation that records what it was asked to execute.
//!
//! # Example
//!
//! ```ignore
//! use mssql_odbc_dialect::{MssqlDialect, Param, RecordingCursor};
//!
//! let dialect = MssqlDialect::new();
//! let mut cursor = RecordingCursor::new();
//! dialect.do_execute(&mut cursor, "SELECT ?", &[Param::Int(1)])?;
//! assert_eq!(cursor.executed()[0].statement, "SELECT ?");
//! ```

use crate::value::Param;
use std::collections::VecDeque;

/// Error reported by a driver.
///
/// Operational errors (connection loss, timeouts, server-side failures while
/// running the statement) are logged by the dialect before being returned.
pub trait DriverError: std::error::Error + Send + Sync + 'static {
    fn is_operational(&self) -> bool;
}

/// A database cursor able to execute one statement with bound parameters.
///
/// Parameters passed to [`execute`](Cursor::execute) are already translated:
/// none of them is a [`Param::Tuple`] or [`Param::NotGiven`].
pub trait Cursor {
    type Error: DriverError;

    /// Executes `statement`, binding `params` to its `?` placeholders in order.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if execution fails.
    fn execute(&mut self, statement: &str, params: &[Param]) -> Result<(), Self::Error>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Error = C::Error;

    fn execute(&mut self, statement: &str, params: &[Param]) -> Result<(), Self::Error> {
        (**self).execute(statement, params)
    }
}

/// A statement as received by [`RecordingCursor`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedStatement {
    pub statement: String,
    pub params: Vec<Param>,
}

/// Error produced by [`RecordingCursor`] when a failure was queued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordedError {
    #[error("operational error: {0}")]
    Operational(String),
    #[error("programming error: {0}")]
    Programming(String),
}

impl DriverError for RecordedError {
    fn is_operational(&self) -> bool {
        matches!(self, Self::Operational(_))
    }
}

/// In-memory cursor that records every execute call.
///
/// Failures can be queued with [`fail_next`](Self::fail_next); each queued
/// error is returned by one subsequent call, which is still recorded.
#[derive(Debug, Default)]
pub struct RecordingCursor {
    executed: Vec<ExecutedStatement>,
    failures: VecDeque<RecordedError>,
}

impl RecordingCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an error to be returned by the next execute call.
    pub fn fail_next(&mut self, error: RecordedError) {
        self.failures.push_back(error);
    }

    /// Statements executed so far, oldest first.
    pub fn executed(&self) -> &[ExecutedStatement] {
        &self.executed
    }

    /// Returns the most recent statement, if any.
    pub fn last(&self) -> Option<&ExecutedStatement> {
        self.executed.last()
    }

    pub fn clear(&mut self) {
        self.executed.clear();
        self.failures.clear();
    }
}

impl Cursor for RecordingCursor {
    type Error = RecordedError;

    fn execute(&mut self, statement: &str, params: &[Param]) -> Result<(), Self::Error> {
        self.executed.push(ExecutedStatement {
            statement: statement.to_string(),
            params: params.to_vec(),
        });
        match self.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
