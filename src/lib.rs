//! SQL Server dialect shim for ODBC drivers.
//!
//! Sits between a statement compiler that emits `?` placeholders and an ODBC
//! cursor, and works around three problems SQL Server drivers have with bound
//! parameters:
//!
//! - statements with more than 2100 parameters are rejected by the server
//! - parameters inside `GROUP BY` expressions are prepared with mismatched
//!   metadata
//! - form layers hand over a "not given" marker that must be sent as NULL
//!
//! The first two are solved by inlining every parameter as a SQL literal
//! (see [`literalize`]) and executing with no bound parameters.
//!
//! # Example
//!
//! ```
//! use mssql_odbc_dialect::{MssqlDialect, Param, RecordingCursor};
//!
//! let dialect = MssqlDialect::new();
//! let mut cursor = RecordingCursor::new();
//! dialect
//!     .do_execute(
//!         &mut cursor,
//!         "SELECT foo + ? FROM bar GROUP BY foo + ?",
//!         &[Param::Int(9), Param::Int(10)],
//!     )
//!     .unwrap();
//!
//! let sent = cursor.last().unwrap();
//! assert_eq!(sent.statement, "SELECT foo + 9 FROM bar GROUP BY foo + 10");
//! assert!(sent.params.is_empty());
//! ```

pub mod config;
pub mod cursor;
pub mod dialect;
pub mod error;
pub mod literal;
pub mod registry;
pub mod rewrite;
pub mod value;

pub use config::{DialectConfig, PlaceholderCheck};
pub use cursor::{Cursor, DriverError, ExecutedStatement, RecordedError, RecordingCursor};
pub use dialect::{MssqlDialect, PreparedStatement};
pub use error::{ExecuteError, RegistryError, RewriteError};
pub use literal::{Literal, literalize};
pub use rewrite::{ExecutionPath, InlineReason};
pub use value::{Decimal, Param};
