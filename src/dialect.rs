//! SQL Server dialect for ODBC drivers.
//!
//! [`MssqlDialect`] sits between the statement compiler and the driver
//! cursor. Most statements go through untouched with their parameters bound
//! by the driver. Two cases are rewritten with every parameter inlined as a
//! literal:
//!
//! - more than 2100 parameters (SQL Server's limit per request)
//! - a `GROUP BY` clause with parameters, which ODBC drivers prepare with
//!   mismatched parameter metadata
//!
//! Operational driver errors are logged with the statement and parameters
//! as the caller passed them, then returned unchanged.

use std::borrow::Cow;

use tracing::{debug, error};

use crate::config::DialectConfig;
use crate::cursor::{Cursor, DriverError};
use crate::error::{ExecuteError, RewriteError};
use crate::rewrite::{
    ExecutionPath, choose_path, roll_parameters_into_statement, translate_parameters,
};
use crate::value::Param;

/// Statement and parameters exactly as they will reach the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedStatement<'a> {
    pub path: ExecutionPath,
    pub statement: Cow<'a, str>,
    pub params: Vec<Param>,
}

/// SQL Server dialect with bind-limit and `GROUP BY` workarounds.
///
/// Holds only its configuration, so one instance can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct MssqlDialect {
    config: DialectConfig,
}

impl MssqlDialect {
    /// Creates a dialect with SQL Server's default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DialectConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    /// Rewrites `statement` and `params` for the driver without executing.
    ///
    /// # Errors
    ///
    /// Returns a [`RewriteError`] if a parameter cannot be inlined or bound,
    /// or if placeholders and parameters do not line up in strict mode.
    pub fn prepare<'a>(
        &self,
        statement: &'a str,
        params: &[Param],
    ) -> Result<PreparedStatement<'a>, RewriteError> {
        let path = choose_path(statement, params, &self.config);
        match path {
            ExecutionPath::Bound => Ok(PreparedStatement {
                path,
                statement: Cow::Borrowed(statement),
                params: translate_parameters(params)?,
            }),
            ExecutionPath::Inlined(reason) => {
                debug!(
                    ?reason,
                    param_count = params.len(),
                    "Inlining parameters into statement"
                );
                let rolled =
                    roll_parameters_into_statement(statement, params, self.config.placeholders)?;
                Ok(PreparedStatement {
                    path,
                    statement: Cow::Owned(rolled),
                    params: Vec::new(),
                })
            }
        }
    }

    /// Executes `statement` on `cursor`, applying the workarounds as needed.
    ///
    /// Returns the path the statement took.
    ///
    /// # Errors
    ///
    /// - [`ExecuteError::Rewrite`] if the statement could not be prepared; the
    ///   cursor is not called
    /// - [`ExecuteError::Driver`] with the cursor's own error if execution fails
    pub fn do_execute<C>(
        &self,
        cursor: &mut C,
        statement: &str,
        params: &[Param],
    ) -> Result<ExecutionPath, ExecuteError<C::Error>>
    where
        C: Cursor + ?Sized,
    {
        let prepared = self.prepare(statement, params)?;

        if let Err(err) = cursor.execute(&prepared.statement, &prepared.params) {
            if err.is_operational() {
                error!(
                    statement = %statement,
                    params = ?params,
                    error = %err,
                    "ODBC operational error. Full statement: {}\n Params: {:?}",
                    statement,
                    params
                );
            }
            return Err(ExecuteError::Driver(err));
        }

        Ok(prepared.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaceholderCheck;
    use crate::cursor::{RecordedError, RecordingCursor};
    use crate::rewrite::InlineReason;

    #[test]
    fn test_passthrough_translates_not_given() {
        let dialect = MssqlDialect::new();
        let mut cursor = RecordingCursor::new();

        let path = dialect
            .do_execute(&mut cursor, "foo", &[Param::NotGiven])
            .unwrap();

        assert_eq!(path, ExecutionPath::Bound);
        let last = cursor.last().unwrap();
        assert_eq!(last.statement, "foo");
        assert_eq!(last.params, vec![Param::Null]);
    }

    #[test]
    fn test_passthrough_unwraps_single_element_tuple() {
        let dialect = MssqlDialect::new();
        let mut cursor = RecordingCursor::new();

        dialect
            .do_execute(&mut cursor, "foo", &[Param::Tuple(vec![Param::Int(42)])])
            .unwrap();

        assert_eq!(cursor.last().unwrap().params, vec![Param::Int(42)]);
    }

    #[test]
    fn test_substitutes_params_for_group_by() {
        let dialect = MssqlDialect::new();
        let mut cursor = RecordingCursor::new();

        let path = dialect
            .do_execute(
                &mut cursor,
                "SELECT foo + ? FROM bar GROUP BY foo + ?",
                &[Param::Int(9), Param::Int(10)],
            )
            .unwrap();

        assert_eq!(path, ExecutionPath::Inlined(InlineReason::GroupBy));
        let last = cursor.last().unwrap();
        assert_eq!(last.statement, "SELECT foo + 9 FROM bar GROUP BY foo + 10");
        assert!(last.params.is_empty());
    }

    #[test]
    fn test_rewrite_error_skips_cursor() {
        let dialect = MssqlDialect::new();
        let mut cursor = RecordingCursor::new();

        let err = dialect
            .do_execute(&mut cursor, "SELECT ? GROUP BY x", &[Param::Int(1), Param::Int(2)])
            .unwrap_err();

        assert!(matches!(
            err,
            ExecuteError::Rewrite(RewriteError::PlaceholderMismatch { .. })
        ));
        assert!(cursor.executed().is_empty());
    }

    #[test]
    fn test_lenient_config_keeps_mismatched_splice() {
        let dialect = MssqlDialect::with_config(DialectConfig {
            placeholders: PlaceholderCheck::Lenient,
            ..DialectConfig::default()
        });
        let mut cursor = RecordingCursor::new();

        dialect
            .do_execute(&mut cursor, "SELECT ? GROUP BY x", &[Param::Int(1), Param::Int(2)])
            .unwrap();

        assert_eq!(cursor.last().unwrap().statement, "SELECT 1 GROUP BY x2");
    }

    #[test]
    fn test_driver_error_is_returned_unchanged() {
        let dialect = MssqlDialect::new();
        let mut cursor = RecordingCursor::new();
        cursor.fail_next(RecordedError::Programming("Invalid column name".into()));

        let err = dialect
            .do_execute(&mut cursor, "SELECT nope", &[])
            .unwrap_err();

        assert_eq!(err.to_string(), "programming error: Invalid column name");
        assert_eq!(
            err.into_driver(),
            Some(RecordedError::Programming("Invalid column name".into()))
        );
    }

    #[test]
    fn test_prepare_borrows_unchanged_statement() {
        let dialect = MssqlDialect::new();
        let prepared = dialect.prepare("SELECT ?", &[Param::Int(1)]).unwrap();
        assert!(matches!(prepared.statement, Cow::Borrowed("SELECT ?")));
        assert_eq!(prepared.params, vec![Param::Int(1)]);
    }
}
