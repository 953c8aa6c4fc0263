//! Statement rewriting: path selection, parameter inlining and translation.
//!
//! A statement takes one of two paths to the driver:
//!
//! - **Bound**: the statement is unchanged and parameters are bound by the
//!   driver after [`translate_parameters`].
//! - **Inlined**: every parameter is rendered as a literal and spliced in
//!   place of its `?`, and the driver receives no parameters. Used when the
//!   statement exceeds the bind-parameter limit or contains `GROUP BY`.
//!
//! Placeholders are found by plain text search. A `?` inside a string
//! literal or comment in the statement counts as a placeholder.

use crate::config::{DialectConfig, PlaceholderCheck};
use crate::error::RewriteError;
use crate::literal::{Literal, literalize};
use crate::value::Param;

/// Why a statement was inlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineReason {
    /// More parameters than the driver may bind.
    TooManyParameters,
    /// The statement has a `GROUP BY` clause and at least one parameter.
    GroupBy,
}

/// How a statement will be sent to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPath {
    Bound,
    Inlined(InlineReason),
}

impl ExecutionPath {
    pub fn is_inlined(self) -> bool {
        matches!(self, Self::Inlined(_))
    }
}

/// Picks the execution path for a statement.
///
/// The parameter limit is checked first, then the `GROUP BY` marker.
pub fn choose_path(statement: &str, params: &[Param], config: &DialectConfig) -> ExecutionPath {
    if params.len() > config.max_parameters {
        ExecutionPath::Inlined(InlineReason::TooManyParameters)
    } else if !params.is_empty() && statement.contains(config.group_by_marker.as_str()) {
        ExecutionPath::Inlined(InlineReason::GroupBy)
    } else {
        ExecutionPath::Bound
    }
}

/// Number of `?` placeholders in `statement`.
pub fn count_placeholders(statement: &str) -> usize {
    statement.matches('?').count()
}

/// Replaces each `?` in `statement` with the literal of the matching parameter.
///
/// With [`PlaceholderCheck::Lenient`], mismatched counts are spliced as far
/// as they line up: leftover segments are joined without a value and
/// leftover literals are appended at the end.
///
/// # Errors
///
/// - [`RewriteError::Unrepresentable`] if any parameter has no literal form
/// - [`RewriteError::PlaceholderMismatch`] in strict mode when the `?` count
///   differs from `params.len()`
pub fn roll_parameters_into_statement(
    statement: &str,
    params: &[Param],
    check: PlaceholderCheck,
) -> Result<String, RewriteError> {
    if check == PlaceholderCheck::Strict {
        let placeholders = count_placeholders(statement);
        if placeholders != params.len() {
            return Err(RewriteError::PlaceholderMismatch {
                placeholders,
                parameters: params.len(),
            });
        }
    }

    let literals = params
        .iter()
        .enumerate()
        .map(|(index, param)| match literalize(param) {
            Literal::Sql(sql) => Ok(sql),
            Literal::Unrepresentable { kind } => Err(RewriteError::Unrepresentable { index, kind }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let capacity = statement.len() + literals.iter().map(String::len).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut literals = literals.into_iter();
    let mut segments = statement.split('?');

    if let Some(first) = segments.next() {
        out.push_str(first);
    }
    for segment in segments {
        if let Some(literal) = literals.next() {
            out.push_str(&literal);
        }
        out.push_str(segment);
    }
    for literal in literals {
        out.push_str(&literal);
    }

    Ok(out)
}

/// Prepares parameters for binding by the driver.
///
/// `NotGiven` becomes `Null` and one-element tuples are unwrapped (nested
/// wrappers included). Other values pass through untouched.
///
/// # Errors
///
/// Returns [`RewriteError::CompoundParameter`] for a tuple that does not
/// hold exactly one element.
pub fn translate_parameters(params: &[Param]) -> Result<Vec<Param>, RewriteError> {
    params
        .iter()
        .enumerate()
        .map(|(index, param)| translate(index, param))
        .collect()
}

fn translate(index: usize, param: &Param) -> Result<Param, RewriteError> {
    match param {
        Param::NotGiven => Ok(Param::Null),
        Param::Tuple(items) => match items.as_slice() {
            [inner] => translate(index, inner),
            _ => Err(RewriteError::CompoundParameter {
                index,
                len: items.len(),
            }),
        },
        other => Ok(other.clone()),
    }
}
