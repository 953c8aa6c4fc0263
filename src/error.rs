//! Error types for statement rewriting and execution.

/// Errors raised while preparing a statement, before the cursor is called.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RewriteError {
    /// A parameter has no SQL literal form and cannot be inlined.
    #[error("parameter {index} ({kind}) cannot be written as a SQL literal")]
    Unrepresentable { index: usize, kind: &'static str },

    /// The statement's `?` count does not match the parameter count.
    #[error("statement has {placeholders} placeholders but {parameters} parameters were given")]
    PlaceholderMismatch {
        placeholders: usize,
        parameters: usize,
    },

    /// A tuple with zero or several elements cannot be bound to one placeholder.
    #[error("parameter {index} is a {len}-element tuple and cannot be bound")]
    CompoundParameter { index: usize, len: usize },
}

/// Errors returned by [`MssqlDialect::do_execute`](crate::MssqlDialect::do_execute).
///
/// Driver errors are wrapped transparently: their message and source chain
/// are exactly what the cursor reported.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError<E> {
    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error(transparent)]
    Driver(E),
}

impl<E> ExecuteError<E> {
    /// Returns the driver error, if this is one.
    pub fn driver(&self) -> Option<&E> {
        match self {
            Self::Driver(e) => Some(e),
            Self::Rewrite(_) => None,
        }
    }

    pub fn into_driver(self) -> Option<E> {
        match self {
            Self::Driver(e) => Some(e),
            Self::Rewrite(_) => None,
        }
    }
}

/// Errors from looking up a dialect by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown dialect: {name}")]
    UnknownDialect { name: String },
}
