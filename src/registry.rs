//! Dialect lookup by name.
//!
//! Connection settings usually name a dialect rather than construct one.
//! The dialect is registered as `mssql.pyodbc_mssql`; the URL-scheme
//! spelling `mssql+pyodbc_mssql` resolves to the same entry.

use crate::config::DialectConfig;
use crate::dialect::MssqlDialect;
use crate::error::RegistryError;

/// Registry key of [`MssqlDialect`].
pub const DIALECT_NAME: &str = "mssql.pyodbc_mssql";

/// Returns true if `name` refers to this crate's dialect.
pub fn is_registered(name: &str) -> bool {
    let normalized = name.trim().to_ascii_lowercase().replacen('+', ".", 1);
    normalized == DIALECT_NAME
}

/// Builds the dialect registered under `name` with the given settings.
///
/// # Errors
///
/// Returns [`RegistryError::UnknownDialect`] if no dialect has that name.
pub fn load(name: &str, config: DialectConfig) -> Result<MssqlDialect, RegistryError> {
    if is_registered(name) {
        Ok(MssqlDialect::with_config(config))
    } else {
        Err(RegistryError::UnknownDialect {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_by_registry_key() {
        let dialect = load("mssql.pyodbc_mssql", DialectConfig::default()).unwrap();
        assert_eq!(dialect.config().max_parameters, 2100);
    }

    #[test]
    fn test_url_scheme_and_case() {
        assert!(is_registered("mssql+pyodbc_mssql"));
        assert!(is_registered(" MSSQL.PyODBC_MSSQL "));
    }

    #[test]
    fn test_unknown_names() {
        for name in ["mssql", "mssql.pyodbc", "postgresql+psycopg2", ""] {
            assert_eq!(
                load(name, DialectConfig::default()).unwrap_err(),
                RegistryError::UnknownDialect {
                    name: name.to_string()
                }
            );
        }
    }

    #[test]
    fn test_config_is_passed_through() {
        let config = DialectConfig {
            max_parameters: 5,
            ..DialectConfig::default()
        };
        let dialect = load(DIALECT_NAME, config.clone()).unwrap();
        assert_eq!(dialect.config(), &config);
    }
}
