//! Dialect configuration.
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! [dialect]
//! max_parameters = 2100
//! group_by_marker = "GROUP BY"
//! placeholders = "strict"
//! ```
//!
//! Every field is optional and defaults to SQL Server's behavior.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// SQL Server rejects statements with more bound parameters than this.
pub const DEFAULT_MAX_PARAMETERS: usize = 2100;

/// Bound parameters inside a `GROUP BY` break on SQL Server ODBC drivers.
pub const DEFAULT_GROUP_BY_MARKER: &str = "GROUP BY";

/// How strictly placeholders are matched against parameters when inlining.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderCheck {
    /// The `?` count must equal the parameter count.
    #[default]
    Strict,
    /// Splice whatever lines up; surplus literals go at the end.
    Lenient,
}

/// Settings for [`MssqlDialect`](crate::MssqlDialect).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectConfig {
    /// Parameter counts above this are inlined instead of bound.
    pub max_parameters: usize,
    /// Statements containing this text (case-sensitive) are inlined when they
    /// have parameters.
    pub group_by_marker: String,
    pub placeholders: PlaceholderCheck,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            max_parameters: DEFAULT_MAX_PARAMETERS,
            group_by_marker: DEFAULT_GROUP_BY_MARKER.to_string(),
            placeholders: PlaceholderCheck::Strict,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    dialect: DialectConfig,
}

impl DialectConfig {
    /// Load configuration from the `[dialect]` table of a TOML file.
    ///
    /// A file without a `[dialect]` table yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file is not valid TOML or has unknown keys in `[dialect]`
    /// - The loaded settings fail [`validate`](Self::validate)
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        file.dialect
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(file.dialect)
    }

    /// Check that the settings can drive a dialect.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_parameters` is zero or `group_by_marker` is empty.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.max_parameters == 0 {
            errors.push("dialect.max_parameters must be at least 1".to_string());
        }
        if self.group_by_marker.is_empty() {
            errors.push("dialect.group_by_marker cannot be empty".to_string());
        }

        if !errors.is_empty() {
            bail!("{}", errors.join("; "));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_match_sql_server() {
        let config = DialectConfig::default();
        assert_eq!(config.max_parameters, 2100);
        assert_eq!(config.group_by_marker, "GROUP BY");
        assert_eq!(config.placeholders, PlaceholderCheck::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_full_table() {
        let file = write_config(
            r#"
[dialect]
max_parameters = 1000
group_by_marker = "group by"
placeholders = "lenient"
"#,
        );
        let config = DialectConfig::load_from(file.path()).unwrap();
        assert_eq!(config.max_parameters, 1000);
        assert_eq!(config.group_by_marker, "group by");
        assert_eq!(config.placeholders, PlaceholderCheck::Lenient);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let file = write_config("[dialect]\nmax_parameters = 10\n");
        let config = DialectConfig::load_from(file.path()).unwrap();
        assert_eq!(config.max_parameters, 10);
        assert_eq!(config.group_by_marker, DEFAULT_GROUP_BY_MARKER);

        let file = write_config("");
        assert_eq!(
            DialectConfig::load_from(file.path()).unwrap(),
            DialectConfig::default()
        );
    }

    #[test]
    fn test_rejects_zero_limit() {
        let file = write_config("[dialect]\nmax_parameters = 0\n");
        let err = DialectConfig::load_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("max_parameters"));
    }

    #[test]
    fn test_rejects_unknown_key_and_bad_mode() {
        let file = write_config("[dialect]\nmax_params = 5\n");
        assert!(DialectConfig::load_from(file.path()).is_err());

        let file = write_config("[dialect]\nplaceholders = \"loose\"\n");
        assert!(DialectConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = DialectConfig::load_from("/nonexistent/dialect.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = DialectConfig {
            max_parameters: 0,
            group_by_marker: String::new(),
            placeholders: PlaceholderCheck::Strict,
        };
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("max_parameters"));
        assert!(msg.contains("group_by_marker"));
    }
}
