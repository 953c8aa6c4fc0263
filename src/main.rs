//! `mssql-dialect`: inspect how statements are rewritten for SQL Server.
//!
//! - `mssql-dialect render <STATEMENT> --params <JSON>` prints the statement
//!   and parameters the driver would receive
//! - `mssql-dialect literal <JSON>` prints the SQL literal for one parameter
//!
//! Parameters use the JSON form of [`Param`], e.g.
//! `[{"type": "Int", "value": 9}, {"type": "Text", "value": "x"}]`.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mssql_odbc_dialect::{
    DialectConfig, ExecutionPath, InlineReason, Literal, MssqlDialect, Param, PlaceholderCheck,
    RecordingCursor, literalize,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mssql-dialect", version, about = "SQL Server dialect rewriting tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the statement and parameters the driver would receive
    Render {
        /// Statement with `?` placeholders
        statement: String,
        /// JSON array of parameters
        #[arg(short, long, default_value = "[]")]
        params: String,
        /// TOML file with a [dialect] table
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the bind-parameter limit
        #[arg(long)]
        max_parameters: Option<usize>,
        /// Splice even when placeholder and parameter counts differ
        #[arg(long)]
        lenient: bool,
    },
    /// Print the SQL literal for one JSON-encoded parameter
    Literal {
        /// JSON parameter, e.g. {"type": "Int", "value": 5}
        value: String,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            statement,
            params,
            config,
            max_parameters,
            lenient,
        } => {
            let mut config = match config {
                Some(path) => DialectConfig::load_from(path)?,
                None => DialectConfig::default(),
            };
            if let Some(max) = max_parameters {
                config.max_parameters = max;
            }
            if lenient {
                config.placeholders = PlaceholderCheck::Lenient;
            }
            config.validate()?;

            let params: Vec<Param> =
                serde_json::from_str(&params).context("Failed to parse --params as JSON")?;
            render(&MssqlDialect::with_config(config), &statement, &params)
        }
        Commands::Literal { value } => {
            let param: Param =
                serde_json::from_str(&value).context("Failed to parse parameter as JSON")?;
            match literalize(&param) {
                Literal::Sql(sql) => {
                    println!("{sql}");
                    Ok(())
                }
                Literal::Unrepresentable { kind } => {
                    bail!("A {kind} parameter has no SQL literal form")
                }
            }
        }
    }
}

fn render(dialect: &MssqlDialect, statement: &str, params: &[Param]) -> Result<()> {
    let mut cursor = RecordingCursor::new();
    let path = dialect.do_execute(&mut cursor, statement, params)?;
    let Some(sent) = cursor.last() else {
        bail!("Statement was not sent to the cursor");
    };

    let output = serde_json::json!({
        "path": path_name(path),
        "inlined": path.is_inlined(),
        "statement": sent.statement,
        "params": sent.params,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn path_name(path: ExecutionPath) -> &'static str {
    match path {
        ExecutionPath::Bound => "bound",
        ExecutionPath::Inlined(InlineReason::TooManyParameters) => "inlined:too-many-parameters",
        ExecutionPath::Inlined(InlineReason::GroupBy) => "inlined:group-by",
    }
}

/// Log to stderr so stdout stays machine-readable.
fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
