mod commands;
mod error_presentation;
mod setting_file;

use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use microrm_core::Dialect;
use tracing_subscriber::EnvFilter;

use crate::{
    commands::Command,
    error_presentation::{CliResult, render_runtime_error},
    setting_file::SettingFile,
};

#[cfg(not(any(
    feature = "mssql",
    feature = "mysql",
    feature = "postgres",
    feature = "sqlite"
)))]
compile_error!("enable at least one dialect feature: mssql, mysql, postgres or sqlite");

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Parser)]
#[command(
    name = "microrm",
    version,
    about = "Render identifiers and CRUD statements for a SQL dialect"
)]
struct Cli {
    /// Tracing filter directive, e.g. `debug` or `microrm_core=trace`.
    #[arg(long, global = true, env = "MICRORM_LOG", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
    #[command(subcommand)]
    dialect: DialectCommand,
}

#[derive(Debug, Subcommand)]
enum DialectCommand {
    #[cfg(feature = "mssql")]
    Mssql(DialectArgs),
    #[cfg(feature = "mysql")]
    Mysql(DialectArgs),
    #[cfg(feature = "postgres")]
    Postgres(DialectArgs),
    #[cfg(feature = "sqlite")]
    Sqlite(DialectArgs),
}

#[derive(Debug, Args)]
struct DialectArgs {
    /// YAML file overriding quotes, schema separator or parameter prefix.
    #[arg(long, value_name = "FILE")]
    setting: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

impl DialectCommand {
    fn resolve(&self) -> (&'static dyn Dialect, &DialectArgs) {
        match self {
            #[cfg(feature = "mssql")]
            Self::Mssql(args) => (&microrm_dialect_mssql::MssqlDialect, args),
            #[cfg(feature = "mysql")]
            Self::Mysql(args) => (&microrm_dialect_mysql::MysqlDialect, args),
            #[cfg(feature = "postgres")]
            Self::Postgres(args) => (&microrm_dialect_postgres::PostgresDialect, args),
            #[cfg(feature = "sqlite")]
            Self::Sqlite(args) => (&microrm_dialect_sqlite::SqliteDialect, args),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let (dialect, args) = cli.dialect.resolve();
    match run(dialect, args) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", render_runtime_error(error));
            ExitCode::FAILURE
        }
    }
}

fn run(dialect: &dyn Dialect, args: &DialectArgs) -> CliResult<Vec<String>> {
    let setting = match &args.setting {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading setting file");
            SettingFile::load(path)?.apply(dialect.setting())
        }
        None => dialect.setting().clone(),
    };

    tracing::debug!(dialect = dialect.name(), ?setting, "running command");
    commands::execute(dialect, &setting, &args.command)
}

fn init_tracing(level: &str) {
    let filter =
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
