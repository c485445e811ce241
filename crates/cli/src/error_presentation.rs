use std::{io, path::PathBuf};

use miette::Report;

const STATEMENT_CONTEXT: &str = "while rendering command text";
const SETTING_READ_CONTEXT: &str = "while reading setting file";
const SETTING_PARSE_CONTEXT: &str = "while parsing setting file";

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    ReadSetting {
        path: PathBuf,
        source: io::Error,
    },
    ParseSetting {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    Core(microrm_core::Error),
}

impl From<microrm_core::Error> for CliError {
    fn from(value: microrm_core::Error) -> Self {
        Self::Core(value)
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::ReadSetting { path, source } => {
            let context = format!("{SETTING_READ_CONTEXT} `{}`", path.display());
            let report = report_with_context(source, context);
            format!("[io] {report}")
        }
        CliError::ParseSetting { path, source } => {
            let context = format!("{SETTING_PARSE_CONTEXT} `{}`", path.display());
            let report = report_with_context(source, context);
            format!("[config] {report}")
        }
        CliError::Core(source) => {
            let category = source.category();
            let report = report_with_context(source, STATEMENT_CONTEXT);
            format!("[{category}] {report}")
        }
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let context = context.into();
    let anyhow_error = anyhow::Error::new(source).context(context);
    miette::miette!("{anyhow_error:#}")
}
