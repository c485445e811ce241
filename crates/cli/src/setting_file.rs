use std::{fs, path::Path};

use microrm_core::DbSetting;
use serde::Deserialize;

use crate::error_presentation::{CliError, CliResult};

/// Partial `DbSetting` read from YAML; missing keys keep the dialect's value.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SettingFile {
    opening_quote: Option<String>,
    closing_quote: Option<String>,
    schema_separator: Option<String>,
    parameter_prefix: Option<String>,
}

impl SettingFile {
    pub(crate) fn load(path: &Path) -> CliResult<Self> {
        let yaml = fs::read_to_string(path).map_err(|source| CliError::ReadSetting {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&yaml).map_err(|source| CliError::ParseSetting {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn apply(self, base: &DbSetting) -> DbSetting {
        DbSetting::new(
            self.opening_quote
                .unwrap_or_else(|| base.opening_quote().to_string()),
            self.closing_quote
                .unwrap_or_else(|| base.closing_quote().to_string()),
            self.schema_separator
                .unwrap_or_else(|| base.schema_separator().to_string()),
            self.parameter_prefix
                .unwrap_or_else(|| base.parameter_prefix().to_string()),
        )
    }
}
