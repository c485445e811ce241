use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use microrm_core::{DbSetting, Dialect, text};
use serde::Deserialize;
use thiserror::Error;

const INLINE_SOURCE_LABEL: &str = "yaml format cases";

#[derive(Debug, Error)]
pub enum TestkitError {
    #[error("failed to read `{}`: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {source_label}: {source}")]
    Yaml {
        source_label: String,
        source: serde_yaml::Error,
    },
    #[error("`{op}` case requires `{argument}`")]
    MissingArgument {
        op: &'static str,
        argument: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatOp {
    AlphaNumeric,
    Quoted,
    Unquoted,
    Field,
    Parameter,
    AliasField,
    ParameterAsField,
    FieldAndParameter,
    FieldAndAliasField,
    JoinQualifier,
}

impl FormatOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlphaNumeric => "alpha_numeric",
            Self::Quoted => "quoted",
            Self::Unquoted => "unquoted",
            Self::Field => "field",
            Self::Parameter => "parameter",
            Self::AliasField => "alias_field",
            Self::ParameterAsField => "parameter_as_field",
            Self::FieldAndParameter => "field_and_parameter",
            Self::FieldAndAliasField => "field_and_alias_field",
            Self::JoinQualifier => "join_qualifier",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatCase {
    pub op: FormatOp,
    pub value: String,
    pub expected: String,
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub alias: Option<String>,
    /// Right-hand alias of a `join_qualifier` case; `alias` is the left one.
    #[serde(default)]
    pub right_alias: Option<String>,
    #[serde(default)]
    pub trim: bool,
    #[serde(default)]
    pub ignore_schema: bool,
    /// `name` runs the case only on that dialect, `!name` everywhere else.
    #[serde(default)]
    pub flavor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Skipped(String),
    Failed(String),
}

pub fn load_format_cases_from_str(
    yaml: &str,
) -> Result<BTreeMap<String, FormatCase>, TestkitError> {
    parse_cases(yaml, INLINE_SOURCE_LABEL.to_string())
}

pub fn load_format_cases_from_path(
    path: &Path,
) -> Result<BTreeMap<String, FormatCase>, TestkitError> {
    let yaml = fs::read_to_string(path).map_err(|source| TestkitError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_cases(&yaml, format!("`{}`", path.display()))
}

pub fn matches_flavor(requirement: Option<&str>, current_flavor: &str) -> bool {
    let Some(requirement) = requirement.map(str::trim).filter(|value| !value.is_empty()) else {
        return true;
    };

    if let Some(excluded_flavor) = requirement.strip_prefix('!') {
        return excluded_flavor != current_flavor;
    }

    requirement == current_flavor
}

pub fn run_format_case(dialect: &dyn Dialect, case: &FormatCase) -> TestResult {
    if !matches_flavor(case.flavor.as_deref(), dialect.name()) {
        return TestResult::Skipped(format!(
            "case requires flavor '{}', running on '{}'",
            case.flavor.as_deref().unwrap_or_default(),
            dialect.name()
        ));
    }

    match render_case(dialect.setting(), case) {
        Ok(actual) if actual == case.expected => TestResult::Passed,
        Ok(actual) => TestResult::Failed(format!(
            "{} of {:?} mismatch; expected {:?}, actual {actual:?}",
            case.op.as_str(),
            case.value,
            case.expected
        )),
        Err(error) => TestResult::Failed(error.to_string()),
    }
}

/// Runs every case in name order.
pub fn run_format_cases(
    dialect: &dyn Dialect,
    cases: &BTreeMap<String, FormatCase>,
) -> Vec<(String, TestResult)> {
    cases
        .iter()
        .map(|(name, case)| (name.clone(), run_format_case(dialect, case)))
        .collect()
}

fn render_case(setting: &DbSetting, case: &FormatCase) -> Result<String, TestkitError> {
    let value = case.value.as_str();
    let rendered = match case.op {
        FormatOp::AlphaNumeric => text::as_alpha_numeric(value, case.trim),
        FormatOp::Quoted => {
            text::as_quoted_with(value, case.trim, case.ignore_schema, Some(setting))
        }
        FormatOp::Unquoted => text::as_unquoted_with(value, case.trim, Some(setting)),
        FormatOp::Field => text::as_field(value, setting),
        FormatOp::Parameter => text::as_parameter(value, case.index, setting),
        FormatOp::AliasField => text::as_alias_field(value, required_alias(case)?, setting),
        FormatOp::ParameterAsField => text::as_parameter_as_field(value, case.index, setting),
        FormatOp::FieldAndParameter => text::as_field_and_parameter(value, case.index, setting),
        FormatOp::FieldAndAliasField => {
            text::as_field_and_alias_field(value, required_alias(case)?, setting)
        }
        FormatOp::JoinQualifier => {
            let right_alias = case
                .right_alias
                .as_deref()
                .ok_or(TestkitError::MissingArgument {
                    op: case.op.as_str(),
                    argument: "right_alias",
                })?;
            text::as_join_qualifier(value, required_alias(case)?, right_alias, setting)
        }
    };
    Ok(rendered)
}

fn required_alias(case: &FormatCase) -> Result<&str, TestkitError> {
    case.alias
        .as_deref()
        .ok_or(TestkitError::MissingArgument {
            op: case.op.as_str(),
            argument: "alias",
        })
}

fn parse_cases(
    yaml: &str,
    source_label: String,
) -> Result<BTreeMap<String, FormatCase>, TestkitError> {
    serde_yaml::from_str(yaml).map_err(|source| TestkitError::Yaml {
        source_label,
        source,
    })
}
