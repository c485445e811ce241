//! SQL text fragments: identifier quoting, parameter placeholders, and the
//! `field = @parameter` style snippets statement builders assemble.
//!
//! Functions taking `Option<&DbSetting>` treat `None` as "no dialect rules"
//! and return their input unchanged. The fragment builders take a plain
//! `&DbSetting`; callers must always supply one.

use crate::DbSetting;

const AS_KEYWORD: &str = " AS ";
const EQUALS: &str = " = ";

pub fn join<I, S>(strings: I, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for (index, value) in strings.into_iter().enumerate() {
        if index > 0 {
            joined.push_str(separator);
        }
        joined.push_str(value.as_ref());
    }
    joined
}

/// Replaces every character outside `[A-Za-z0-9]` with `_`.
pub fn as_alpha_numeric(value: &str, trim: bool) -> String {
    let value = if trim { value.trim() } else { value };
    value
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}

pub fn as_unquoted(value: &str, setting: Option<&DbSetting>) -> String {
    match setting {
        Some(setting) => strip_quotes(value, setting),
        None => value.to_string(),
    }
}

/// Unquotes `value`, treating each schema-separated segment on its own.
pub fn as_unquoted_with(value: &str, trim: bool, setting: Option<&DbSetting>) -> String {
    let value = if trim { value.trim() } else { value };
    let Some(setting) = setting else {
        return value.to_string();
    };

    match schema_segments(value, setting) {
        Some(segments) => join(
            segments
                .into_iter()
                .map(|segment| strip_quotes(segment, setting)),
            setting.schema_separator(),
        ),
        None => strip_quotes(value, setting),
    }
}

/// Wraps `value` in the setting's quotes. The opening and closing quote are
/// checked independently, so a half-quoted value only gets the missing side.
pub fn as_quoted(value: &str, setting: Option<&DbSetting>) -> String {
    match setting {
        Some(setting) => wrap_quotes(value, setting),
        None => value.to_string(),
    }
}

pub fn as_quoted_trimmed(value: &str, trim: bool, setting: Option<&DbSetting>) -> String {
    as_quoted_with(value, trim, false, setting)
}

/// Quotes `value` segment by segment around the schema separator, so
/// `schema.table` becomes `[schema].[table]`. With `ignore_schema` the whole
/// value is quoted as one identifier.
pub fn as_quoted_with(
    value: &str,
    trim: bool,
    ignore_schema: bool,
    setting: Option<&DbSetting>,
) -> String {
    let value = if trim { value.trim() } else { value };
    let Some(setting) = setting else {
        return value.to_string();
    };

    if ignore_schema {
        return wrap_quotes(value, setting);
    }

    match schema_segments(value, setting) {
        Some(segments) => join(
            segments
                .into_iter()
                .map(|segment| wrap_quotes(segment, setting)),
            setting.schema_separator(),
        ),
        None => wrap_quotes(value, setting),
    }
}

/// `left.[value] = right.[value]`
pub fn as_join_qualifier(
    value: &str,
    left_alias: &str,
    right_alias: &str,
    setting: &DbSetting,
) -> String {
    let separator = setting.schema_separator();
    let quoted = wrap_quotes(value, setting);
    format!("{left_alias}{separator}{quoted}{EQUALS}{right_alias}{separator}{quoted}")
}

pub fn as_field(value: &str, setting: &DbSetting) -> String {
    as_quoted_with(value, false, false, Some(setting))
}

/// Parameter placeholder for `value`. A strictly positive `index` appends an
/// `_index` suffix so the same column can appear once per row of a batch.
pub fn as_parameter(value: &str, index: usize, setting: &DbSetting) -> String {
    let prefix = setting.parameter_prefix();
    let name = strip_quotes(value, setting);
    if index > 0 {
        format!("{prefix}{name}_{index}")
    } else {
        format!("{prefix}{name}")
    }
}

/// `alias.[value]`
pub fn as_alias_field(value: &str, alias: &str, setting: &DbSetting) -> String {
    format!(
        "{alias}{}{}",
        setting.schema_separator(),
        wrap_quotes(value, setting)
    )
}

/// `@value AS [value]`
pub fn as_parameter_as_field(value: &str, index: usize, setting: &DbSetting) -> String {
    format!(
        "{}{AS_KEYWORD}{}",
        as_parameter(value, index, setting),
        as_field(value, setting)
    )
}

/// `[value] = @value`
pub fn as_field_and_parameter(value: &str, index: usize, setting: &DbSetting) -> String {
    format!(
        "{}{EQUALS}{}",
        as_field(value, setting),
        as_parameter(value, index, setting)
    )
}

/// `[value] = alias.[value]`
pub fn as_field_and_alias_field(value: &str, alias: &str, setting: &DbSetting) -> String {
    let field = as_field(value, setting);
    format!(
        "{field}{EQUALS}{alias}{}{field}",
        setting.schema_separator()
    )
}

pub fn as_fields<S: AsRef<str>>(values: Option<&[S]>, setting: &DbSetting) -> Option<Vec<String>> {
    map_each(values, |value| as_field(value, setting))
}

pub fn as_parameters<S: AsRef<str>>(
    values: Option<&[S]>,
    index: usize,
    setting: &DbSetting,
) -> Option<Vec<String>> {
    map_each(values, |value| as_parameter(value, index, setting))
}

pub fn as_alias_fields<S: AsRef<str>>(
    values: Option<&[S]>,
    alias: &str,
    setting: &DbSetting,
) -> Option<Vec<String>> {
    map_each(values, |value| as_alias_field(value, alias, setting))
}

pub fn as_parameters_as_fields<S: AsRef<str>>(
    values: Option<&[S]>,
    index: usize,
    setting: &DbSetting,
) -> Option<Vec<String>> {
    map_each(values, |value| as_parameter_as_field(value, index, setting))
}

pub fn as_fields_and_parameters<S: AsRef<str>>(
    values: Option<&[S]>,
    index: usize,
    setting: &DbSetting,
) -> Option<Vec<String>> {
    map_each(values, |value| as_field_and_parameter(value, index, setting))
}

pub fn as_fields_and_alias_fields<S: AsRef<str>>(
    values: Option<&[S]>,
    alias: &str,
    setting: &DbSetting,
) -> Option<Vec<String>> {
    map_each(values, |value| as_field_and_alias_field(value, alias, setting))
}

fn map_each<S, F>(values: Option<&[S]>, render: F) -> Option<Vec<String>>
where
    S: AsRef<str>,
    F: Fn(&str) -> String,
{
    values.map(|values| values.iter().map(|value| render(value.as_ref())).collect())
}

fn strip_quotes(value: &str, setting: &DbSetting) -> String {
    let mut unquoted = value.to_string();
    for quote in [setting.opening_quote(), setting.closing_quote()] {
        if !quote.is_empty() {
            unquoted = unquoted.replace(quote, "");
        }
    }
    unquoted
}

fn wrap_quotes(value: &str, setting: &DbSetting) -> String {
    let opening = setting.opening_quote();
    let closing = setting.closing_quote();

    let mut quoted = String::with_capacity(value.len() + opening.len() + closing.len());
    if !value.starts_with(opening) {
        quoted.push_str(opening);
    }
    quoted.push_str(value);
    if !value.ends_with(closing) {
        quoted.push_str(closing);
    }
    quoted
}

// Any character of the separator splits, matching how multi-character
// separators were always tokenized.
fn schema_segments<'v>(value: &'v str, setting: &DbSetting) -> Option<Vec<&'v str>> {
    let separator = setting.schema_separator();
    if separator.is_empty() || !value.contains(separator) {
        return None;
    }

    Some(value.split(|ch: char| separator.contains(ch)).collect())
}
