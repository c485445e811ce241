use crate::{DbSetting, Result, text};

/// Where a row limit goes in a `SELECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitPlacement {
    /// `SELECT TOP (n) ...`
    Prefix,
    /// `SELECT ... LIMIT n`
    Suffix,
}

/// Upsert input handed to [`Dialect::create_merge`].
///
/// `StatementBuilder::create_merge` validates the request first: fields and
/// qualifiers are non-empty and every qualifier is one of the fields.
#[derive(Debug, Clone, Copy)]
pub struct MergeRequest<'a> {
    pub table: &'a str,
    pub fields: &'a [&'a str],
    pub qualifiers: &'a [&'a str],
}

impl<'a> MergeRequest<'a> {
    /// Fields that are not qualifiers, in field order.
    #[must_use]
    pub fn updatable_fields(&self, setting: &DbSetting) -> Vec<&'a str> {
        self.fields
            .iter()
            .copied()
            .filter(|field| {
                !self
                    .qualifiers
                    .iter()
                    .any(|qualifier| same_field(field, qualifier, setting))
            })
            .collect()
    }
}

pub trait Dialect: Send + Sync {
    fn name(&self) -> &'static str;

    fn setting(&self) -> &DbSetting;

    fn limit_placement(&self) -> LimitPlacement {
        LimitPlacement::Suffix
    }

    fn create_truncate(&self, table: &str) -> String {
        format!("TRUNCATE TABLE {};", text::as_field(table, self.setting()))
    }

    fn create_merge(&self, request: &MergeRequest<'_>) -> Result<String>;
}

/// Compares two field names ignoring quotes, surrounding whitespace, and
/// ASCII case.
#[must_use]
pub fn same_field(left: &str, right: &str, setting: &DbSetting) -> bool {
    text::as_unquoted_with(left, true, Some(setting))
        .eq_ignore_ascii_case(&text::as_unquoted_with(right, true, Some(setting)))
}
