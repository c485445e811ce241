use std::borrow::Cow;

/// Quoting and parameter syntax of one database engine.
///
/// A setting is read-only once built. Built-in dialects construct theirs at
/// compile time with [`DbSetting::from_static`]; custom settings loaded at
/// runtime go through [`DbSetting::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DbSetting {
    opening_quote: Cow<'static, str>,
    closing_quote: Cow<'static, str>,
    schema_separator: Cow<'static, str>,
    parameter_prefix: Cow<'static, str>,
}

impl DbSetting {
    #[must_use]
    pub fn new(
        opening_quote: impl Into<String>,
        closing_quote: impl Into<String>,
        schema_separator: impl Into<String>,
        parameter_prefix: impl Into<String>,
    ) -> Self {
        Self {
            opening_quote: Cow::Owned(opening_quote.into()),
            closing_quote: Cow::Owned(closing_quote.into()),
            schema_separator: Cow::Owned(schema_separator.into()),
            parameter_prefix: Cow::Owned(parameter_prefix.into()),
        }
    }

    #[must_use]
    pub const fn from_static(
        opening_quote: &'static str,
        closing_quote: &'static str,
        schema_separator: &'static str,
        parameter_prefix: &'static str,
    ) -> Self {
        Self {
            opening_quote: Cow::Borrowed(opening_quote),
            closing_quote: Cow::Borrowed(closing_quote),
            schema_separator: Cow::Borrowed(schema_separator),
            parameter_prefix: Cow::Borrowed(parameter_prefix),
        }
    }

    #[must_use]
    pub fn opening_quote(&self) -> &str {
        &self.opening_quote
    }

    #[must_use]
    pub fn closing_quote(&self) -> &str {
        &self.closing_quote
    }

    #[must_use]
    pub fn schema_separator(&self) -> &str {
        &self.schema_separator
    }

    #[must_use]
    pub fn parameter_prefix(&self) -> &str {
        &self.parameter_prefix
    }
}
