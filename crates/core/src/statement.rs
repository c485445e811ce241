use crate::{
    Dialect, LimitPlacement, MergeRequest, Result, StatementError, same_field,
    text::{as_field, as_fields, as_fields_and_parameters, as_parameters, join},
};

const FIELD_SEPARATOR: &str = ", ";
const CONDITION_SEPARATOR: &str = " AND ";
const COUNT_ALIAS: &str = "CountValue";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderField<'a> {
    pub name: &'a str,
    pub order: Order,
}

impl<'a> OrderField<'a> {
    #[must_use]
    pub const fn ascending(name: &'a str) -> Self {
        Self {
            name,
            order: Order::Ascending,
        }
    }

    #[must_use]
    pub const fn descending(name: &'a str) -> Self {
        Self {
            name,
            order: Order::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryRequest<'a> {
    pub table: &'a str,
    pub fields: &'a [&'a str],
    pub where_fields: &'a [&'a str],
    pub order_by: &'a [OrderField<'a>],
    pub top: Option<usize>,
}

/// Renders parameterized command text for one dialect.
///
/// Every `WHERE` condition is an equality against a parameter named after
/// its field, and conditions are joined with `AND`.
pub struct StatementBuilder<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> StatementBuilder<'a> {
    #[must_use]
    pub const fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    pub fn create_query(&self, request: &QueryRequest<'_>) -> Result<String> {
        ensure_fields("SELECT", request.table, request.fields)?;
        let setting = self.dialect.setting();
        let placement = self.dialect.limit_placement();

        let mut sql = String::from("SELECT ");
        if let (Some(top), LimitPlacement::Prefix) = (request.top, placement) {
            sql.push_str(&format!("TOP ({top}) "));
        }
        sql.push_str(&field_list(request.fields, self));
        sql.push_str(" FROM ");
        sql.push_str(&as_field(request.table, setting));
        self.push_where(&mut sql, request.where_fields);

        if !request.order_by.is_empty() {
            let ordering = request.order_by.iter().map(|field| {
                format!("{} {}", as_field(field.name, setting), field.order.keyword())
            });
            sql.push_str(" ORDER BY ");
            sql.push_str(&join(ordering, FIELD_SEPARATOR));
        }

        if let (Some(top), LimitPlacement::Suffix) = (request.top, placement) {
            sql.push_str(&format!(" LIMIT {top}"));
        }

        Ok(self.finish("SELECT", request.table, sql))
    }

    pub fn create_insert(&self, table: &str, fields: &[&str]) -> Result<String> {
        self.create_insert_all(table, fields, 1)
    }

    /// One `INSERT` with `batch_size` value rows. Row `n` binds parameters
    /// with index `n`, so the first row keeps the plain `@Field` names.
    pub fn create_insert_all(
        &self,
        table: &str,
        fields: &[&str],
        batch_size: usize,
    ) -> Result<String> {
        ensure_fields("INSERT", table, fields)?;
        if batch_size == 0 {
            return Err(StatementError::InvalidBatchSize {
                table: table.to_string(),
            }
            .into());
        }

        let setting = self.dialect.setting();
        let rows = (0..batch_size).map(|index| {
            let parameters = as_parameters(Some(fields), index, setting).unwrap_or_default();
            format!("({})", join(parameters, FIELD_SEPARATOR))
        });

        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            as_field(table, setting),
            field_list(fields, self),
            join(rows, FIELD_SEPARATOR)
        );
        Ok(self.finish("INSERT", table, sql))
    }

    /// Fields that also appear in `where_fields` are matched on, not set.
    pub fn create_update(
        &self,
        table: &str,
        fields: &[&str],
        where_fields: &[&str],
    ) -> Result<String> {
        ensure_fields("UPDATE", table, fields)?;
        let setting = self.dialect.setting();

        let assigned = fields
            .iter()
            .copied()
            .filter(|field| {
                !where_fields
                    .iter()
                    .any(|condition| same_field(field, condition, setting))
            })
            .collect::<Vec<_>>();
        if assigned.is_empty() {
            return Err(StatementError::NoUpdatableFields {
                statement: "UPDATE",
                table: table.to_string(),
            }
            .into());
        }

        let assignments =
            as_fields_and_parameters(Some(assigned.as_slice()), 0, setting).unwrap_or_default();
        let mut sql = format!(
            "UPDATE {} SET {}",
            as_field(table, setting),
            join(assignments, FIELD_SEPARATOR)
        );
        self.push_where(&mut sql, where_fields);
        Ok(self.finish("UPDATE", table, sql))
    }

    /// Without where fields this deletes every row.
    #[must_use]
    pub fn create_delete(&self, table: &str, where_fields: &[&str]) -> String {
        let mut sql = format!("DELETE FROM {}", as_field(table, self.dialect.setting()));
        self.push_where(&mut sql, where_fields);
        self.finish("DELETE", table, sql)
    }

    #[must_use]
    pub fn create_count(&self, table: &str, where_fields: &[&str]) -> String {
        let setting = self.dialect.setting();
        let mut sql = format!(
            "SELECT COUNT(*) AS {} FROM {}",
            as_field(COUNT_ALIAS, setting),
            as_field(table, setting)
        );
        self.push_where(&mut sql, where_fields);
        self.finish("COUNT", table, sql)
    }

    #[must_use]
    pub fn create_truncate(&self, table: &str) -> String {
        let sql = self.dialect.create_truncate(table);
        tracing::debug!(
            dialect = self.dialect.name(),
            statement = "TRUNCATE",
            table,
            "built statement"
        );
        sql
    }

    pub fn create_merge(
        &self,
        table: &str,
        fields: &[&str],
        qualifiers: &[&str],
    ) -> Result<String> {
        ensure_fields("MERGE", table, fields)?;
        if qualifiers.is_empty() {
            return Err(StatementError::EmptyQualifiers {
                statement: "MERGE",
                table: table.to_string(),
            }
            .into());
        }

        let setting = self.dialect.setting();
        if let Some(unknown) = qualifiers.iter().find(|qualifier| {
            !fields
                .iter()
                .any(|field| same_field(field, qualifier, setting))
        }) {
            return Err(StatementError::UnknownQualifier {
                qualifier: (*unknown).to_string(),
                table: table.to_string(),
            }
            .into());
        }

        let sql = self.dialect.create_merge(&MergeRequest {
            table,
            fields,
            qualifiers,
        })?;
        tracing::debug!(
            dialect = self.dialect.name(),
            statement = "MERGE",
            table,
            "built statement"
        );
        Ok(sql)
    }

    fn push_where(&self, sql: &mut String, where_fields: &[&str]) {
        if where_fields.is_empty() {
            return;
        }

        let conditions =
            as_fields_and_parameters(Some(where_fields), 0, self.dialect.setting())
                .unwrap_or_default();
        sql.push_str(" WHERE ");
        sql.push_str(&join(conditions, CONDITION_SEPARATOR));
    }

    fn finish(&self, statement: &'static str, table: &str, mut sql: String) -> String {
        sql.push(';');
        tracing::debug!(
            dialect = self.dialect.name(),
            statement,
            table,
            "built statement"
        );
        sql
    }
}

fn field_list(fields: &[&str], builder: &StatementBuilder<'_>) -> String {
    join(
        as_fields(Some(fields), builder.dialect.setting()).unwrap_or_default(),
        FIELD_SEPARATOR,
    )
}

fn ensure_fields(statement: &'static str, table: &str, fields: &[&str]) -> Result<()> {
    if fields.is_empty() {
        return Err(StatementError::EmptyFields {
            statement,
            table: table.to_string(),
        }
        .into());
    }
    Ok(())
}
