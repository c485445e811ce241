use clap::{Args, Subcommand};
use microrm_core::{DbSetting, Dialect, Order, OrderField, QueryRequest, StatementBuilder, text};

use crate::error_presentation::CliResult;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Quote identifiers segment by segment (`dbo.Users` -> `[dbo].[Users]`).
    Field(ValueArgs),
    /// Render parameter placeholders.
    Parameter {
        /// Positional suffix; 0 renders no suffix.
        #[arg(long, default_value_t = 0)]
        index: usize,
        #[command(flatten)]
        values: ValueArgs,
    },
    /// Render `alias.[field]`.
    AliasField {
        #[arg(long)]
        alias: String,
        #[command(flatten)]
        values: ValueArgs,
    },
    /// Render `left.[field] = right.[field]`.
    JoinQualifier {
        #[arg(long)]
        left: String,
        #[arg(long)]
        right: String,
        #[command(flatten)]
        values: ValueArgs,
    },
    /// Strip quotes from identifiers.
    Unquote {
        #[arg(long)]
        trim: bool,
        #[command(flatten)]
        values: ValueArgs,
    },
    /// Replace non-alphanumeric characters with `_`.
    AlphaNumeric {
        #[arg(long)]
        trim: bool,
        #[command(flatten)]
        values: ValueArgs,
    },
    Query {
        #[command(flatten)]
        target: TableFields,
        #[command(flatten)]
        filter: WhereArgs,
        /// `field` or `field:desc`, comma separated.
        #[arg(long, value_delimiter = ',', value_parser = parse_order_spec)]
        order_by: Vec<OrderSpec>,
        #[arg(long)]
        top: Option<usize>,
    },
    Insert(TableFields),
    InsertAll {
        #[command(flatten)]
        target: TableFields,
        #[arg(long)]
        batch_size: usize,
    },
    Update {
        #[command(flatten)]
        target: TableFields,
        #[command(flatten)]
        filter: WhereArgs,
    },
    Delete {
        #[arg(long)]
        table: String,
        #[command(flatten)]
        filter: WhereArgs,
    },
    Count {
        #[arg(long)]
        table: String,
        #[command(flatten)]
        filter: WhereArgs,
    },
    Merge {
        #[command(flatten)]
        target: TableFields,
        #[arg(long, value_delimiter = ',', required = true)]
        qualifier: Vec<String>,
    },
    Truncate {
        #[arg(long)]
        table: String,
    },
}

#[derive(Debug, Args)]
pub(crate) struct ValueArgs {
    #[arg(required = true)]
    values: Vec<String>,
}

#[derive(Debug, Args)]
pub(crate) struct TableFields {
    #[arg(long)]
    table: String,
    #[arg(long, value_delimiter = ',', required = true)]
    fields: Vec<String>,
}

#[derive(Debug, Args)]
pub(crate) struct WhereArgs {
    #[arg(long = "where", value_delimiter = ',')]
    where_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderSpec {
    name: String,
    order: Order,
}

fn parse_order_spec(raw: &str) -> Result<OrderSpec, String> {
    let (name, order) = match raw.rsplit_once(':') {
        Some((name, direction)) => {
            let order = match direction.to_ascii_lowercase().as_str() {
                "asc" => Order::Ascending,
                "desc" => Order::Descending,
                other => {
                    return Err(format!(
                        "unknown sort direction `{other}`; use asc or desc"
                    ));
                }
            };
            (name, order)
        }
        None => (raw, Order::Ascending),
    };

    if name.trim().is_empty() {
        return Err("sort field must not be empty".to_string());
    }

    Ok(OrderSpec {
        name: name.to_string(),
        order,
    })
}

/// Fragment commands format with `setting`, which may be a custom one;
/// statement commands always use the dialect's own setting.
pub(crate) fn execute(
    dialect: &dyn Dialect,
    setting: &DbSetting,
    command: &Command,
) -> CliResult<Vec<String>> {
    let builder = StatementBuilder::new(dialect);

    let lines = match command {
        Command::Field(values) => values.render(|value| text::as_field(value, setting)),
        Command::Parameter { index, values } => {
            values.render(|value| text::as_parameter(value, *index, setting))
        }
        Command::AliasField { alias, values } => {
            values.render(|value| text::as_alias_field(value, alias, setting))
        }
        Command::JoinQualifier {
            left,
            right,
            values,
        } => values.render(|value| text::as_join_qualifier(value, left, right, setting)),
        Command::Unquote { trim, values } => {
            values.render(|value| text::as_unquoted_with(value, *trim, Some(setting)))
        }
        Command::AlphaNumeric { trim, values } => {
            values.render(|value| text::as_alpha_numeric(value, *trim))
        }
        Command::Query {
            target,
            filter,
            order_by,
            top,
        } => {
            let fields = borrowed(&target.fields);
            let where_fields = borrowed(&filter.where_fields);
            let order_by = order_by
                .iter()
                .map(|spec| OrderField {
                    name: spec.name.as_str(),
                    order: spec.order,
                })
                .collect::<Vec<_>>();

            vec![builder.create_query(&QueryRequest {
                table: &target.table,
                fields: &fields,
                where_fields: &where_fields,
                order_by: &order_by,
                top: *top,
            })?]
        }
        Command::Insert(target) => {
            vec![builder.create_insert(&target.table, &borrowed(&target.fields))?]
        }
        Command::InsertAll { target, batch_size } => vec![builder.create_insert_all(
            &target.table,
            &borrowed(&target.fields),
            *batch_size,
        )?],
        Command::Update { target, filter } => vec![builder.create_update(
            &target.table,
            &borrowed(&target.fields),
            &borrowed(&filter.where_fields),
        )?],
        Command::Delete { table, filter } => {
            vec![builder.create_delete(table, &borrowed(&filter.where_fields))]
        }
        Command::Count { table, filter } => {
            vec![builder.create_count(table, &borrowed(&filter.where_fields))]
        }
        Command::Merge { target, qualifier } => vec![builder.create_merge(
            &target.table,
            &borrowed(&target.fields),
            &borrowed(qualifier),
        )?],
        Command::Truncate { table } => vec![builder.create_truncate(table)],
    };

    Ok(lines)
}

impl ValueArgs {
    fn render(&self, format: impl Fn(&str) -> String) -> Vec<String> {
        self.values.iter().map(|value| format(value)).collect()
    }
}

fn borrowed(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use microrm_core::Order;

    use super::{OrderSpec, parse_order_spec};

    #[test]
    fn order_spec_defaults_to_ascending() {
        assert_eq!(
            parse_order_spec("Name"),
            Ok(OrderSpec {
                name: "Name".to_string(),
                order: Order::Ascending,
            })
        );
        assert_eq!(
            parse_order_spec("dbo.Name:DESC").map(|spec| spec.order),
            Ok(Order::Descending)
        );
    }

    #[test]
    fn order_spec_rejects_unknown_direction_and_empty_field() {
        assert!(parse_order_spec("Name:sideways").is_err());
        assert!(parse_order_spec(":asc").is_err());
    }
}
