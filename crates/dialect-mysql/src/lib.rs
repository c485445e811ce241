use microrm_core::{
    DbSetting, Dialect, MergeRequest, Result,
    text::{as_field, as_fields, as_parameters, join},
};

pub static MYSQL_SETTING: DbSetting = DbSetting::from_static("`", "`", ".", "@");

const FIELD_SEPARATOR: &str = ", ";

#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDialect;

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn setting(&self) -> &DbSetting {
        &MYSQL_SETTING
    }

    fn create_merge(&self, request: &MergeRequest<'_>) -> Result<String> {
        let setting = self.setting();
        let fields = Some(request.fields);

        // A no-op assignment keeps the statement valid when only qualifiers
        // were given.
        let mut updatable = request.updatable_fields(setting);
        if updatable.is_empty() {
            updatable = request.qualifiers.iter().take(1).copied().collect();
        }

        let assignments = updatable.iter().map(|field| {
            let field = as_field(field, setting);
            format!("{field} = VALUES({field})")
        });

        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({}) ON DUPLICATE KEY UPDATE {};",
            as_field(request.table, setting),
            join(as_fields(fields, setting).unwrap_or_default(), FIELD_SEPARATOR),
            join(
                as_parameters(fields, 0, setting).unwrap_or_default(),
                FIELD_SEPARATOR
            ),
            join(assignments, FIELD_SEPARATOR),
        ))
    }
}
