use microrm_core::{
    DbSetting, Dialect, MergeRequest, Result,
    text::{as_field, as_fields, as_fields_and_alias_fields, as_parameters, join},
};

pub static SQLITE_SETTING: DbSetting = DbSetting::from_static("[", "]", ".", "@");

const EXCLUDED_ALIAS: &str = "excluded";
const FIELD_SEPARATOR: &str = ", ";

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn setting(&self) -> &DbSetting {
        &SQLITE_SETTING
    }

    // SQLite has no TRUNCATE; an unqualified DELETE takes the truncate
    // optimization path.
    fn create_truncate(&self, table: &str) -> String {
        format!("DELETE FROM {};", as_field(table, self.setting()))
    }

    fn create_merge(&self, request: &MergeRequest<'_>) -> Result<String> {
        let setting = self.setting();
        let fields = Some(request.fields);
        let updatable = request.updatable_fields(setting);

        let action = if updatable.is_empty() {
            "DO NOTHING".to_string()
        } else {
            let assignments =
                as_fields_and_alias_fields(Some(updatable.as_slice()), EXCLUDED_ALIAS, setting)
                    .unwrap_or_default();
            format!("DO UPDATE SET {}", join(assignments, FIELD_SEPARATOR))
        };

        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) {action};",
            as_field(request.table, setting),
            join(as_fields(fields, setting).unwrap_or_default(), FIELD_SEPARATOR),
            join(
                as_parameters(fields, 0, setting).unwrap_or_default(),
                FIELD_SEPARATOR
            ),
            join(
                as_fields(Some(request.qualifiers), setting).unwrap_or_default(),
                FIELD_SEPARATOR
            ),
        ))
    }
}
