use microrm_core::{
    DbSetting, Dialect, MergeRequest, Result,
    text::{as_field, as_fields, as_fields_and_alias_fields, as_parameters, join},
};

pub static POSTGRES_SETTING: DbSetting = DbSetting::from_static("\"", "\"", ".", "@");

const EXCLUDED_ALIAS: &str = "EXCLUDED";
const FIELD_SEPARATOR: &str = ", ";

#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn setting(&self) -> &DbSetting {
        &POSTGRES_SETTING
    }

    /// `INSERT ... ON CONFLICT (qualifiers) DO UPDATE SET "B" = EXCLUDED."B"`,
    /// or `DO NOTHING` when every field is a qualifier.
    fn create_merge(&self, request: &MergeRequest<'_>) -> Result<String> {
        let setting = self.setting();
        let fields = Some(request.fields);

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) ",
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
        );

        let updatable = request.updatable_fields(setting);
        if updatable.is_empty() {
            sql.push_str("DO NOTHING");
        } else {
            let assignments =
                as_fields_and_alias_fields(Some(updatable.as_slice()), EXCLUDED_ALIAS, setting)
                    .unwrap_or_default();
            sql.push_str("DO UPDATE SET ");
            sql.push_str(&join(assignments, FIELD_SEPARATOR));
        }

        sql.push(';');
        Ok(sql)
    }
}
