use microrm_core::{
    DbSetting, MergeRequest,
    text::{
        as_alias_fields, as_field, as_fields, as_fields_and_alias_fields, as_join_qualifier,
        as_parameters_as_fields, join,
    },
};

const TARGET_ALIAS: &str = "T";
const SOURCE_ALIAS: &str = "S";
const FIELD_SEPARATOR: &str = ", ";

// MERGE [T] AS T USING (SELECT @A AS [A], ...) AS S ON (S.[A] = T.[A])
//   WHEN NOT MATCHED THEN INSERT (...) VALUES (S.[A], ...)
//   WHEN MATCHED THEN UPDATE SET [B] = S.[B];
pub(crate) fn render_merge(request: &MergeRequest<'_>, setting: &DbSetting) -> String {
    let fields = Some(request.fields);

    let projection = as_parameters_as_fields(fields, 0, setting).unwrap_or_default();
    let qualifiers = request
        .qualifiers
        .iter()
        .map(|qualifier| as_join_qualifier(qualifier, SOURCE_ALIAS, TARGET_ALIAS, setting));

    let mut sql = format!(
        "MERGE {} AS {TARGET_ALIAS} USING (SELECT {}) AS {SOURCE_ALIAS} ON ({}) \
         WHEN NOT MATCHED THEN INSERT ({}) VALUES ({})",
        as_field(request.table, setting),
        join(projection, FIELD_SEPARATOR),
        join(qualifiers, " AND "),
        join(as_fields(fields, setting).unwrap_or_default(), FIELD_SEPARATOR),
        join(
            as_alias_fields(fields, SOURCE_ALIAS, setting).unwrap_or_default(),
            FIELD_SEPARATOR
        ),
    );

    let updatable = request.updatable_fields(setting);
    if !updatable.is_empty() {
        let assignments =
            as_fields_and_alias_fields(Some(updatable.as_slice()), SOURCE_ALIAS, setting)
                .unwrap_or_default();
        sql.push_str(" WHEN MATCHED THEN UPDATE SET ");
        sql.push_str(&join(assignments, FIELD_SEPARATOR));
    }

    sql.push(';');
    sql
}
