use microrm_core::{Dialect, StatementBuilder};
use microrm_dialect_mysql::MysqlDialect;

#[test]
fn setting_uses_backticks() {
    let dialect = MysqlDialect;
    let setting = dialect.setting();

    assert_eq!(setting.opening_quote(), "`");
    assert_eq!(setting.closing_quote(), "`");
    assert_eq!(setting.schema_separator(), ".");
}

#[test]
fn insert_all_uses_row_indexed_parameters() {
    let dialect = MysqlDialect;
    let sql = StatementBuilder::new(&dialect)
        .create_insert_all("shop.orders", &["id", "total"], 2)
        .expect("insert all should render");

    assert_eq!(
        sql,
        "INSERT INTO `shop`.`orders` (`id`, `total`) VALUES (@id, @total), (@id_1, @total_1);"
    );
}

#[test]
fn merge_renders_on_duplicate_key_update() {
    let dialect = MysqlDialect;
    let sql = StatementBuilder::new(&dialect)
        .create_merge("orders", &["id", "total"], &["id"])
        .expect("merge should render");

    assert_eq!(
        sql,
        "INSERT INTO `orders` (`id`, `total`) VALUES (@id, @total) \
         ON DUPLICATE KEY UPDATE `total` = VALUES(`total`);"
    );
}

#[test]
fn merge_on_every_field_assigns_the_first_qualifier_to_itself() {
    let dialect = MysqlDialect;
    let sql = StatementBuilder::new(&dialect)
        .create_merge("tags", &["post_id", "tag"], &["tag", "post_id"])
        .expect("merge should render");

    assert_eq!(
        sql,
        "INSERT INTO `tags` (`post_id`, `tag`) VALUES (@post_id, @tag) \
         ON DUPLICATE KEY UPDATE `tag` = VALUES(`tag`);"
    );
}
