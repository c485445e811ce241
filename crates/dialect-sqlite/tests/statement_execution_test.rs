use microrm_core::{QueryRequest, StatementBuilder};
use microrm_dialect_sqlite::SqliteDialect;
use rusqlite::{Connection, named_params};

const CREATE_USERS_SQL: &str =
    "CREATE TABLE [users] ([id] INTEGER PRIMARY KEY, [email] TEXT NOT NULL, [name] TEXT);";

fn users_connection() -> Connection {
    let connection = Connection::open_in_memory()
        .unwrap_or_else(|error| panic!("failed to open in-memory sqlite: {error}"));
    connection
        .execute_batch(CREATE_USERS_SQL)
        .unwrap_or_else(|error| panic!("failed to create users table: {error}"));
    connection
}

fn count_users(connection: &Connection, builder: &StatementBuilder<'_>) -> i64 {
    let sql = builder.create_count("users", &[]);
    connection
        .query_row(&sql, [], |row| row.get(0))
        .unwrap_or_else(|error| panic!("count must execute: {sql}\n{error}"))
}

#[test]
fn generated_statements_execute_with_named_parameters() {
    let dialect = SqliteDialect;
    let builder = StatementBuilder::new(&dialect);
    let connection = users_connection();

    let insert_all = builder
        .create_insert_all("users", &["id", "email"], 2)
        .expect("insert all should render");
    let inserted = connection
        .execute(
            &insert_all,
            named_params! {
                "@id": 1,
                "@email": "ada@example.com",
                "@id_1": 2,
                "@email_1": "grace@example.com",
            },
        )
        .unwrap_or_else(|error| panic!("insert all must execute: {insert_all}\n{error}"));
    assert_eq!(inserted, 2);
    assert_eq!(count_users(&connection, &builder), 2);

    let update = builder
        .create_update("users", &["id", "name"], &["id"])
        .expect("update should render");
    connection
        .execute(&update, named_params! { "@id": 2, "@name": "Grace" })
        .unwrap_or_else(|error| panic!("update must execute: {update}\n{error}"));

    let query = builder
        .create_query(&QueryRequest {
            table: "users",
            fields: &["email", "name"],
            where_fields: &["id"],
            ..QueryRequest::default()
        })
        .expect("query should render");
    let (email, name): (String, Option<String>) = connection
        .query_row(&query, named_params! { "@id": 2 }, |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap_or_else(|error| panic!("query must execute: {query}\n{error}"));
    assert_eq!(email, "grace@example.com");
    assert_eq!(name.as_deref(), Some("Grace"));

    let delete = builder.create_delete("users", &["id"]);
    connection
        .execute(&delete, named_params! { "@id": 2 })
        .unwrap_or_else(|error| panic!("delete must execute: {delete}\n{error}"));
    assert_eq!(count_users(&connection, &builder), 1);

    let truncate = builder.create_truncate("users");
    connection
        .execute_batch(&truncate)
        .unwrap_or_else(|error| panic!("truncate must execute: {truncate}\n{error}"));
    assert_eq!(count_users(&connection, &builder), 0);
}

#[test]
fn generated_merge_inserts_then_updates_on_conflict() {
    let dialect = SqliteDialect;
    let builder = StatementBuilder::new(&dialect);
    let connection = users_connection();

    let merge = builder
        .create_merge("users", &["id", "email"], &["id"])
        .expect("merge should render");

    for email in ["first@example.com", "second@example.com"] {
        connection
            .execute(&merge, named_params! { "@id": 7, "@email": email })
            .unwrap_or_else(|error| panic!("merge must execute: {merge}\n{error}"));
    }

    assert_eq!(count_users(&connection, &builder), 1);
    let email: String = connection
        .query_row("SELECT [email] FROM [users] WHERE [id] = 7;", [], |row| {
            row.get(0)
        })
        .unwrap_or_else(|error| panic!("merged row must exist: {error}"));
    assert_eq!(email, "second@example.com");
}
