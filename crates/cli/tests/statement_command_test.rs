use std::process::Command;

fn run_microrm(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_microrm"))
        .args(args)
        .output()
        .unwrap_or_else(|error| panic!("failed to run microrm: {error}"))
}

fn single_line(output: &std::process::Output) -> String {
    assert_eq!(
        output.status.code(),
        Some(0),
        "microrm failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[cfg(feature = "mssql")]
#[test]
fn mssql_query_puts_top_before_fields() {
    let output = run_microrm(&[
        "mssql",
        "query",
        "--table",
        "dbo.Users",
        "--fields",
        "Id,Name",
        "--where",
        "Id",
        "--top",
        "1",
    ]);

    assert_eq!(
        single_line(&output),
        "SELECT TOP (1) [Id], [Name] FROM [dbo].[Users] WHERE [Id] = @Id;"
    );
}

#[cfg(feature = "postgres")]
#[test]
fn postgres_query_orders_and_limits_at_the_end() {
    let output = run_microrm(&[
        "postgres",
        "query",
        "--table",
        "public.users",
        "--fields",
        "id,name",
        "--order-by",
        "id:desc",
        "--top",
        "20",
    ]);

    assert_eq!(
        single_line(&output),
        r#"SELECT "id", "name" FROM "public"."users" ORDER BY "id" DESC LIMIT 20;"#
    );
}

#[cfg(feature = "mssql")]
#[test]
fn insert_all_numbers_every_row_after_the_first() {
    let output = run_microrm(&[
        "mssql",
        "insert-all",
        "--table",
        "Users",
        "--fields",
        "Id,Name",
        "--batch-size",
        "2",
    ]);

    assert_eq!(
        single_line(&output),
        "INSERT INTO [Users] ([Id], [Name]) VALUES (@Id, @Name), (@Id_1, @Name_1);"
    );
}

#[cfg(feature = "mssql")]
#[test]
fn delete_count_and_truncate_take_only_a_table() {
    let delete = run_microrm(&["mssql", "delete", "--table", "Users", "--where", "Id"]);
    assert_eq!(single_line(&delete), "DELETE FROM [Users] WHERE [Id] = @Id;");

    let count = run_microrm(&["mssql", "count", "--table", "Users"]);
    assert_eq!(
        single_line(&count),
        "SELECT COUNT(*) AS [CountValue] FROM [Users];"
    );

    let truncate = run_microrm(&["mssql", "truncate", "--table", "Users"]);
    assert_eq!(single_line(&truncate), "TRUNCATE TABLE [Users];");
}

#[cfg(feature = "sqlite")]
#[test]
fn sqlite_truncate_falls_back_to_delete() {
    let output = run_microrm(&["sqlite", "truncate", "--table", "Users"]);

    assert_eq!(single_line(&output), "DELETE FROM [Users];");
}

#[cfg(feature = "postgres")]
#[test]
fn postgres_merge_renders_on_conflict() {
    let output = run_microrm(&[
        "postgres",
        "merge",
        "--table",
        "tags",
        "--fields",
        "post_id,tag",
        "--qualifier",
        "post_id,tag",
    ]);

    assert_eq!(
        single_line(&output),
        r#"INSERT INTO "tags" ("post_id", "tag") VALUES (@post_id, @tag) ON CONFLICT ("post_id", "tag") DO NOTHING;"#
    );
}
