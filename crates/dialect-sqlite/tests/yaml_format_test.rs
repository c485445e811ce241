use std::path::PathBuf;

use microrm_dialect_sqlite::SqliteDialect;
use microrm_testkit::{TestResult, load_format_cases_from_path, run_format_cases};

#[test]
fn sqlite_yaml_format_cases_pass() {
    let dialect = SqliteDialect;

    run_format_case_file(&dialect, "0001-fragments.yml");
}

fn run_format_case_file(dialect: &SqliteDialect, file_name: &str) {
    let path = format_cases_root().join(file_name);
    let cases = load_format_cases_from_path(&path).unwrap_or_else(|error| {
        panic!(
            "failed to load format cases '{}': {error}",
            path.display()
        )
    });

    assert!(
        !cases.is_empty(),
        "format case file '{}' must define at least one case",
        path.display()
    );

    let mut passed = 0;
    for (case_name, result) in run_format_cases(dialect, &cases) {
        match result {
            TestResult::Passed => passed += 1,
            TestResult::Skipped(_) => {}
            TestResult::Failed(reason) => panic!("format case '{case_name}' failed: {reason}"),
        }
    }
    assert!(passed > 0, "'{}' must run at least one case", path.display());
}

fn format_cases_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/sqlite/format")
}
