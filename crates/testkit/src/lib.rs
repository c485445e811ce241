mod yaml_runner;

pub use yaml_runner::{
    FormatCase, FormatOp, TestResult, TestkitError, load_format_cases_from_path,
    load_format_cases_from_str, matches_flavor, run_format_case, run_format_cases,
};
