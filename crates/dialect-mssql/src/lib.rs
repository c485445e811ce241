use microrm_core::{DbSetting, Dialect, LimitPlacement, MergeRequest, Result};

mod merge;

pub static MSSQL_SETTING: DbSetting = DbSetting::from_static("[", "]", ".", "@");

#[derive(Debug, Default, Clone, Copy)]
pub struct MssqlDialect;

impl Dialect for MssqlDialect {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn setting(&self) -> &DbSetting {
        &MSSQL_SETTING
    }

    fn limit_placement(&self) -> LimitPlacement {
        LimitPlacement::Prefix
    }

    fn create_merge(&self, request: &MergeRequest<'_>) -> Result<String> {
        Ok(merge::render_merge(request, self.setting()))
    }
}
