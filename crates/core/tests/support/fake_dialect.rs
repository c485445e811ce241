use std::sync::{Arc, Mutex};

use microrm_core::{DbSetting, Dialect, LimitPlacement, MergeRequest, Result, text};

const FAKE_SETTING: DbSetting = DbSetting::from_static("[", "]", ".", "@");

/// Bracket-quoting dialect that records every merge request it renders.
#[derive(Debug, Clone)]
pub struct FakeDialect {
    setting: DbSetting,
    limit_placement: LimitPlacement,
    merges: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl Default for FakeDialect {
    fn default() -> Self {
        Self {
            setting: FAKE_SETTING,
            limit_placement: LimitPlacement::Suffix,
            merges: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeDialect {
    pub fn with_prefix_limit() -> Self {
        Self {
            limit_placement: LimitPlacement::Prefix,
            ..Self::default()
        }
    }

    pub fn recorded_merges(&self) -> Vec<(String, Vec<String>)> {
        self.merges
            .lock()
            .expect("merge log lock should not be poisoned")
            .clone()
    }
}

impl Dialect for FakeDialect {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn setting(&self) -> &DbSetting {
        &self.setting
    }

    fn limit_placement(&self) -> LimitPlacement {
        self.limit_placement
    }

    fn create_merge(&self, request: &MergeRequest<'_>) -> Result<String> {
        let updatable = request.updatable_fields(&self.setting);
        self.merges
            .lock()
            .expect("merge log lock should not be poisoned")
            .push((
                request.table.to_string(),
                updatable.iter().map(|field| (*field).to_string()).collect(),
            ));

        Ok(format!(
            "UPSERT {} ON {} SET {};",
            text::as_field(request.table, &self.setting),
            text::join(
                text::as_fields(Some(request.qualifiers), &self.setting).unwrap_or_default(),
                ", "
            ),
            text::join(
                text::as_fields_and_parameters(Some(updatable.as_slice()), 0, &self.setting)
                    .unwrap_or_default(),
                ", "
            )
        ))
    }
}
