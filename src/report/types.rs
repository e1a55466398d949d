use crate::runner::state::{ScenarioReport, SuiteState, SuiteSummary};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Results of one suite run, as written to disk and fed to report generators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteReport {
    pub session_id: String,
    pub scenarios: Vec<ScenarioReport>,
    pub summary: SuiteSummary,
    pub generated_at: String,
}

impl SuiteReport {
    pub fn from_state(state: &SuiteState) -> Self {
        Self {
            session_id: state.session_id.clone(),
            scenarios: state.records.iter().map(|r| r.to_report()).collect(),
            summary: state.summary(),
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
