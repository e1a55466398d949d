use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One recorded scenario outcome. Appended, never mutated.
#[derive(Debug, Clone)]
pub struct ScenarioRecord {
    pub name: String,
    pub success: bool,
    pub details: String,
    pub duration_ms: Option<u64>,
}

impl ScenarioRecord {
    /// Serialize for reporting (without Instant which isn't serializable)
    pub fn to_report(&self) -> ScenarioReport {
        ScenarioReport {
            name: self.name.clone(),
            success: self.success,
            details: self.details.clone(),
            duration_ms: self.duration_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub name: String,
    pub success: bool,
    pub details: String,
    pub duration_ms: Option<u64>,
}

/// Accumulated state for one suite run: ordered records plus counters.
///
/// `scenarios_passed <= scenarios_run` holds after every `record` call.
#[derive(Debug)]
pub struct SuiteState {
    pub session_id: String,
    pub records: Vec<ScenarioRecord>,
    pub scenarios_run: u32,
    pub scenarios_passed: u32,
    started_at: Instant,
    scenario_started: Option<Instant>,
}

impl SuiteState {
    pub fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            records: Vec::new(),
            scenarios_run: 0,
            scenarios_passed: 0,
            started_at: Instant::now(),
            scenario_started: None,
        }
    }

    /// Print the scenario header and stamp its start time
    pub fn begin(&mut self, title: &str) {
        println!("\n{} {}...", "→".blue(), title);
        self.scenario_started = Some(Instant::now());
    }

    /// Record one scenario outcome, print its progress line, bump counters.
    ///
    /// Returns the outcome so scenarios can `return state.record(...)`.
    pub fn record(&mut self, name: &str, success: bool, details: impl Into<String>) -> bool {
        let details = details.into();
        let duration_ms = self
            .scenario_started
            .take()
            .map(|t| t.elapsed().as_millis() as u64);

        self.scenarios_run += 1;
        if success {
            self.scenarios_passed += 1;
        }

        let glyph = if success {
            "✓ PASS".green().bold()
        } else {
            "✗ FAIL".red().bold()
        };
        if details.is_empty() {
            println!("  {} - {}", glyph, name);
        } else {
            println!("  {} - {} | {}", glyph, name, details);
        }

        self.records.push(ScenarioRecord {
            name: name.to_string(),
            success,
            details,
            duration_ms,
        });
        success
    }

    pub fn all_passed(&self) -> bool {
        self.scenarios_passed == self.scenarios_run
    }

    pub fn summary(&self) -> SuiteSummary {
        let failed = self.scenarios_run - self.scenarios_passed;
        let success_rate = if self.scenarios_run == 0 {
            100.0
        } else {
            self.scenarios_passed as f64 / self.scenarios_run as f64 * 100.0
        };

        SuiteSummary {
            session_id: self.session_id.clone(),
            total: self.scenarios_run,
            passed: self.scenarios_passed,
            failed,
            success_rate,
            total_duration_ms: Some(self.started_at.elapsed().as_millis() as u64),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteSummary {
    pub session_id: String,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub success_rate: f64,
    pub total_duration_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_track_records() {
        let mut state = SuiteState::new("s1");
        state.record("first", true, "ok");
        state.record("second", false, "bad response");
        state.record("third", true, "");

        assert_eq!(state.scenarios_run, 3);
        assert_eq!(state.scenarios_passed, 2);
        assert!(state.scenarios_passed <= state.scenarios_run);
        assert!(!state.all_passed());
        assert_eq!(state.records.len(), 3);
        assert_eq!(state.records[1].details, "bad response");
    }

    #[test]
    fn record_returns_outcome() {
        let mut state = SuiteState::new("s1");
        assert!(state.record("ok", true, ""));
        assert!(!state.record("bad", false, ""));
    }

    #[test]
    fn summary_math() {
        let mut state = SuiteState::new("s1");
        for i in 0..4 {
            state.record(&format!("scenario {}", i), i != 3, "");
        }

        let summary = state.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 3);
        assert_eq!(summary.failed, 1);
        assert!((summary.success_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn begin_stamps_duration() {
        let mut state = SuiteState::new("s1");
        state.begin("Checking something");
        state.record("timed", true, "");
        assert!(state.records[0].duration_ms.is_some());

        // No begin() call: duration is unknown, not zero.
        state.record("untimed", true, "");
        assert!(state.records[1].duration_ms.is_none());
    }

    #[test]
    fn empty_suite_counts_as_passed() {
        let state = SuiteState::new("s1");
        assert!(state.all_passed());
        assert_eq!(state.summary().success_rate, 100.0);
    }
}
