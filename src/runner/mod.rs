pub mod scenarios;
pub mod session;
pub mod state;

use anyhow::Result;
use colored::Colorize;
use std::time::Duration;
use uuid::Uuid;

pub use scenarios::SuiteRunner;
pub use session::SessionState;
pub use state::{ScenarioRecord, SuiteState, SuiteSummary};

use crate::client::ApiClient;
use crate::report;
use crate::utils::config::Config;

/// Run the full scenario suite against the configured service.
///
/// Returns the process exit code: 0 when every scenario passed, 1 otherwise.
/// Harness plumbing failures (client construction, report IO) are the only
/// errors that propagate; scenario failures are recorded and the run always
/// proceeds to the next scenario.
pub async fn run_suite(config: &Config, write_reports: bool) -> Result<i32> {
    let client = ApiClient::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
    let session_id = Uuid::new_v4().to_string();

    println!("{}", "=".repeat(60));
    println!(
        "{} Order tracking API test run: {}",
        "▶".green().bold(),
        session_id.cyan()
    );
    println!("  Target: {}", config.base_url.cyan());
    println!("{}", "=".repeat(60));

    let mut runner = SuiteRunner::new(client, SuiteState::new(&session_id));

    // Core API scenarios
    runner.check_api_health().await;
    runner.admin_login().await;
    runner.create_company().await;
    runner.company_login().await;

    // Order management scenarios
    runner.create_order().await;
    runner.list_orders_company().await;
    runner.update_order().await;
    runner.list_orders_admin().await;
    runner.order_history().await;

    // Statistics scenarios
    runner.stats_company().await;
    runner.stats_admin().await;

    // Access-control scenarios
    runner.unauthorized_access().await;

    // Cleanup: the created order must not outlive the run
    runner.delete_order().await;

    let summary = runner.state.summary();
    print_summary(&summary);

    if write_reports {
        let suite_report = report::types::SuiteReport::from_state(&runner.state);
        report::write_reports(&suite_report, &config.output_dir)?;
    }

    Ok(if runner.state.all_passed() { 0 } else { 1 })
}

fn print_summary(summary: &SuiteSummary) {
    println!("\n{}", "=".repeat(60));
    println!("{} Test summary", "■".blue().bold());
    println!("{}", "=".repeat(60));
    println!("  Total scenarios: {}", summary.total);
    println!(
        "  {} passed, {} failed",
        summary.passed.to_string().green(),
        summary.failed.to_string().red()
    );
    println!("  Success rate: {:.1}%", summary.success_rate);
    if let Some(duration) = summary.total_duration_ms {
        println!("  Duration: {}ms", duration);
    }

    if summary.failed == 0 {
        println!("\n{} All scenarios passed.", "✓".green().bold());
    } else {
        println!(
            "\n{} {} scenario(s) failed. Check the details above.",
            "✗".red().bold(),
            summary.failed
        );
    }
}
