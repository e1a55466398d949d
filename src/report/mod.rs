pub mod json;
pub mod junit;
pub mod types;

use anyhow::Result;
use std::path::Path;

/// Regenerate a report from a saved results file
pub async fn generate_report(
    results_path: &Path,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let raw = std::fs::read_to_string(results_path)?;
    let report: types::SuiteReport = serde_json::from_str(&raw)?;

    match format {
        "json" => json::generate(&report, output).await,
        "junit" => junit::generate(&report, output).await,
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}

/// Write the standard report set (results.json + junit.xml) after a run
pub fn write_reports(report: &types::SuiteReport, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;

    let json_path = output_dir.join("results.json");
    std::fs::write(&json_path, serde_json::to_string_pretty(report)?)?;
    println!("    Saved results to: {}", json_path.display());

    junit::write_report(report, output_dir)?;
    Ok(())
}
