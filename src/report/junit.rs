use super::types::SuiteReport;
use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

/// Generate JUnit XML report string from suite results
pub fn generate_junit_xml(report: &SuiteReport) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    // Write XML declaration
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let total_tests = report.scenarios.len();
    let failures = report.scenarios.iter().filter(|s| !s.success).count();
    let total_duration: u64 = report
        .scenarios
        .iter()
        .map(|s| s.duration_ms.unwrap_or(0))
        .sum();

    // <testsuites>
    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", "ordertrack-tester-run"));
    suites_start.push_attribute(("tests", total_tests.to_string().as_str()));
    suites_start.push_attribute(("failures", failures.to_string().as_str()));
    suites_start.push_attribute((
        "time",
        (total_duration as f64 / 1000.0).to_string().as_str(),
    ));
    writer.write_event(Event::Start(suites_start))?;

    // Single <testsuite> for the run: one fixed scenario sequence
    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", "api-scenarios"));
    suite_start.push_attribute(("tests", total_tests.to_string().as_str()));
    suite_start.push_attribute(("failures", failures.to_string().as_str()));
    suite_start.push_attribute(("id", report.session_id.as_str()));
    suite_start.push_attribute((
        "time",
        (total_duration as f64 / 1000.0).to_string().as_str(),
    ));
    suite_start.push_attribute(("timestamp", report.generated_at.as_str()));
    writer.write_event(Event::Start(suite_start))?;

    for scenario in &report.scenarios {
        let mut case_start = BytesStart::new("testcase");
        case_start.push_attribute(("name", scenario.name.as_str()));
        case_start.push_attribute(("classname", "ordertrack.api"));
        case_start.push_attribute((
            "time",
            (scenario.duration_ms.unwrap_or(0) as f64 / 1000.0)
                .to_string()
                .as_str(),
        ));
        writer.write_event(Event::Start(case_start))?;

        if !scenario.success {
            let mut fail_start = BytesStart::new("failure");
            fail_start.push_attribute(("message", scenario.details.as_str()));
            fail_start.push_attribute(("type", "AssertionError"));
            writer.write_event(Event::Start(fail_start))?;
            writer.write_event(Event::Text(quick_xml::events::BytesText::new(
                &scenario.details,
            )))?;
            writer.write_event(Event::End(BytesEnd::new("failure")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let result = writer.into_inner().into_inner();
    let xml = String::from_utf8(result)?;
    Ok(xml)
}

/// Generate JUnit report, printing to stdout when no output path is given
pub async fn generate(report: &SuiteReport, output: Option<&Path>) -> Result<()> {
    let xml = generate_junit_xml(report)?;

    if let Some(path) = output {
        std::fs::write(path, xml)?;
        println!("JUnit report saved to: {}", path.display());
    } else {
        println!("{}", xml);
    }

    Ok(())
}

/// Write report to the output directory as junit.xml
pub fn write_report(report: &SuiteReport, output_dir: &Path) -> Result<()> {
    let xml = generate_junit_xml(report)?;
    let path = output_dir.join("junit.xml");
    std::fs::write(&path, xml)?;
    println!("    Generated JUnit report: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::state::{ScenarioReport, SuiteSummary};

    #[test]
    fn test_generate_junit_xml() {
        let report = SuiteReport {
            session_id: "test-session".to_string(),
            scenarios: vec![
                ScenarioReport {
                    name: "Admin Login".to_string(),
                    success: true,
                    details: "Admin user: admin".to_string(),
                    duration_ms: Some(150),
                },
                ScenarioReport {
                    name: "Order Update".to_string(),
                    success: false,
                    details: "Response: {\"detail\":\"Order not found\"}".to_string(),
                    duration_ms: Some(90),
                },
            ],
            summary: SuiteSummary {
                session_id: "test-session".to_string(),
                total: 2,
                passed: 1,
                failed: 1,
                success_rate: 50.0,
                total_duration_ms: Some(240),
            },
            generated_at: "2025-01-15 12:00:00".to_string(),
        };

        let xml = generate_junit_xml(&report).expect("Failed to generate XML");

        assert!(xml.contains(r#"<testsuites name="ordertrack-tester-run""#));
        assert!(xml.contains(r#"tests="2""#));
        assert!(xml.contains(r#"failures="1""#));
        assert!(xml.contains(r#"<testcase name="Admin Login""#));
        assert!(xml.contains("Order not found"));
    }
}
