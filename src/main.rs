use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use ordertrack_tester::utils::config::{Config, DEFAULT_BASE_URL};
use ordertrack_tester::{report, runner};

#[derive(Parser)]
#[command(name = "ordertrack-tester")]
#[command(version = "0.1.0")]
#[command(about = "End-to-end test harness for the order tracking API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scenario suite against a live service
    Run {
        /// Base URL of the target service (without /api)
        #[arg(short, long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Per-request timeout in seconds
        #[arg(short, long, default_value = "10")]
        timeout: u64,

        /// Output directory for reports
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Generate reports (JSON, JUnit)
        #[arg(long, default_value = "false")]
        report: bool,
    },

    /// Generate report from saved test results
    Report {
        /// Path to test results JSON
        results: PathBuf,

        /// Output format (json, junit)
        #[arg(short, long, default_value = "junit")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            base_url,
            timeout,
            output,
            report,
        } => {
            let config = Config {
                base_url,
                timeout_secs: timeout,
                output_dir: output,
            };

            println!("{} Target: {}", "▶".green().bold(), config.base_url.cyan());
            println!("  Timeout: {}s", config.timeout_secs.to_string().cyan());
            println!(
                "  Output: {}",
                config.output_dir.display().to_string().cyan()
            );
            if report {
                println!("  Reports: {}", "Enabled".green());
            }

            let code = runner::run_suite(&config, report).await?;
            std::process::exit(code);
        }

        Commands::Report {
            results,
            format,
            output,
        } => {
            println!(
                "{} Generating {} report from: {}",
                "📊".to_string().blue(),
                format.cyan(),
                results.display()
            );
            report::generate_report(&results, &format, output.as_deref()).await?;
        }
    }

    Ok(())
}
