//! Command handlers

use super::commands::ClassifyArgs;
use crate::config::RunConfig;
use crate::input::load_attendees;
use crate::llm::GenAIClient;
use crate::oracle::LlmOracle;
use crate::output::{self, ClassificationRecord};
use crate::pipeline::Orchestrator;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Runs the classify command, returning a process exit code.
pub async fn handle_classify(args: &ClassifyArgs, quiet: bool) -> i32 {
    match run_classify(args, quiet).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    }
}

async fn run_classify(args: &ClassifyArgs, quiet: bool) -> Result<()> {
    let attendees = load_attendees(&args.input)
        .with_context(|| format!("failed to load attendees from {}", args.input.display()))?;
    info!(
        attendees = attendees.len(),
        input = %args.input.display(),
        "attendee report loaded"
    );

    let config = RunConfig {
        batch_size: args.batch_size,
        max_workers: args.max_workers,
        max_retries: args.max_retries,
        request_timeout: Duration::from_secs(args.timeout),
        ..RunConfig::default()
    };

    let client = Arc::new(GenAIClient::new(
        args.backend,
        args.model.clone(),
        config.request_timeout,
    ));
    let oracle = Arc::new(LlmOracle::new(client));

    let orchestrator = Orchestrator::new(config, oracle);
    let results = orchestrator
        .run(&attendees)
        .await
        .context("classification run failed")?;

    if let Some(path) = &args.output {
        output::write_csv(&results, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
    }
    if let Some(path) = &args.json {
        output::write_json(&results, path)
            .with_context(|| format!("failed to write JSON to {}", path.display()))?;
    }

    if args.output.is_none() && args.json.is_none() {
        // No output file requested: print JSON to stdout.
        let json = serde_json::to_string_pretty(&results)?;
        println!("{json}");
    } else if !quiet {
        print_summary(&results);
    }

    Ok(())
}

fn print_summary(results: &[ClassificationRecord]) {
    let fallbacks = results.iter().filter(|r| r.is_fallback()).count();
    let pharma = results
        .iter()
        .filter(|r| r.industry_association == output::IndustryAssociation::Pharmaceutical)
        .count();
    let healthcare = results
        .iter()
        .filter(|r| r.industry_association == output::IndustryAssociation::Healthcare)
        .count();

    println!("Classified {} attendees", results.len());
    println!("  Pharmaceutical: {pharma}");
    println!("  Healthcare:     {healthcare}");
    println!(
        "  Other:          {}",
        results.len() - pharma - healthcare
    );
    if fallbacks > 0 {
        println!("  Fallback records (classification failed): {fallbacks}");
    }
}
