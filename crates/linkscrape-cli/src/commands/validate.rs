use crate::OutputFormat;
use anyhow::{Context, Result};
use console::style;
use linkscrape_core::export::BatchReader;
use linkscrape_core::profile::{BatchResult, RunStatus};
use std::path::Path;

/// Check an exported document against the record schema and summarise it
pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!("Validating {}", file.display());
    let batch = BatchReader::from_file(file)
        .with_context(|| format!("{} is not a valid scrape result", file.display()))?;

    match format {
        OutputFormat::Json => output_json(&batch)?,
        OutputFormat::Pretty => output_pretty(&batch, file),
    }
    Ok(())
}

fn output_json(batch: &BatchResult) -> Result<()> {
    let profiles: Vec<_> = batch
        .profiles
        .iter()
        .map(|p| {
            serde_json::json!({
                "profile_url": p.profile_url,
                "full_name": p.basic.full_name,
                "experience": p.experience.len(),
                "education": p.education.len(),
                "skills": p.skills.len(),
                "has_contact_info": p.contact_info.is_some(),
            })
        })
        .collect();

    let summary = serde_json::json!({
        "valid": true,
        "scraped_at": batch.metadata.scraped_at,
        "status": batch.metadata.status,
        "total_profiles": batch.metadata.total_profiles,
        "failures": batch.failures.len(),
        "profiles": profiles,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn output_pretty(batch: &BatchResult, file: &Path) {
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("\n{}", style(format!("✅ {} is valid", file_name)).bold().green());
    println!();
    println!("  Scraped at: {}", batch.metadata.scraped_at);
    let status = match batch.metadata.status {
        RunStatus::Completed => style("completed").green(),
        RunStatus::CompletedWithErrors => style("completed with errors").yellow(),
    };
    println!("  Status:     {}", status);
    println!("  Profiles:   {}", batch.metadata.total_profiles);
    println!("  Failures:   {}", batch.failures.len());

    if !batch.profiles.is_empty() {
        println!();
        println!("{}", style("Profiles").bold());
        for profile in &batch.profiles {
            println!(
                "  • {} ({}) {} exp, {} edu, {} skills{}",
                profile.basic.full_name.as_deref().unwrap_or("<no name>"),
                profile.profile_url,
                profile.experience.len(),
                profile.education.len(),
                profile.skills.len(),
                if profile.contact_info.is_some() { ", contact info" } else { "" }
            );
        }
    }

    if !batch.failures.is_empty() {
        println!();
        println!("{}", style("Failures").bold());
        for failure in &batch.failures {
            println!("  ✗ {}: {}", failure.url, failure.error);
        }
    }
    println!();
}
