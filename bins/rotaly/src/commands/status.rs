//! Status command - show backend configuration

use crate::OutputFormat;
use anyhow::Result;
use owo_colors::OwoColorize;
use rotaly_api_client::RotalyClient;
use serde_json::json;

/// Print whether a backend is configured and where requests would go
pub fn run(client: &RotalyClient, format: OutputFormat) -> Result<()> {
    let config = client.config();
    let configured = client.is_configured();

    if format == OutputFormat::Json {
        let output = json!({
            "configured": configured,
            "url": config.url,
            "rest_url": config.rest_url(),
            "timeout_secs": config.timeout.map(|t| t.as_secs()),
            "session_id": rotaly_telemetry::session_id(),
            "metrics": rotaly_telemetry::metrics().export_json(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("  {}", "Rotaly backend".blue().bold());
    println!();

    if configured {
        println!("  Backend:   {}", "✓ configured".green());
    } else {
        println!("  Backend:   {}", "✗ not configured".yellow());
        println!(
            "  {}",
            "Set SUPABASE_URL and SUPABASE_ANON_KEY; reads return empty results until then."
                .dimmed()
        );
    }

    if let Some(rest_url) = config.rest_url() {
        println!("  REST URL:  {rest_url}");
    }
    match config.timeout {
        Some(timeout) => println!("  Timeout:   {}s", timeout.as_secs()),
        None => println!("  Timeout:   {}", "transport default".dimmed()),
    }
    println!();
    Ok(())
}
