use anyhow::Context;
use serde_json::json;

use crate::cli::OutputFormat;

/// Ping a running service's /health endpoint.
pub async fn handle(url: String, output_format: OutputFormat) -> anyhow::Result<()> {
    let endpoint = format!("{}/health", url.trim_end_matches('/'));
    let response = reqwest::get(&endpoint)
        .await
        .with_context(|| format!("failed to reach {}", endpoint))?;

    let status = response.status();
    let body: serde_json::Value = response.json().await.unwrap_or(json!({}));

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "status": status.as_u16(), "body": body })),
        OutputFormat::Text => println!("{} {}", status, body),
    }

    if !status.is_success() {
        anyhow::bail!("service degraded: {}", status);
    }
    Ok(())
}
