use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;

/// Mint a development token for a subject using the configured secret.
pub fn handle(sub: String, output_format: OutputFormat) -> anyhow::Result<()> {
    let token = generate_jwt(Claims::new(sub.clone()))?;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "sub": sub, "token": token })),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
