//! Evaluate authorization queries against the live database, the same code
//! path the API handlers use.

use anyhow::Context;
use serde_json::json;

use crate::authz::{self, Action, ObjectType};
use crate::cli::OutputFormat;
use crate::database::Database;

fn connect() -> anyhow::Result<Database> {
    Database::connect().context("failed to configure database (is DATABASE_URL set?)")
}

pub async fn check(
    user: String,
    object_id: String,
    action: String,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let action: Action = action.parse().map_err(anyhow::Error::msg)?;
    let db = connect()?;

    let allowed = authz::can_user_perform_action(&db, &user, &object_id, action).await?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "user": user, "object_id": object_id, "action": action, "allowed": allowed })
        ),
        OutputFormat::Text => {
            let verdict = if allowed { "allowed" } else { "denied" };
            println!("{} on {} for {}: {}", action, object_id, user, verdict);
        }
    }
    Ok(())
}

pub async fn can_create(
    user: String,
    object_type: String,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let object_type: ObjectType = object_type.parse().map_err(anyhow::Error::msg)?;
    let db = connect()?;

    let allowed = authz::user_can_create(&db, &user, object_type).await?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "user": user, "object_type": object_type, "allowed": allowed })
        ),
        OutputFormat::Text => {
            let verdict = if allowed { "allowed" } else { "denied" };
            println!("create {} for {}: {}", object_type, user, verdict);
        }
    }
    Ok(())
}

pub async fn list_read(
    user: String,
    object_type: String,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let object_type: ObjectType = object_type.parse().map_err(anyhow::Error::msg)?;
    let db = connect()?;

    let ids = authz::list_objects_user_can_read(&db, &user, object_type).await?;
    let mut ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    ids.sort();

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "user": user, "object_type": object_type, "object_ids": ids })
        ),
        OutputFormat::Text => {
            println!("{} readable {}:", ids.len(), object_type);
            for id in ids {
                println!("  {}", id);
            }
        }
    }
    Ok(())
}
