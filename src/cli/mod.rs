pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arbiter")]
#[command(about = "Arbiter CLI - operator tools for the authorization service")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Evaluate whether a user may perform an action on an object")]
    Check {
        #[arg(help = "Identity-provider subject, e.g. auth0|abc123")]
        user: String,
        #[arg(help = "Object UUID")]
        object_id: String,
        #[arg(help = "Action: create, read, update, delete")]
        action: String,
    },

    #[command(about = "Evaluate whether a user may create objects of a type")]
    CanCreate {
        #[arg(help = "Identity-provider subject")]
        user: String,
        #[arg(help = "Object type, e.g. forecasts")]
        object_type: String,
    },

    #[command(about = "List the object ids of a type the user may read")]
    ListRead {
        #[arg(help = "Identity-provider subject")]
        user: String,
        #[arg(help = "Object type, e.g. forecasts")]
        object_type: String,
    },

    #[command(about = "Mint a development JWT for a subject (requires JWT_SECRET)")]
    Token {
        #[arg(help = "Identity-provider subject to embed as the token subject")]
        sub: String,
    },

    #[command(about = "Ping a running service over HTTP")]
    Health {
        #[arg(long, default_value = "http://127.0.0.1:3000", help = "Service base URL")]
        url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Check {
            user,
            object_id,
            action,
        } => commands::check::check(user, object_id, action, output_format).await,
        Commands::CanCreate { user, object_type } => {
            commands::check::can_create(user, object_type, output_format).await
        }
        Commands::ListRead { user, object_type } => {
            commands::check::list_read(user, object_type, output_format).await
        }
        Commands::Token { sub } => commands::token::handle(sub, output_format),
        Commands::Health { url } => commands::health::handle(url, output_format).await,
    }
}
