use clap::Parser;

use arbiter_authz::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The check subcommands read DATABASE_URL, token reads JWT_SECRET
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = arbiter_authz::cli::run(cli).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
