use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinicnav::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout carries command output, logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinicnav=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Status { format } => cli::commands::status(format).await,
        Commands::Nav { path, format } => cli::commands::nav(&path, format).await,
        Commands::Guard { path } => cli::commands::guard(&path).await,
        Commands::Index => cli::commands::index().await,
        Commands::SelectRole { role } => cli::commands::select_role(role).await,
        Commands::Login {
            category,
            username,
            password,
        } => cli::commands::login(category, username, password).await,
        Commands::Logout => cli::commands::logout().await,
        Commands::LogoutPatient => cli::commands::logout_patient().await,
        Commands::Render { fragment } => cli::commands::render(fragment).await,
    }
}
