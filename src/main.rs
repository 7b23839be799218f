use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foodtrack::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foodtrack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Cli::parse();

    let result = match args.command {
        Commands::Init => cli::commands::init().await,
        Commands::Login { email } => cli::commands::login(email).await,
        Commands::Register => cli::commands::register().await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Whoami => cli::commands::whoami().await,
        Commands::Dashboard => cli::commands::dashboard().await,
        Commands::Foods { action } => cli::commands::foods(action).await,
        Commands::Meals { action } => cli::commands::meals(action).await,
        Commands::Profile { action } => cli::commands::profile(action).await,
        Commands::Admin { action } => cli::commands::admin(action).await,
    };

    // Every failure surfaces as one error line, never a panic
    if let Err(e) = result {
        cli::error(&e.to_string());
        std::process::exit(1);
    }
}
