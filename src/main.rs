// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use contact_portal::{
    AppState, PortalConfig,
    auth::UserStore,
    db::{create_pool, run_migrations},
    server,
};

#[derive(Parser)]
#[command(name = "contact-portal")]
#[command(about = "Session-authenticated contact form service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server (default)
    Serve {
        /// Address to bind (overrides PORTAL_HOST)
        #[arg(long, env = "PORTAL_HOST")]
        host: Option<String>,

        /// Port to listen on (overrides PORTAL_PORT)
        #[arg(short, long, env = "PORTAL_PORT")]
        port: Option<u16>,
    },

    /// Create a user who can sign in
    CreateUser {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "PORTAL_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = PortalConfig::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    });

    match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await
        }
        Commands::CreateUser { username, password } => {
            create_user(config, &username, &password).await
        }
    }
}

async fn serve(config: PortalConfig) -> Result<()> {
    info!("Starting contact portal");

    let pool = create_pool(&config.database_url, config.sqlite_max_connections).await?;
    run_migrations(&pool).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    let app_state = Arc::new(AppState::new(pool, config));

    server::run(listener, app_state, server::shutdown_signal()).await
}

async fn create_user(config: PortalConfig, username: &str, password: &str) -> Result<()> {
    let pool = create_pool(&config.database_url, config.sqlite_max_connections).await?;
    run_migrations(&pool).await?;

    let users = UserStore::new(pool, config.bcrypt_cost);
    let user = users.create_user(username, password).await?;
    info!("Created user '{}' (id {})", user.username, user.id);
    Ok(())
}
