use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recipe_api::config;
use recipe_api::database::models::User;
use recipe_api::AppState;

#[derive(Debug, Parser)]
#[command(name = "recipe-api", version, about = "Ownership-scoped recipe CRUD service")]
struct Args {
    /// Port to listen on (overrides RECIPES_API_PORT / PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Create a user at startup and log its token; repeatable
    #[arg(long = "seed-user", value_name = "EMAIL[:PASSWORD]")]
    seed_users: Vec<SeedUser>,
}

/// `--seed-user` value. Without a password the account gets a random one,
/// since requests only ever authenticate with the issued token.
#[derive(Debug, Clone, PartialEq)]
struct SeedUser {
    email: String,
    password: Option<String>,
}

impl SeedUser {
    fn into_user(self) -> User {
        let password = self
            .password
            .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
        User::new(self.email, &password)
    }
}

impl FromStr for SeedUser {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (email, password) = match value.split_once(':') {
            Some((email, password)) => (email, Some(password)),
            None => (value, None),
        };

        let email = email.trim();
        if email.is_empty() {
            return Err("email must not be empty".to_string());
        }
        if password.is_some_and(str::is_empty) {
            return Err("password after ':' must not be empty".to_string());
        }

        Ok(Self {
            email: email.to_string(),
            password: password.map(str::to_string),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("recipe_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let config = config::config().clone();
    info!("Starting Recipe API in {:?} mode", config.environment);

    let port = args.port.unwrap_or(config.api.port);
    let state = AppState::from_config(config)
        .await
        .context("failed to initialise recipe store")?;

    for seed in args.seed_users {
        let email = seed.email.clone();
        let user = state
            .users
            .insert(seed.into_user())
            .await
            .with_context(|| format!("failed to seed user {email}"))?;
        info!("Seeded user {} with token {}", user.email, user.token);
    }

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    info!("Recipe API listening on http://{}", bind_addr);

    axum::serve(listener, recipe_api::app(state))
        .await
        .context("server error")?;
    Ok(())
}
