#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use recipe_api::config::AppConfig;
use recipe_api::database::models::{Recipe, RecipeInput, User};
use recipe_api::{app, AppState};

/// A live server on a free port, backed by its own in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub state: AppState,
    pub client: reqwest::Client,
}

impl TestServer {
    async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::in_memory(AppConfig::development());
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        let router = app(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            port,
            base_url,
            state,
            client: reqwest::Client::new(),
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Inserts a user directly, the way an out-of-band sign-up would
    pub async fn seed_user(&self, email: &str) -> Result<User> {
        Ok(self.state.users.insert(User::new(email, "12345")).await?)
    }

    /// Creates a recipe straight through the store, bypassing HTTP
    pub async fn seed_recipe(&self, owner: &User, fields: Value) -> Result<Recipe> {
        let input: RecipeInput = serde_json::from_value(fields)?;
        Ok(self.state.recipes.create(&input, owner.id).await?)
    }
}

pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn().await?;
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

/// A complete, valid recipe payload
pub fn example_params() -> Value {
    json!({
        "ingredient": "13 JavaScript tricks SEI instructors don't want you to know",
        "temperature": "325",
        "time": 4,
        "fuel": "Hickory",
        "directions": "Smoke until tender"
    })
}
