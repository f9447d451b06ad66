use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use recipe_api::auth::JwtAuthority;
use recipe_api::config::AppConfig;
use recipe_api::database::MemoryRecipeStore;
use recipe_api::types::UserId;
use recipe_api::{app, AppState};
use reqwest::StatusCode;
use serde_json::Value;

pub const SECRET: &str = "integration-test-secret";
pub const RECIPES: &str = "/api/recipe/recipes/";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    jwt: JwtAuthority,
}

impl TestServer {
    /// Start a fresh server with its own empty in-memory store on a free port.
    /// The server task lives as long as the test's runtime.
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;
        let jwt = JwtAuthority::new(SECRET, 1);
        let state = AppState::new(Arc::new(MemoryRecipeStore::new()), jwt.clone());
        let router = app(state, &config);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("test server");
        });

        let server = Self {
            base_url,
            client: reqwest::Client::new(),
            jwt,
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
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

    pub fn recipe_url(&self, id: i64) -> String {
        self.url(&format!("{}{}/", RECIPES, id))
    }

    pub fn token_for(&self, user: i64) -> String {
        self.jwt.issue(UserId(user), None).expect("issue token")
    }

    /// Create a recipe for `user` with the standard sample fields, overridden by `fields`
    pub async fn create_recipe(&self, user: i64, fields: Value) -> Result<Value> {
        let mut payload = serde_json::json!({
            "title": "Sample recipe title",
            "time_minutes": 22,
            "price": "5.25",
            "description": "Sample recipe description",
            "link": "https://example.com/recipe.pdf",
        });
        if let (Some(base), Value::Object(extra)) = (payload.as_object_mut(), fields) {
            base.extend(extra);
        }

        let res = self
            .client
            .post(self.url(RECIPES))
            .bearer_auth(self.token_for(user))
            .json(&payload)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn list(&self, user: i64) -> Result<Vec<Value>> {
        let res = self
            .client
            .get(self.url(RECIPES))
            .bearer_auth(self.token_for(user))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "list failed: {}", res.status());
        Ok(res.json().await?)
    }
}
