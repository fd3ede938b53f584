//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and inspecting the cookies a response sets. The session cookies are
//! marked `Secure`, which an HTTP client's automatic cookie jar will
//! not replay over the plain-HTTP test server, so the helpers read
//! `Set-Cookie` headers explicitly and tests attach them by hand.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{
    header::{COOKIE, SET_COOKIE},
    Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use volta_api::{create_app, create_app_state};
use volta_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, JwtConfig, RateLimitConfig,
    ServerConfig,
};

const TEST_PRIVATE_KEY: &str = include_str!("../testdata/rsa_private.pem");
const TEST_PUBLIC_KEY: &str = include_str!("../testdata/rsa_public.pem");

/// Header carrying a raw API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state);

        // Bind to an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Create HTTP client
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Start a request with full control over method and headers
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url(), path);
        self.client.request(method, url)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path).json(body).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .request(Method::GET, path)
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(Method::POST, path)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(Method::PATCH, path)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(Method::PUT, path)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .request(Method::DELETE, path)
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a GET request carrying a Cookie header
    pub async fn get_with_cookies(&self, path: &str, cookies: &str) -> Result<Response> {
        Ok(self
            .request(Method::GET, path)
            .header(COOKIE, cookies)
            .send()
            .await?)
    }

    /// Make a POST request carrying a Cookie header
    pub async fn post_with_cookies(&self, path: &str, cookies: &str) -> Result<Response> {
        Ok(self
            .request(Method::POST, path)
            .header(COOKIE, cookies)
            .send()
            .await?)
    }

    /// Make a PUT request authenticated by API key
    pub async fn put_with_key<T: Serialize>(
        &self,
        path: &str,
        api_key: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(Method::PUT, path)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request authenticated by API key
    pub async fn delete_with_key(&self, path: &str, api_key: &str) -> Result<Response> {
        Ok(self
            .request(Method::DELETE, path)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?)
    }
}

/// Create a test configuration
///
/// The database URL comes from the environment; signing keys are a
/// fixed test pair. The rate limit is opened wide so test traffic is
/// never throttled.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set for integration tests"))?;

    Ok(AppConfig {
        app: AppSettings {
            name: "volta-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
        },
        jwt: JwtConfig {
            private_key: TEST_PRIVATE_KEY.to_string(),
            public_key: TEST_PUBLIC_KEY.to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604_800,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1_000,
            burst: 1_000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
    })
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Raw Set-Cookie header lines from a response
pub fn set_cookie_lines(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(String::from)
        .collect()
}

/// Cookie name to value pairs set by a response
pub fn cookie_values(response: &Response) -> HashMap<String, String> {
    set_cookie_lines(response)
        .iter()
        .filter_map(|line| {
            let pair = line.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            Some((name.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Build a Cookie request header from name/value pairs
pub fn cookie_header(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
