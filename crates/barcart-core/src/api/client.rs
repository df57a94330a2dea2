//! API client for the barcart service.
//!
//! Each public method is one request/response exchange. Authenticated
//! calls read the bearer token from the injected `TokenProvider` right
//! before sending; nothing else is shared between calls.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::auth::TokenProvider;
use crate::config::Config;
use crate::models::{
    sort_by_like_count, Credentials, DetailedDrink, Drink, FavouriteRequest, UserProfile,
};

use super::detail::{CocktailDbClient, DrinkDetailSource};
use super::error::extract_message;
use super::ApiError;

/// API client for the barcart service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
    details: Arc<dyn DrinkDetailSource>,
}

impl ApiClient {
    /// Create a client for `base_url` that looks up drink details with `details`.
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenProvider>,
        details: Arc<dyn DrinkDetailSource>,
    ) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_http_client(client, base_url, tokens, details))
    }

    /// Create a client from configuration, using TheCocktailDB for details.
    /// Both share one connection pool.
    pub fn from_config(config: &Config, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        let details = Arc::new(CocktailDbClient::new(client.clone(), &config.detail_base_url));
        Ok(Self::with_http_client(client, &config.base_url, tokens, details))
    }

    pub fn with_http_client(
        client: Client,
        base_url: &str,
        tokens: Arc<dyn TokenProvider>,
        details: Arc<dyn DrinkDetailSource>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
            details,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenProvider> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn require_token(&self) -> Result<String, ApiError> {
        self.tokens.get().ok_or(ApiError::NotAuthenticated)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Parse a response body. An empty body reads as JSON `null`.
    fn parse_payload<T: DeserializeOwned>(body: &str) -> Result<T> {
        let parsed = if body.trim().is_empty() {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_str(body)
        };
        parsed.map_err(|e| ApiError::InvalidResponse(e.to_string()).into())
    }

    async fn execute<T: DeserializeOwned>(request: RequestBuilder, url: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(ApiError::NetworkError)
            .with_context(|| format!("Failed to send request to {}", url))?;

        let response = Self::check_response(response).await?;

        let body = response
            .text()
            .await
            .map_err(ApiError::NetworkError)
            .with_context(|| format!("Failed to read response body from {}", url))?;

        Self::parse_payload(&body)
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let url = self.url(path);
        let mut request = self.client.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::execute(request, &url).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let request = self
            .client
            .request(Method::PUT, &url)
            .bearer_auth(token)
            .json(body);
        Self::execute(request, &url).await
    }

    // ===== Drinks =====

    /// Fetch the liked-drinks listing, most liked first, each merged with its
    /// detail record. A slot is `None` when that drink's lookup failed.
    pub async fn fetch_most_liked_drinks_with_details(&self) -> Result<Vec<Option<DetailedDrink>>> {
        let mut drinks: Vec<Drink> = self
            .get("/most-liked-drinks", None)
            .await
            .inspect_err(|e| {
                let reason = format!("{:#}", e);
                error!(error = %reason, "Error fetching most-liked drinks with details")
            })?;

        sort_by_like_count(&mut drinks);
        debug!(count = drinks.len(), "Fetching drink details");

        let detail_futures: Vec<_> = drinks.iter().map(|drink| self.detailed(drink)).collect();
        Ok(futures::future::join_all(detail_futures).await)
    }

    async fn detailed(&self, drink: &Drink) -> Option<DetailedDrink> {
        match self.details.drink_details(&drink.id).await {
            Ok(details) => Some(drink.with_details(details)),
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!(drink_id = %drink.id, error = %reason, "Error fetching details for drink");
                None
            }
        }
    }

    /// Fetch every cocktail. An empty or `null` body yields an empty array;
    /// any other payload is returned as the server sent it.
    pub async fn get_all_cocktails(&self) -> Result<Value> {
        let cocktails: Value = self
            .get("/cocktails", None)
            .await
            .inspect_err(|e| {
                let reason = format!("{:#}", e);
                error!(error = %reason, "Error retrieving cocktails")
            })?;
        Ok(match cocktails {
            Value::Null => Value::Array(Vec::new()),
            payload => payload,
        })
    }

    // ===== Account =====

    /// Create an account. Refused locally when a token is already present.
    ///
    /// Any failure after that point surfaces as `ApiError::Registration`
    /// carrying the server's `message`, when it sent one.
    pub async fn register(&self, username: &str, password: &str) -> Result<UserProfile> {
        if self.tokens.is_authenticated() {
            return Err(ApiError::AlreadyAuthenticated.into());
        }

        let url = self.url("/register");
        let credentials = Credentials::new(username, password);

        let response = match self.client.post(&url).json(&credentials).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Registration request failed");
                return Err(ApiError::Registration { message: None }.into());
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            let message = extract_message(&body);
            debug!(status = status.as_u16(), message = ?message, "Registration rejected");
            return Err(ApiError::Registration { message }.into());
        }

        Self::parse_payload(&body).context("Failed to parse registration response")
    }

    /// Fetch the signed-in user's profile.
    pub async fn get_user(&self) -> Result<UserProfile> {
        let token = self.require_token()?;
        self.get("/user-profile", Some(token.as_str()))
            .await
            .inspect_err(|e| {
                let reason = format!("{:#}", e);
                error!(error = %reason, "Error retrieving user profile")
            })
    }

    /// Add a favourite drink.
    ///
    /// Request failures are logged and reported as `Ok(None)`; only the
    /// missing-token precondition is returned as an error. `remove_favourite`
    /// does propagate its failures.
    pub async fn add_favourite(&self, fave_id: &str) -> Result<Option<UserProfile>> {
        let token = self.require_token()?;
        let body = FavouriteRequest { fave_id };

        match self.put("/add-fave", &token, &body).await {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!(fave_id, error = %reason, "Error saving favourite");
                Ok(None)
            }
        }
    }

    /// Remove a favourite drink, returning the updated user.
    pub async fn remove_favourite(&self, fave_id: &str) -> Result<UserProfile> {
        let token = self.require_token()?;
        let body = FavouriteRequest { fave_id };

        self.put("/remove-fave", &token, &body)
            .await
            .inspect_err(|e| {
                let reason = format!("{:#}", e);
                error!(fave_id, error = %reason, "Error removing favourite")
            })
    }
}
