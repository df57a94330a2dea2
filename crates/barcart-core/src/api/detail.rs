//! Drink detail lookups against TheCocktailDB.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::models::DrinkDetails;

use super::ApiError;

/// Anything that can resolve a drink id to its detail record.
///
/// Used as `Arc<dyn DrinkDetailSource>` so tests and embedders can swap
/// the lookup backend without touching the client.
#[async_trait]
pub trait DrinkDetailSource: Send + Sync {
    async fn drink_details(&self, id: &str) -> Result<DrinkDetails>;
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    drinks: Option<Vec<DrinkDetails>>,
}

/// Client for the TheCocktailDB `lookup.php` endpoint.
#[derive(Clone)]
pub struct CocktailDbClient {
    client: Client,
    base_url: String,
}

impl CocktailDbClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Pick the record out of a lookup body. `{"drinks": null}` means unknown id.
    fn first_drink(id: &str, body: &str) -> Result<DrinkDetails> {
        let parsed: LookupResponse = serde_json::from_str(body)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
            .context("Failed to parse drink lookup response")?;

        parsed
            .drinks
            .and_then(|drinks| drinks.into_iter().next())
            .ok_or_else(|| ApiError::NotFound(format!("drink {}", id)).into())
    }
}

#[async_trait]
impl DrinkDetailSource for CocktailDbClient {
    async fn drink_details(&self, id: &str) -> Result<DrinkDetails> {
        let url = format!("{}/lookup.php", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("i", id)])
            .send()
            .await
            .map_err(ApiError::NetworkError)
            .with_context(|| format!("Failed to look up drink {}", id))?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::NetworkError)?;
        if !status.is_success() {
            return Err(ApiError::from_status(status, &body).into());
        }

        Self::first_drink(id, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_drink() {
        let body = r#"{"drinks":[{"idDrink":"11007","strDrink":"Margarita","strGlass":"Cocktail glass"}]}"#;
        let details = CocktailDbClient::first_drink("11007", body).expect("lookup should parse");
        assert_eq!(details.get("strDrink").and_then(|v| v.as_str()), Some("Margarita"));
    }

    #[test]
    fn test_null_drinks_is_not_found() {
        let err = CocktailDbClient::first_drink("0", r#"{"drinks":null}"#).unwrap_err();
        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::NotFound(_))));

        let err = CocktailDbClient::first_drink("0", r#"{"drinks":[]}"#).unwrap_err();
        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::NotFound(_))));
    }

    #[test]
    fn test_garbage_body_is_invalid_response() {
        let err = CocktailDbClient::first_drink("1", "<html>").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::InvalidResponse(_))
        ));
    }
}
