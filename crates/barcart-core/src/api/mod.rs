//! REST API client module for the barcart service.
//!
//! This module provides the `ApiClient` for talking to the barcart server
//! (drinks, registration, profile, favourites) and the `DrinkDetailSource`
//! used to enrich drinks with TheCocktailDB detail records.
//!
//! Authenticated endpoints take a bearer token read from a `TokenProvider`.

pub mod client;
pub mod detail;
pub mod error;

pub use client::ApiClient;
pub use detail::{CocktailDbClient, DrinkDetailSource};
pub use error::{extract_message, ApiError, ServerErrorPayload};
