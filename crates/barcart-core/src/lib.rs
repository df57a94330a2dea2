//! barcart core: client library for the barcart cocktail service.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use barcart_core::{ApiClient, Config};
//!
//! let config = Config::load()?;
//! let api = ApiClient::from_config(&config, config.token_provider()?)?;
//! for drink in api.fetch_most_liked_drinks_with_details().await?.into_iter().flatten() {
//!     println!("{:?} ({:?} likes)", drink.name(), drink.like_count());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError, CocktailDbClient, DrinkDetailSource};
pub use auth::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenProvider};
pub use config::{Config, TokenStoreKind};
