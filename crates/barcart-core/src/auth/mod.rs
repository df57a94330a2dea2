//! Token storage for authenticated requests.
//!
//! The API client never owns the bearer token. It asks a `TokenProvider`
//! on every authenticated call, so the token can live wherever the host
//! application keeps it:
//! - `MemoryTokenStore`: in-process only
//! - `FileTokenStore`: JSON file in the cache directory
//! - `KeyringTokenStore`: OS keychain via keyring
//!
//! Presence of a token means "authenticated". Tokens carry no expiry.

pub mod keychain;
pub mod token;

pub use keychain::KeyringTokenStore;
pub use token::{FileTokenStore, MemoryTokenStore, TokenProvider, TokenRecord};
