use anyhow::{Context, Result};
use keyring::Entry;
use tracing::debug;

use super::TokenProvider;

const SERVICE_NAME: &str = "barcart";

const ACCOUNT_NAME: &str = "token";

/// Keeps the bearer token in the OS keychain.
///
/// Holds one `Entry` for its lifetime so every read and write goes
/// through the same credential.
pub struct KeyringTokenStore {
    entry: Entry,
}

impl KeyringTokenStore {
    pub fn new() -> Result<Self> {
        Self::for_account(ACCOUNT_NAME)
    }

    /// Use a different keychain account, e.g. one per server.
    pub fn for_account(account: &str) -> Result<Self> {
        let entry = Entry::new(SERVICE_NAME, account).context("Failed to create keyring entry")?;
        Ok(Self { entry })
    }
}

impl TokenProvider for KeyringTokenStore {
    fn get(&self) -> Option<String> {
        match self.entry.get_password() {
            Ok(token) => Some(token),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                debug!(error = %e, "Failed to read token from keychain");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        self.entry
            .set_password(token)
            .context("Failed to store token in keychain")
    }

    fn clear(&self) -> Result<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}
