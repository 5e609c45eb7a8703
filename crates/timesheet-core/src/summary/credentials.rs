//! API key lookup for the summary service.

use tracing::debug;

const ENV_KEYS: [&str; 2] = ["TIMESHEET_API_KEY", "GEMINI_API_KEY"];
const KEYRING_ENTRY: &str = "gemini_api_key";

/// Environment variables first, then the OS keyring. Blank values count as
/// absent.
pub fn resolve_api_key() -> Option<String> {
    for var in ENV_KEYS {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                return Some(value);
            }
        }
    }

    match keyring_store::get(KEYRING_ENTRY) {
        Ok(value) => value.filter(|v| !v.trim().is_empty()),
        Err(e) => {
            debug!(error = %e, "keyring lookup failed");
            None
        }
    }
}

pub fn store_api_key(key: &str) -> crate::Result<()> {
    keyring_store::set(KEYRING_ENTRY, key.trim())
}

pub fn forget_api_key() -> crate::Result<()> {
    keyring_store::delete(KEYRING_ENTRY)
}

/// Thin wrapper around the OS keyring for credential storage.
mod keyring_store {
    use crate::Result;

    const SERVICE: &str = "timesheet";

    pub fn get(key: &str) -> Result<Option<String>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<()> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<()> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
