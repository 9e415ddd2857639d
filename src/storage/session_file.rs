use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SESSION_PATH: &str = "data/session.json";

/// Persisted identity, enough to restore the session straight to
/// Authenticated on the next start. Absence means start Anonymous.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredIdentity {
    pub user_id: String,
    pub user_name: String,
}

pub fn load(path: &str) -> Option<StoredIdentity> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(identity) => Some(identity),
            Err(err) => {
                log::warn!("Failed to parse session file {path}: {err}");
                None
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            log::warn!("Failed to read session file {path}: {err}");
            None
        }
    }
}

pub fn store(path: &str, identity: &StoredIdentity) -> io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let payload = serde_json::to_string_pretty(identity)?;
    fs::write(path, payload)
}
