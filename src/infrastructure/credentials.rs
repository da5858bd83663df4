use crate::domain::error::{FintrackError, FintrackResult};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

/// Persisted transport-level credential cookie
///
/// The session cookie returned by the backend is the only state that
/// survives process teardown. It is stored as a single line in a file
/// under the user configuration directory and re-hydrated by the next
/// bootstrap probe.
pub struct CredentialStore {
    path: PathBuf,
    cached: RwLock<Option<String>>,
}

impl CredentialStore {
    /// Open a credential store at the given path, loading any existing
    /// cookie
    pub fn open(path: PathBuf) -> FintrackResult<Self> {
        let cached = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| FintrackError::Credential {
                message: format!("Failed to read credential file {}: {}", path.display(), e),
            })?;
            let cookie = content.trim().to_string();
            if cookie.is_empty() {
                None
            } else {
                Some(cookie)
            }
        } else {
            None
        };

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    /// Get the default credential file path
    pub fn default_path() -> FintrackResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| FintrackError::Credential {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("fintrack").join("session"))
    }

    /// Get the stored cookie, if any
    pub fn cookie(&self) -> Option<String> {
        self.cached.read().ok().and_then(|guard| guard.clone())
    }

    /// Persist a new cookie, replacing any existing one
    pub fn store(&self, cookie: String) -> FintrackResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| FintrackError::Credential {
                message: format!("Failed to create credential directory: {}", e),
            })?;
        }

        fs::write(&self.path, &cookie).map_err(|e| FintrackError::Credential {
            message: format!(
                "Failed to write credential file {}: {}",
                self.path.display(),
                e
            ),
        })?;

        if let Ok(mut guard) = self.cached.write() {
            *guard = Some(cookie);
        }

        Ok(())
    }

    /// Remove the stored cookie
    pub fn clear(&self) -> FintrackResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| FintrackError::Credential {
                message: format!(
                    "Failed to remove credential file {}: {}",
                    self.path.display(),
                    e
                ),
            })?;
        }

        if let Ok(mut guard) = self.cached.write() {
            *guard = None;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::open(temp_dir.path().join("session")).unwrap();
        assert!(store.cookie().is_none());
    }

    #[test]
    fn test_store_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session");

        let store = CredentialStore::open(path.clone()).unwrap();
        store.store("sid=abc123".to_string()).unwrap();
        assert_eq!(store.cookie(), Some("sid=abc123".to_string()));

        // A fresh store sees the persisted cookie
        let reloaded = CredentialStore::open(path).unwrap();
        assert_eq!(reloaded.cookie(), Some("sid=abc123".to_string()));
    }

    #[test]
    fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session");

        let store = CredentialStore::open(path.clone()).unwrap();
        store.store("sid=abc123".to_string()).unwrap();
        store.clear().unwrap();

        assert!(store.cookie().is_none());
        assert!(!path.exists());

        // Clearing an already-empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_blank_file_treated_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session");
        fs::write(&path, "\n").unwrap();

        let store = CredentialStore::open(path).unwrap();
        assert!(store.cookie().is_none());
    }
}
