use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::domain::Identity;
use crate::error::{JournalError, Result};

const ID_EXTENSION: &str = "id";

/// File-system wallet: one `<label>.id` JSON file per identity.
#[derive(Debug, Clone)]
pub struct Wallet {
    path: PathBuf,
}

impl Wallet {
    /// Opens the wallet at `path`, creating an empty one if it is missing.
    /// Existing entries are never touched.
    pub fn open_or_create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        std::fs::create_dir_all(&path).map_err(|e| JournalError::storage(&path, e))?;
        std::fs::read_dir(&path).map_err(|e| JournalError::storage(&path, e))?;
        tracing::debug!(wallet = %path.display(), "opened wallet");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> Result<Vec<String>> {
        let entries =
            std::fs::read_dir(&self.path).map_err(|e| JournalError::storage(&self.path, e))?;

        let mut labels = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| JournalError::storage(&self.path, e))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ID_EXTENSION) {
                continue;
            }
            if let Some(label) = path.file_stem().and_then(|stem| stem.to_str()) {
                labels.push(label.to_string());
            }
        }
        labels.sort();
        Ok(labels)
    }

    pub fn get(&self, label: &str) -> Result<Option<Identity>> {
        let path = self.entry_path(label)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(JournalError::storage(path, e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| JournalError::storage(&path, std::io::Error::new(ErrorKind::InvalidData, e)))
    }

    /// Stores a new identity. An existing label is an error, not an update.
    pub fn put(&self, label: &str, identity: &Identity) -> Result<()> {
        let path = self.entry_path(label)?;
        let json = serde_json::to_string(identity)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == ErrorKind::AlreadyExists {
                    JournalError::IdentityExists(label.to_string())
                } else {
                    JournalError::storage(&path, e)
                }
            })?;
        file.write_all(json.as_bytes())
            .map_err(|e| JournalError::storage(&path, e))?;

        tracing::info!(label, wallet = %self.path.display(), "stored identity");
        Ok(())
    }

    fn entry_path(&self, label: &str) -> Result<PathBuf> {
        if label.trim().is_empty() || label.contains(['/', '\\']) || label.starts_with('.') {
            return Err(JournalError::InvalidIdentifier {
                kind: "identity label",
                value: label.to_string(),
            });
        }
        Ok(self.path.join(format!("{label}.{ID_EXTENSION}")))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn creates_missing_wallet_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet/org1");

        let wallet = Wallet::open_or_create(&path).unwrap();
        assert!(path.is_dir());
        assert!(wallet.list().unwrap().is_empty());
    }

    #[test]
    fn reopening_sees_the_same_identities() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet/org1");
        let identity = Identity::x509("Org1MSP", "CERT", "KEY");

        Wallet::open_or_create(&path)
            .unwrap()
            .put("appUser", &identity)
            .unwrap();

        let reopened = Wallet::open_or_create(&path).unwrap();
        assert_eq!(reopened.list().unwrap(), vec!["appUser"]);
        assert_eq!(reopened.get("appUser").unwrap(), Some(identity));
        assert_eq!(reopened.get("admin").unwrap(), None);
    }

    #[test]
    fn never_overwrites_an_existing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = Wallet::open_or_create(dir.path()).unwrap();
        let original = Identity::x509("Org1MSP", "CERT-1", "KEY-1");

        wallet.put("appUser", &original).unwrap();
        let err = wallet
            .put("appUser", &Identity::x509("Org1MSP", "CERT-2", "KEY-2"))
            .unwrap_err();

        assert!(matches!(err, JournalError::IdentityExists(label) if label == "appUser"));
        assert_eq!(wallet.get("appUser").unwrap(), Some(original));
    }

    #[test]
    fn ignores_files_that_are_not_identities() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let wallet = Wallet::open_or_create(dir.path()).unwrap();
        assert!(wallet.list().unwrap().is_empty());
    }

    #[test]
    fn rejects_labels_that_escape_the_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = Wallet::open_or_create(dir.path()).unwrap();
        assert!(wallet.get("../admin").is_err());
        assert!(wallet.get("").is_err());
    }

    #[test]
    fn corrupt_entry_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = Wallet::open_or_create(dir.path()).unwrap();
        std::fs::write(dir.path().join("appUser.id"), "{ truncated").unwrap();

        let err = wallet.get("appUser").unwrap_err();
        match &err {
            JournalError::Storage { path, .. } => assert!(path.ends_with("appUser.id")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.kind(), "StorageError");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unusable_path_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let err = Wallet::open_or_create(&file).unwrap_err();
        assert!(matches!(err, JournalError::Storage { .. }));
    }
}
