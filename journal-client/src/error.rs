use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("{0}")]
    Usage(String),

    #[error("Unknown organization {name:?}: Org must be {}", .known.join(" or "))]
    UnknownOrganization { name: String, known: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid {kind}: {value:?} must not be empty")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("Wallet storage error at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Identity already exists in wallet: {0}")]
    IdentityExists(String),

    #[error("Identity {label} not found in wallet {}", .wallet.display())]
    IdentityNotFound { label: String, wallet: PathBuf },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Gateway returned {status}: {message}")]
    Gateway { status: u16, message: String },

    #[error("Transaction {transaction_id} was not committed: {status}")]
    Commit {
        transaction_id: String,
        status: String,
    },

    #[error("{transaction} failed: {cause}")]
    Invocation {
        transaction: String,
        #[source]
        cause: Box<JournalError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl JournalError {
    /// One code per taxonomy kind: configuration 1, storage 2, connection 3,
    /// invocation 4.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_)
            | Self::UnknownOrganization { .. }
            | Self::Config(_)
            | Self::InvalidIdentifier { .. }
            | Self::Yaml(_) => 1,
            Self::Storage { .. }
            | Self::IdentityExists(_)
            | Self::Io(_)
            | Self::Serialization(_) => 2,
            Self::IdentityNotFound { .. } | Self::Connection(_) | Self::Http(_) => 3,
            Self::Invocation { .. } | Self::Gateway { .. } | Self::Commit { .. } => 4,
        }
    }

    /// Taxonomy name shown in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Usage(_)
            | Self::UnknownOrganization { .. }
            | Self::Config(_)
            | Self::InvalidIdentifier { .. }
            | Self::Yaml(_) => "ConfigurationError",
            Self::Storage { .. }
            | Self::IdentityExists(_)
            | Self::Io(_)
            | Self::Serialization(_) => "StorageError",
            Self::IdentityNotFound { .. } | Self::Connection(_) | Self::Http(_) => {
                "ConnectionError"
            }
            Self::Invocation { .. } | Self::Gateway { .. } | Self::Commit { .. } => {
                "InvocationError"
            }
        }
    }

    /// Errors that are answered with usage guidance rather than a failure line.
    pub const fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::Usage(_) | Self::UnknownOrganization { .. } | Self::InvalidIdentifier { .. }
        )
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_organization_lists_known_names() {
        let err = JournalError::UnknownOrganization {
            name: "Org3".to_string(),
            known: vec!["Org1".to_string(), "Org2".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown organization \"Org3\": Org must be Org1 or Org2"
        );
        assert_eq!(err.exit_code(), 1);
        assert!(err.is_usage());
    }

    #[test]
    fn invocation_wraps_cause_and_exits_non_zero() {
        let err = JournalError::Invocation {
            transaction: "ReadJournal".to_string(),
            cause: Box::new(JournalError::Gateway {
                status: 500,
                message: "There are no journals searching for journalID J1".to_string(),
            }),
        };
        assert_eq!(err.kind(), "InvocationError");
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().starts_with("ReadJournal failed: Gateway returned 500"));
    }

    #[test]
    fn every_error_falls_into_one_of_four_kinds() {
        let errors = [
            JournalError::Usage("usage".to_string()),
            JournalError::Config("bad profile".to_string()),
            JournalError::Io(std::io::Error::other("disk")),
            JournalError::IdentityExists("appUser".to_string()),
            JournalError::Connection("refused".to_string()),
            JournalError::Commit {
                transaction_id: "abc".to_string(),
                status: "MVCC_READ_CONFLICT".to_string(),
            },
        ];
        let kinds: Vec<_> = errors.iter().map(|e| (e.kind(), e.exit_code())).collect();
        assert_eq!(
            kinds,
            vec![
                ("ConfigurationError", 1),
                ("ConfigurationError", 1),
                ("StorageError", 2),
                ("StorageError", 2),
                ("ConnectionError", 3),
                ("InvocationError", 4),
            ]
        );
    }
}
