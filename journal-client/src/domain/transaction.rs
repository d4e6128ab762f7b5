use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Evaluated on a single peer; never ordered or committed.
    Query,
    /// Endorsed, ordered and committed.
    Submit,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "Evaluate"),
            Self::Submit => write!(f, "Submit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub contract: String,
    pub transaction: String,
    pub kind: TransactionKind,
    pub arguments: Vec<String>,
}

impl TransactionRequest {
    pub fn query(contract: impl Into<String>, transaction: impl Into<String>) -> Self {
        Self::new(contract, transaction, TransactionKind::Query)
    }

    pub fn submit(contract: impl Into<String>, transaction: impl Into<String>) -> Self {
        Self::new(contract, transaction, TransactionKind::Submit)
    }

    fn new(
        contract: impl Into<String>,
        transaction: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            contract: contract.into(),
            transaction: transaction.into(),
            kind,
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    pub const fn is_query(&self) -> bool {
        matches!(self.kind, TransactionKind::Query)
    }
}

/// Raw payload returned by a transaction function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionResult(Vec<u8>);

impl TransactionResult {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.0).ok()
    }

    /// Two-space indented JSON when the payload parses, otherwise the text as
    /// it arrived. A non-JSON payload is a valid result, not an error.
    pub fn pretty(&self) -> String {
        match self.json() {
            Some(value) => serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| self.text().into_owned()),
            None => self.text().into_owned(),
        }
    }
}

// JSON payloads embed as values, anything else as a string.
impl Serialize for TransactionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.json() {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_str(&self.text()),
        }
    }
}

impl From<Vec<u8>> for TransactionResult {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}
