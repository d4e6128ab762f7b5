use std::fmt;
use std::str::FromStr;

use crate::error::{JournalError, Result};

macro_rules! define_identifier {
    ($name:ident, $kind:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub const KIND: &'static str = $kind;

            /// Accepts any value that is not empty or whitespace-only. The
            /// text is kept as given; the contract receives it verbatim.
            pub fn parse(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(JournalError::InvalidIdentifier {
                        kind: Self::KIND,
                        value,
                    });
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = JournalError;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_identifier!(UserId, "user id");
define_identifier!(JournalId, "journal id");
define_identifier!(EntryId, "entry id");
define_identifier!(PeerId, "peer id");
