use std::fmt;
use std::str::FromStr;

use super::{EntryId, JournalId, PeerId, TransactionRequest, UserId};

/// Access a client may request on somebody else's journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Read,
    Write,
    ReadWrite,
}

impl AccessLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::Write => "w",
            Self::ReadWrite => "rw",
        }
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "r" | "read" => Ok(Self::Read),
            "w" | "write" => Ok(Self::Write),
            "rw" | "read-write" | "readwrite" => Ok(Self::ReadWrite),
            _ => Err(format!("Unknown access level: {s} (expected r, w or rw)")),
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAnswer {
    Approve,
    Decline,
}

impl RequestAnswer {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Decline => "decline",
        }
    }
}

impl FromStr for RequestAnswer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" | "yes" => Ok(Self::Approve),
            "decline" | "no" => Ok(Self::Decline),
            _ => Err(format!("Unknown answer: {s} (expected approve or decline)")),
        }
    }
}

impl fmt::Display for RequestAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one invocation asks of the journal contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ReadJournal {
        journal: JournalId,
    },
    CreateJournal {
        journal: JournalId,
    },
    AddEntry {
        journal: JournalId,
        entry: EntryId,
        data: String,
    },
    GetEntry {
        journal: JournalId,
        entry: EntryId,
    },
    RequestAccess {
        journal: JournalId,
        access: AccessLevel,
    },
    AccessRequests {
        journal: JournalId,
    },
    AnswerRequest {
        journal: JournalId,
        peer: PeerId,
        answer: RequestAnswer,
    },
}

impl Operation {
    /// Transactions to run, in order. Writes that have a natural read-back
    /// are followed by an evaluate so the printed result reflects the ledger.
    pub fn plan(&self, contract: &str) -> Vec<TransactionRequest> {
        match self {
            Self::ReadJournal { journal } => {
                vec![TransactionRequest::query(contract, "ReadJournal").with_arg(journal.as_str())]
            }
            Self::CreateJournal { journal } => vec![
                TransactionRequest::submit(contract, "CreateJournal").with_arg(journal.as_str()),
                TransactionRequest::query(contract, "ReadJournal").with_arg(journal.as_str()),
            ],
            Self::AddEntry {
                journal,
                entry,
                data,
            } => vec![
                TransactionRequest::submit(contract, "AddEntry")
                    .with_arg(journal.as_str())
                    .with_arg(entry.as_str())
                    .with_arg(data.as_str()),
                TransactionRequest::query(contract, "GetEntry")
                    .with_arg(journal.as_str())
                    .with_arg(entry.as_str()),
            ],
            Self::GetEntry { journal, entry } => vec![
                TransactionRequest::query(contract, "GetEntry")
                    .with_arg(journal.as_str())
                    .with_arg(entry.as_str()),
            ],
            Self::RequestAccess { journal, access } => vec![
                TransactionRequest::submit(contract, "RequestAccess")
                    .with_arg(journal.as_str())
                    .with_arg(access.as_str()),
            ],
            Self::AccessRequests { journal } => vec![
                TransactionRequest::query(contract, "GetAccessRequests").with_arg(journal.as_str()),
            ],
            Self::AnswerRequest {
                journal,
                peer,
                answer,
            } => vec![
                TransactionRequest::submit(contract, "AnswerAccessRequest")
                    .with_arg(journal.as_str())
                    .with_arg(peer.as_str())
                    .with_arg(answer.as_str()),
            ],
        }
    }

    pub const fn journal(&self) -> &JournalId {
        match self {
            Self::ReadJournal { journal }
            | Self::CreateJournal { journal }
            | Self::AddEntry { journal, .. }
            | Self::GetEntry { journal, .. }
            | Self::RequestAccess { journal, .. }
            | Self::AccessRequests { journal }
            | Self::AnswerRequest { journal, .. } => journal,
        }
    }

    pub fn has_submit(&self, contract: &str) -> bool {
        self.plan(contract).iter().any(|r| !r.is_query())
    }
}

/// A fully validated request from the CLI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub organization: String,
    pub user: UserId,
    pub operation: Operation,
}
