use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use console::style;
use journal_client::config::Config;
use journal_client::domain::{
    AccessLevel, EntryId, Invocation, JournalId, Operation, PeerId, RequestAnswer, UserId,
};
use journal_client::services::ProfileResolver;
use journal_client::{JournalError, Result};

mod identities;
mod output;
mod transact;

pub const USAGE: &str = "Usage: journal <org> <userId> <journalId> [entryId data]
  org       Org1 or Org2
  3 args    read the journal
  5 args    add an entry, then read it back";

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Read and write journals on the ledger network")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output as JSON")]
    pub json: bool,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "More logging (-v info, -vv debug)")]
    pub verbose: u8,

    #[arg(long, global = true, help = "Config file to use instead of .journal/config.toml")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Channel name override")]
    pub channel: Option<String>,

    #[arg(long, global = true, help = "Contract name override")]
    pub contract: Option<String>,

    #[arg(long, global = true, help = "Use only the peers in the connection profile")]
    pub no_discovery: bool,

    #[arg(
        value_name = "ARGS",
        allow_hyphen_values = true,
        trailing_var_arg = true,
        help = "<org> <userId> <journalId> [entryId data]"
    )]
    pub args: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Organization, user and journal shared by every contract command.
#[derive(Args)]
pub struct Target {
    #[arg(help = "Organization (Org1 or Org2)")]
    org: String,

    #[arg(help = "Wallet label of the calling user")]
    user: UserId,

    #[arg(help = "Journal ID")]
    journal: JournalId,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Read a journal")]
    GetJournal {
        #[command(flatten)]
        target: Target,
    },

    #[command(about = "Add an entry and read it back")]
    AddEntry {
        #[command(flatten)]
        target: Target,

        #[arg(help = "Entry ID")]
        entry: EntryId,

        #[arg(help = "Entry data, passed to the contract as-is")]
        data: String,
    },

    #[command(about = "Read a single entry")]
    GetEntry {
        #[command(flatten)]
        target: Target,

        #[arg(help = "Entry ID")]
        entry: EntryId,
    },

    #[command(about = "Create a journal owned by the user")]
    CreateJournal {
        #[command(flatten)]
        target: Target,
    },

    #[command(about = "Ask the owner for access to a journal")]
    RequestAccess {
        #[command(flatten)]
        target: Target,

        #[arg(help = "Access level: r, w or rw")]
        access: AccessLevel,
    },

    #[command(about = "List pending access requests for a journal")]
    AccessRequests {
        #[command(flatten)]
        target: Target,
    },

    #[command(about = "Approve or decline an access request")]
    AnswerRequest {
        #[command(flatten)]
        target: Target,

        #[arg(help = "Requesting peer")]
        peer: PeerId,

        #[arg(help = "approve or decline")]
        answer: RequestAnswer,
    },

    #[command(about = "List identities in an organization's wallet")]
    Identities {
        #[arg(help = "Organization (Org1 or Org2)")]
        org: String,
    },

    #[command(about = "Store an X.509 identity in an organization's wallet")]
    ImportIdentity {
        #[arg(help = "Organization (Org1 or Org2)")]
        org: String,

        #[arg(help = "Wallet label")]
        label: UserId,

        #[arg(long, help = "PEM certificate file")]
        certificate: PathBuf,

        #[arg(long, help = "PEM private key file")]
        private_key: PathBuf,
    },
}

enum Action {
    Transact(Invocation),
    Identities {
        org: String,
    },
    Import {
        org: String,
        label: UserId,
        certificate: PathBuf,
        private_key: PathBuf,
    },
}

impl Commands {
    fn into_action(self) -> Action {
        let transact = |target: Target, operation| {
            Action::Transact(Invocation {
                organization: target.org,
                user: target.user,
                operation,
            })
        };

        match self {
            Self::GetJournal { target } => {
                let journal = target.journal.clone();
                transact(target, Operation::ReadJournal { journal })
            }
            Self::AddEntry {
                target,
                entry,
                data,
            } => {
                let journal = target.journal.clone();
                transact(
                    target,
                    Operation::AddEntry {
                        journal,
                        entry,
                        data,
                    },
                )
            }
            Self::GetEntry { target, entry } => {
                let journal = target.journal.clone();
                transact(target, Operation::GetEntry { journal, entry })
            }
            Self::CreateJournal { target } => {
                let journal = target.journal.clone();
                transact(target, Operation::CreateJournal { journal })
            }
            Self::RequestAccess { target, access } => {
                let journal = target.journal.clone();
                transact(target, Operation::RequestAccess { journal, access })
            }
            Self::AccessRequests { target } => {
                let journal = target.journal.clone();
                transact(target, Operation::AccessRequests { journal })
            }
            Self::AnswerRequest {
                target,
                peer,
                answer,
            } => {
                let journal = target.journal.clone();
                transact(
                    target,
                    Operation::AnswerRequest {
                        journal,
                        peer,
                        answer,
                    },
                )
            }
            Self::Identities { org } => Action::Identities { org },
            Self::ImportIdentity {
                org,
                label,
                certificate,
                private_key,
            } => Action::Import {
                org,
                label,
                certificate,
                private_key,
            },
        }
    }
}

/// `<org> <userId> <journalId>` reads, `... <entryId> <data>` writes then
/// reads back. Any other shape is a usage error.
fn positional(args: &[String]) -> Result<Invocation> {
    let (org, user, operation) = match args {
        [org, user, journal] => (
            org,
            user,
            Operation::ReadJournal {
                journal: JournalId::parse(journal.as_str())?,
            },
        ),
        [org, user, journal, entry, data] => (
            org,
            user,
            Operation::AddEntry {
                journal: JournalId::parse(journal.as_str())?,
                entry: EntryId::parse(entry.as_str())?,
                data: data.clone(),
            },
        ),
        _ => return Err(JournalError::Usage(USAGE.to_string())),
    };
    tracing::debug!(journal = %operation.journal(), "parsed positional invocation");

    Ok(Invocation {
        organization: org.clone(),
        user: UserId::parse(user.as_str())?,
        operation,
    })
}

pub async fn run(cli: Cli) -> Result<()> {
    let Cli {
        json,
        config,
        channel,
        contract,
        no_discovery,
        args,
        command,
        ..
    } = cli;

    // Arguments are validated before any file or network access.
    let action = match command {
        Some(_) if !args.is_empty() => return Err(JournalError::Usage(USAGE.to_string())),
        Some(command) => command.into_action(),
        None => Action::Transact(positional(&args)?),
    };

    let mut config = Config::load(config.as_deref())?;
    if let Some(channel) = channel {
        config.channel = channel;
    }
    if let Some(contract) = contract {
        config.contract = contract;
    }
    if no_discovery {
        config.discovery.enabled = false;
    }

    let resolver = ProfileResolver::new(config.organizations.clone(), std::env::current_dir()?);

    match action {
        Action::Transact(invocation) => transact::run(&config, resolver, &invocation, json).await,
        Action::Identities { org } => identities::list(&resolver, &org, json),
        Action::Import {
            org,
            label,
            certificate,
            private_key,
        } => identities::import(&resolver, &org, &label, &certificate, &private_key),
    }
}

/// Prints the diagnostic for `err` and returns the process exit code.
pub fn report(err: &JournalError) -> i32 {
    match err {
        JournalError::Usage(usage) => println!("{usage}"),
        _ if err.is_usage() => {
            println!("{USAGE}");
            println!();
            println!("{err}");
        }
        _ => {
            tracing::debug!(kind = err.kind(), error = ?err, "invocation failed");
            eprintln!(
                "{} {err}",
                style("******** FAILED to run the application:").red().bold()
            );
        }
    }
    err.exit_code()
}
