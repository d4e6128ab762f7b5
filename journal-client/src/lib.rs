//! # journal-client
//!
//! Organization-scoped access to the journal ledger contract: resolve an
//! organization to its connection profile and wallet, open one gateway
//! session, run the contract's transactions, release the session.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use journal_client::adapters::HttpGateway;
//! use journal_client::config::Config;
//! use journal_client::domain::{Invocation, JournalId, Operation, UserId};
//! use journal_client::services::{JournalWorkflow, ProfileResolver, WorkflowSettings};
//!
//! # async fn example() -> journal_client::Result<()> {
//! let config = Config::load(None)?;
//! let workflow = JournalWorkflow::new(
//!     Arc::new(HttpGateway::new(&config.gateway)?),
//!     ProfileResolver::new(config.organizations.clone(), std::env::current_dir()?),
//!     WorkflowSettings::from(&config),
//! );
//!
//! let outcome = workflow
//!     .run(&Invocation {
//!         organization: "org1".to_string(),
//!         user: UserId::parse("appUser")?,
//!         operation: Operation::ReadJournal {
//!             journal: JournalId::parse("J1")?,
//!         },
//!     })
//!     .await?;
//! if let Some(result) = outcome.result() {
//!     println!("{}", result.pretty());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{JournalError, Result};
