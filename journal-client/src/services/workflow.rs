use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::domain::{Invocation, Operation, TransactionKind, TransactionResult};
use crate::error::Result;
use crate::ports::{ConnectOptions, GatewayConnection, GatewayConnector};
use crate::services::resolver::ProfileResolver;
use crate::services::session::GatewaySession;
use crate::services::wallet::Wallet;

/// Channel, contract and connection settings for a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    pub channel: String,
    pub contract: String,
    pub options: ConnectOptions,
}

impl From<&Config> for WorkflowSettings {
    fn from(config: &Config) -> Self {
        Self {
            channel: config.channel.clone(),
            contract: config.contract.clone(),
            options: ConnectOptions {
                discovery_enabled: config.discovery.enabled,
                discovery_as_localhost: config.discovery.as_localhost,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub transaction: String,
    pub kind: TransactionKind,
    pub result: TransactionResult,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowOutcome {
    pub organization: String,
    pub channel: String,
    pub contract: String,
    pub steps: Vec<StepOutcome>,
    pub completed_at: DateTime<Utc>,
}

impl WorkflowOutcome {
    /// The payload to show: the last step's result.
    pub fn result(&self) -> Option<&TransactionResult> {
        self.steps.last().map(|s| &s.result)
    }
}

/// Resolve, open the wallet, connect, run the operation's transactions in
/// order, disconnect.
pub struct JournalWorkflow<G: GatewayConnector> {
    gateway: Arc<G>,
    resolver: ProfileResolver,
    settings: WorkflowSettings,
}

impl<G: GatewayConnector> JournalWorkflow<G> {
    pub const fn new(gateway: Arc<G>, resolver: ProfileResolver, settings: WorkflowSettings) -> Self {
        Self {
            gateway,
            resolver,
            settings,
        }
    }

    pub async fn run(&self, invocation: &Invocation) -> Result<WorkflowOutcome> {
        let organization = self.resolver.resolve(&invocation.organization)?;
        let profile = self.resolver.load(&organization)?;
        let wallet = Wallet::open_or_create(&organization.wallet_path)?;

        let session = GatewaySession::connect(
            self.gateway.as_ref(),
            &organization,
            &profile,
            &wallet,
            &invocation.user,
            self.settings.options,
        )
        .await?;

        let steps = self.execute(&session, &invocation.operation).await;
        session.disconnect();

        Ok(WorkflowOutcome {
            organization: organization.name,
            channel: self.settings.channel.clone(),
            contract: self.settings.contract.clone(),
            steps: steps?,
            completed_at: Utc::now(),
        })
    }

    async fn execute<C: GatewayConnection>(
        &self,
        session: &GatewaySession<C>,
        operation: &Operation,
    ) -> Result<Vec<StepOutcome>> {
        let contract = session.contract(&self.settings.channel, &self.settings.contract);
        let mut steps = Vec::new();

        for request in operation.plan(contract.name()) {
            let result = contract.invoke(&request).await?;
            if request.kind == TransactionKind::Submit {
                tracing::info!(transaction = %request.transaction, journal = %operation.journal(), "committed");
            }
            steps.push(StepOutcome {
                transaction: request.transaction,
                kind: request.kind,
                result,
            });
        }

        Ok(steps)
    }
}
