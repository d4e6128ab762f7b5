use tracing::Instrument;

use crate::domain::{TransactionKind, TransactionRequest, TransactionResult};
use crate::error::{JournalError, Result};
use crate::ports::GatewayConnection;

/// A named contract on a channel, borrowed from a live session.
pub struct ContractHandle<'a, C: GatewayConnection> {
    connection: &'a C,
    channel: String,
    contract: String,
}

impl<'a, C: GatewayConnection> ContractHandle<'a, C> {
    pub(crate) fn new(connection: &'a C, channel: &str, contract: &str) -> Self {
        Self {
            connection,
            channel: channel.to_string(),
            contract: contract.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.contract
    }

    pub async fn evaluate(&self, transaction: &str, args: &[&str]) -> Result<TransactionResult> {
        let request = self.request(TransactionRequest::query(&self.contract, transaction), args);
        self.invoke(&request).await
    }

    /// The returned payload is the transaction function's own return value,
    /// not a fresh read of ledger state.
    pub async fn submit(&self, transaction: &str, args: &[&str]) -> Result<TransactionResult> {
        let request = self.request(TransactionRequest::submit(&self.contract, transaction), args);
        self.invoke(&request).await
    }

    /// Runs a planned request against this contract. No retries: a failed
    /// submission may or may not have been ordered.
    pub async fn invoke(&self, request: &TransactionRequest) -> Result<TransactionResult> {
        let span = tracing::info_span!(
            "transaction",
            channel = %self.channel,
            contract = %self.contract,
            transaction = %request.transaction,
            kind = ?request.kind,
        );

        let outcome = async {
            tracing::debug!(args = ?request.arguments, "invoking");
            match request.kind {
                TransactionKind::Query => self.connection.evaluate(&self.channel, request).await,
                TransactionKind::Submit => self.connection.submit(&self.channel, request).await,
            }
        }
        .instrument(span)
        .await;

        outcome
            .map(TransactionResult::from)
            .map_err(|cause| JournalError::Invocation {
                transaction: request.transaction.clone(),
                cause: Box::new(cause),
            })
    }

    fn request(&self, base: TransactionRequest, args: &[&str]) -> TransactionRequest {
        debug_assert_eq!(base.contract, self.contract);
        args.iter().fold(base, |req, arg| req.with_arg(*arg))
    }
}
