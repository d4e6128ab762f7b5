use async_trait::async_trait;

use crate::domain::{ConnectionProfile, SigningIdentity, TransactionRequest};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Ask the network for live endorsing peers instead of relying only on
    /// the static profile.
    pub discovery_enabled: bool,
    /// Rewrite discovered hosts to `localhost`, for clients running outside
    /// the network's container namespace.
    pub discovery_as_localhost: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            discovery_enabled: true,
            discovery_as_localhost: true,
        }
    }
}

#[async_trait]
pub trait GatewayConnector: Send + Sync {
    type Connection: GatewayConnection;

    async fn connect(
        &self,
        profile: &ConnectionProfile,
        signer: &SigningIdentity,
        options: ConnectOptions,
    ) -> Result<Self::Connection>;
}

#[async_trait]
pub trait GatewayConnection: Send + Sync {
    /// Read-only; routed to a single peer.
    async fn evaluate(&self, channel: &str, request: &TransactionRequest) -> Result<Vec<u8>>;

    /// Returns once the network reports the transaction committed.
    async fn submit(&self, channel: &str, request: &TransactionRequest) -> Result<Vec<u8>>;

    /// Releases the connection. Must be idempotent; it also runs from `Drop`.
    fn disconnect(&mut self);
}
