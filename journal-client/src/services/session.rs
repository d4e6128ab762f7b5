use tracing::Instrument;

use crate::domain::{ConnectionProfile, OrganizationProfile, SigningIdentity, UserId};
use crate::error::{JournalError, Result};
use crate::ports::{ConnectOptions, GatewayConnection, GatewayConnector};
use crate::services::invoker::ContractHandle;
use crate::services::wallet::Wallet;

/// One gateway connection for one invocation.
///
/// `disconnect` releases it explicitly; dropping an unreleased session (early
/// return, panic) releases it as well, so a connection is released exactly
/// once on every path.
pub struct GatewaySession<C: GatewayConnection> {
    connection: C,
    organization: String,
    label: String,
    released: bool,
}

impl<C: GatewayConnection> GatewaySession<C> {
    pub async fn connect<G>(
        gateway: &G,
        organization: &OrganizationProfile,
        profile: &ConnectionProfile,
        wallet: &Wallet,
        user: &UserId,
        options: ConnectOptions,
    ) -> Result<Self>
    where
        G: GatewayConnector<Connection = C>,
    {
        let identity = wallet
            .get(user.as_str())?
            .ok_or_else(|| JournalError::IdentityNotFound {
                label: user.to_string(),
                wallet: wallet.path().to_path_buf(),
            })?;

        if identity.msp_id != organization.msp_id {
            tracing::warn!(
                label = %user,
                identity_msp = %identity.msp_id,
                organization_msp = %organization.msp_id,
                "identity belongs to a different MSP than the selected organization"
            );
        }

        let signer = SigningIdentity {
            label: user.to_string(),
            identity,
        };

        let span = tracing::info_span!(
            "connect",
            organization = %organization.name,
            profile = %profile.name,
            discovery = options.discovery_enabled,
        );
        let connection = gateway
            .connect(profile, &signer, options)
            .instrument(span)
            .await
            .map_err(|e| match e {
                JournalError::Connection(_) => e,
                other => JournalError::Connection(other.to_string()),
            })?;

        tracing::info!(organization = %organization.name, label = %user, "connected to gateway");

        Ok(Self {
            connection,
            organization: organization.name.clone(),
            label: user.to_string(),
            released: false,
        })
    }

    /// Cheap handle for a contract on a channel. No network I/O.
    pub fn contract<'a>(&'a self, channel: &str, contract: &str) -> ContractHandle<'a, C> {
        ContractHandle::new(&self.connection, channel, contract)
    }

    pub fn disconnect(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.connection.disconnect();
        self.released = true;
        tracing::info!(organization = %self.organization, label = %self.label, "disconnected from gateway");
    }
}

impl<C: GatewayConnection> Drop for GatewaySession<C> {
    fn drop(&mut self) {
        if !self.released {
            tracing::warn!(organization = %self.organization, "releasing gateway session on unwind");
            self.release();
        }
    }
}
