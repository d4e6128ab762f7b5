use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;
use crate::domain::{ConnectionProfile, PeerEndpoint, SigningIdentity, TransactionRequest};
use crate::error::{JournalError, Result};
use crate::ports::{ConnectOptions, GatewayConnection, GatewayConnector};

/// Gateway reached over its REST endpoint. Signing, endorsement collection
/// and ordering happen behind that endpoint.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.url.clone(),
        })
    }

    async fn discover(&self, base: &Url, msp_id: &str) -> Result<Vec<PeerEndpoint>> {
        let url = endpoint(base, &["peers"])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unreachable_error(base, &e))?;

        if !response.status().is_success() {
            return Err(JournalError::Connection(format!(
                "discovery at {base} returned {}",
                response.status()
            )));
        }

        let peers: Vec<DiscoveredPeer> = response.json().await?;
        tracing::debug!(count = peers.len(), "discovered peers");

        Ok(peers
            .into_iter()
            .filter(|p| p.msp_id.as_deref().is_none_or(|m| m == msp_id))
            .map(|p| PeerEndpoint {
                name: p.name,
                url: p.url,
            })
            .collect())
    }

    async fn probe(&self, base: &Url) -> Result<()> {
        let url = endpoint(base, &["health"])?;
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| unreachable_error(base, &e))?;
        Ok(())
    }
}

#[async_trait]
impl GatewayConnector for HttpGateway {
    type Connection = HttpConnection;

    async fn connect(
        &self,
        profile: &ConnectionProfile,
        signer: &SigningIdentity,
        options: ConnectOptions,
    ) -> Result<HttpConnection> {
        let msp_id = signer.identity.msp_id.as_str();
        let static_peers = profile.peers_for(msp_id);
        let first = static_peers.first().ok_or_else(|| {
            JournalError::Connection(format!(
                "connection profile {} lists no peers for {msp_id}",
                profile.name
            ))
        })?;

        let raw_base = self
            .base_url
            .clone()
            .unwrap_or_else(|| gateway_url(&first.url));
        let base = Url::parse(&raw_base).map_err(|e| {
            JournalError::Connection(format!("invalid gateway URL {raw_base}: {e}"))
        })?;

        let endorsers = if options.discovery_enabled {
            let discovered = self.discover(&base, msp_id).await?;
            if options.discovery_as_localhost {
                discovered
                    .into_iter()
                    .map(|p| PeerEndpoint {
                        url: rewrite_to_localhost(&p.url),
                        name: p.name,
                    })
                    .collect()
            } else {
                discovered
            }
        } else {
            self.probe(&base).await?;
            static_peers
        };

        if endorsers.is_empty() {
            return Err(JournalError::Connection(format!(
                "no endorsing peers available for {msp_id}"
            )));
        }

        tracing::debug!(
            gateway = %base,
            endorsers = ?endorsers.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            "gateway ready"
        );

        Ok(HttpConnection {
            client: self.client.clone(),
            base,
            identity: WireIdentity {
                msp_id: msp_id.to_string(),
                certificate: signer.identity.credentials.certificate.clone(),
            },
            endorsers,
            open: true,
        })
    }
}

pub struct HttpConnection {
    client: reqwest::Client,
    base: Url,
    identity: WireIdentity,
    endorsers: Vec<PeerEndpoint>,
    open: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireIdentity {
    msp_id: String,
    certificate: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProposalBody<'a> {
    transaction_id: String,
    transaction: &'a str,
    arguments: &'a [String],
    identity: &'a WireIdentity,
    endorsing_peers: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscoveredPeer {
    name: String,
    url: String,
    #[serde(default)]
    msp_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    transaction_id: String,
    status: String,
    #[serde(default)]
    payload: Option<String>,
}

impl HttpConnection {
    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(JournalError::Connection(
                "gateway connection already closed".to_string(),
            ))
        }
    }

    fn proposal<'a>(&'a self, request: &'a TransactionRequest, peers: usize) -> ProposalBody<'a> {
        ProposalBody {
            transaction_id: new_transaction_id(&self.identity.certificate),
            transaction: &request.transaction,
            arguments: &request.arguments,
            identity: &self.identity,
            endorsing_peers: self
                .endorsers
                .iter()
                .take(peers)
                .map(|p| p.name.as_str())
                .collect(),
        }
    }

    async fn post(&self, url: Url, body: &ProposalBody<'_>) -> Result<reqwest::Response> {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(JournalError::Gateway {
            status: status.as_u16(),
            message: message.trim().to_string(),
        })
    }
}

#[async_trait]
impl GatewayConnection for HttpConnection {
    async fn evaluate(&self, channel: &str, request: &TransactionRequest) -> Result<Vec<u8>> {
        self.ensure_open()?;
        let url = endpoint(
            &self.base,
            &["channels", channel, "contracts", &request.contract, "evaluate"],
        )?;
        let body = self.proposal(request, 1);

        let response = self.post(url, &body).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn submit(&self, channel: &str, request: &TransactionRequest) -> Result<Vec<u8>> {
        self.ensure_open()?;
        let url = endpoint(
            &self.base,
            &["channels", channel, "contracts", &request.contract, "submit"],
        )?;
        let body = self.proposal(request, self.endorsers.len());
        tracing::debug!(transaction_id = %body.transaction_id, "submitting for endorsement");

        let response: SubmitResponse = self.post(url, &body).await?.json().await?;
        if response.status != "VALID" {
            return Err(JournalError::Commit {
                transaction_id: response.transaction_id,
                status: response.status,
            });
        }

        tracing::debug!(transaction_id = %response.transaction_id, "transaction committed");
        Ok(response.payload.unwrap_or_default().into_bytes())
    }

    fn disconnect(&mut self) {
        if self.open {
            self.open = false;
            tracing::debug!(gateway = %self.base, "closed gateway connection");
        }
    }
}

/// Peer URLs in profiles use `grpc(s)://`; the REST endpoint shares host and
/// port.
fn gateway_url(peer_url: &str) -> String {
    if let Some(rest) = peer_url.strip_prefix("grpcs://") {
        format!("https://{rest}")
    } else if let Some(rest) = peer_url.strip_prefix("grpc://") {
        format!("http://{rest}")
    } else {
        peer_url.to_string()
    }
}

/// Keeps scheme and port, replaces the host.
fn rewrite_to_localhost(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    if parsed.set_host(Some("localhost")).is_ok() {
        parsed.to_string()
    } else {
        url.to_string()
    }
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| JournalError::Connection(format!("gateway URL {base} cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn unreachable_error(base: &Url, error: &reqwest::Error) -> JournalError {
    JournalError::Connection(format!("no reachable gateway endpoint at {base}: {error}"))
}

fn new_transaction_id(certificate: &str) -> String {
    let nonce = uuid::Uuid::new_v4();
    let mut hasher = blake3::Hasher::new();
    hasher.update(nonce.as_bytes());
    hasher.update(certificate.as_bytes());
    hex::encode(hasher.finalize().as_bytes())
}
