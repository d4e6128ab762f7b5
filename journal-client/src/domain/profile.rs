use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{JournalError, Result};

/// Network topology for one organization, in the common connection profile
/// layout (`connection-org1.json` / `.yaml`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionProfile {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub client: Option<ClientSection>,
    #[serde(default)]
    pub organizations: BTreeMap<String, OrganizationSection>,
    #[serde(default)]
    pub peers: BTreeMap<String, NodeSection>,
    #[serde(default)]
    pub orderers: BTreeMap<String, NodeSection>,
    #[serde(default)]
    pub certificate_authorities: BTreeMap<String, CertificateAuthoritySection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSection {
    pub organization: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSection {
    pub mspid: String,
    #[serde(default)]
    pub peers: Vec<String>,
    #[serde(default)]
    pub certificate_authorities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSection {
    pub url: String,
    #[serde(default, rename = "tlsCACerts")]
    pub tls_ca_certs: Option<TlsCaCerts>,
    #[serde(default)]
    pub grpc_options: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAuthoritySection {
    pub url: String,
    #[serde(default)]
    pub ca_name: Option<String>,
    #[serde(default, rename = "tlsCACerts")]
    pub tls_ca_certs: Option<TlsCaCerts>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TlsCaCerts {
    #[serde(default)]
    pub pem: Option<Pem>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Pem {
    One(String),
    Many(Vec<String>),
}

/// A peer named in the profile, with its endpoint URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerEndpoint {
    pub name: String,
    pub url: String,
}

impl ConnectionProfile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JournalError::Config(format!(
                "cannot read connection profile {}: {e}",
                path.display()
            ))
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let parsed = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|e| {
            JournalError::Config(format!(
                "malformed connection profile {}: {e}",
                path.display()
            ))
        })
    }

    /// Peers listed for the organization owning `msp_id`, in profile order.
    /// Names without a matching `peers` entry are skipped.
    pub fn peers_for(&self, msp_id: &str) -> Vec<PeerEndpoint> {
        self.organizations
            .values()
            .filter(|org| org.mspid == msp_id)
            .flat_map(|org| org.peers.iter())
            .filter_map(|name| {
                self.peers.get(name).map(|node| PeerEndpoint {
                    name: name.clone(),
                    url: node.url.clone(),
                })
            })
            .collect()
    }

    pub fn client_organization(&self) -> Option<&str> {
        self.client.as_ref().map(|c| c.organization.as_str())
    }
}
