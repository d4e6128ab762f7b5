use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JournalError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub channel: String,
    pub contract: String,
    pub discovery: DiscoveryConfig,
    pub gateway: GatewayConfig,
    pub organizations: BTreeMap<String, OrganizationConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub enabled: bool,
    pub as_localhost: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            as_localhost: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// REST gateway base URL. When unset the first peer of the organization
    /// is used.
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationConfig {
    pub msp_id: String,
    pub connection_profile: PathBuf,
    pub wallet: PathBuf,
}

impl OrganizationConfig {
    fn test_network(number: u8) -> Self {
        Self {
            msp_id: format!("Org{number}MSP"),
            connection_profile: PathBuf::from(format!(
                "test-network/organizations/peerOrganizations/org{number}.example.com/connection-org{number}.json"
            )),
            wallet: PathBuf::from(format!("wallet/org{number}")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let organizations = [
            ("Org1".to_string(), OrganizationConfig::test_network(1)),
            ("Org2".to_string(), OrganizationConfig::test_network(2)),
        ]
        .into_iter()
        .collect();

        Self {
            channel: "mychannel".to_string(),
            contract: "journal".to_string(),
            discovery: DiscoveryConfig::default(),
            gateway: GatewayConfig::default(),
            organizations,
        }
    }
}

/// One config file. Absent keys leave the lower layer untouched.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigLayer {
    channel: Option<String>,
    contract: Option<String>,
    discovery: Option<DiscoveryConfig>,
    gateway: Option<GatewayConfig>,
    organizations: Option<BTreeMap<String, OrganizationConfig>>,
}

impl Config {
    /// Defaults, then the global file, then the project file (or `explicit`
    /// in its place), then `JOURNAL_*` environment variables.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let global = Self::load_global()?;
        let project = match explicit {
            Some(path) => Self::read_layer(path)?.ok_or_else(|| {
                JournalError::Config(format!("config file not found: {}", path.display()))
            })?,
            None => Self::read_layer(Path::new(".journal/config.toml"))?.unwrap_or_default(),
        };

        let merged = Self::default().merge(global).merge(project);
        Ok(merged.with_env_overrides(|key| std::env::var(key).ok()))
    }

    fn load_global() -> Result<ConfigLayer> {
        let config_dir = directories::ProjectDirs::from("", "", "journal").map_or_else(
            || PathBuf::from("~/.config/journal"),
            |d| d.config_dir().to_path_buf(),
        );

        Ok(Self::read_layer(&config_dir.join("config.toml"))?.unwrap_or_default())
    }

    fn read_layer(path: &Path) -> Result<Option<ConfigLayer>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| JournalError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| JournalError::Config(format!("{}: {e}", path.display())))
    }

    fn merge(self, layer: ConfigLayer) -> Self {
        Self {
            channel: layer.channel.unwrap_or(self.channel),
            contract: layer.contract.unwrap_or(self.contract),
            discovery: layer.discovery.unwrap_or(self.discovery),
            gateway: layer.gateway.unwrap_or(self.gateway),
            organizations: layer.organizations.unwrap_or(self.organizations),
        }
    }

    fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(channel) = lookup("JOURNAL_CHANNEL") {
            self.channel = channel;
        }
        if let Some(contract) = lookup("JOURNAL_CONTRACT") {
            self.contract = contract;
        }
        if let Some(url) = lookup("JOURNAL_GATEWAY_URL") {
            self.gateway.url = Some(url);
        }
        if let Some(enabled) = lookup("JOURNAL_DISCOVERY").as_deref().and_then(parse_flag) {
            self.discovery.enabled = enabled;
        }
        if let Some(local) = lookup("JOURNAL_AS_LOCALHOST").as_deref().and_then(parse_flag) {
            self.discovery.as_localhost = local;
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
