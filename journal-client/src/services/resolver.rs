use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::OrganizationConfig;
use crate::domain::{ConnectionProfile, OrganizationProfile};
use crate::error::{JournalError, Result};

/// Maps an organization token onto its profile and wallet. Reads files only.
pub struct ProfileResolver {
    organizations: BTreeMap<String, OrganizationConfig>,
    base_dir: PathBuf,
}

impl ProfileResolver {
    /// Relative paths in `organizations` are taken from `base_dir`.
    pub fn new(organizations: BTreeMap<String, OrganizationConfig>, base_dir: PathBuf) -> Self {
        Self {
            organizations,
            base_dir,
        }
    }

    pub fn known(&self) -> Vec<String> {
        self.organizations.keys().cloned().collect()
    }

    pub fn resolve(&self, organization: &str) -> Result<OrganizationProfile> {
        let (name, org) = self
            .organizations
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(organization.trim()))
            .ok_or_else(|| JournalError::UnknownOrganization {
                name: organization.to_string(),
                known: self.known(),
            })?;

        Ok(OrganizationProfile {
            name: name.clone(),
            msp_id: org.msp_id.clone(),
            connection_profile_path: self.absolute(&org.connection_profile),
            wallet_path: self.absolute(&org.wallet),
        })
    }

    pub fn load(&self, organization: &OrganizationProfile) -> Result<ConnectionProfile> {
        let profile = ConnectionProfile::from_path(&organization.connection_profile_path)?;
        match profile.client_organization() {
            Some(client) if !client.eq_ignore_ascii_case(&organization.name) => {
                tracing::warn!(
                    organization = %organization.name,
                    profile_client = client,
                    "connection profile was written for a different organization"
                );
            }
            _ => {}
        }
        tracing::debug!(
            organization = %organization.name,
            profile = %profile.name,
            "loaded connection profile"
        );
        Ok(profile)
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
