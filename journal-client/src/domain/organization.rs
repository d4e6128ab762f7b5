use std::path::PathBuf;

use serde::Serialize;

/// The organization selected for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationProfile {
    pub name: String,
    pub msp_id: String,
    pub connection_profile_path: PathBuf,
    pub wallet_path: PathBuf,
}
