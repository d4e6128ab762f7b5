use std::path::Path;

use journal_client::Result;
use journal_client::domain::{Identity, UserId};
use journal_client::services::{ProfileResolver, Wallet};
use serde_json::json;

pub fn list(resolver: &ProfileResolver, org: &str, json: bool) -> Result<()> {
    let organization = resolver.resolve(org)?;
    let wallet = Wallet::open_or_create(&organization.wallet_path)?;
    let labels = wallet.list()?;

    if json {
        let body = json!({
            "organization": organization.name,
            "wallet": wallet.path(),
            "identities": labels,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if labels.is_empty() {
        println!("No identities in {}", wallet.path().display());
        return Ok(());
    }
    println!("{} ({}):", organization.name, wallet.path().display());
    for label in labels {
        println!("  {label}");
    }
    Ok(())
}

pub fn import(
    resolver: &ProfileResolver,
    org: &str,
    label: &UserId,
    certificate: &Path,
    private_key: &Path,
) -> Result<()> {
    let organization = resolver.resolve(org)?;
    let identity = Identity::x509(
        organization.msp_id.as_str(),
        std::fs::read_to_string(certificate)?,
        std::fs::read_to_string(private_key)?,
    );

    let wallet = Wallet::open_or_create(&organization.wallet_path)?;
    wallet.put(label.as_str(), &identity)?;

    println!(
        "Imported {label} ({}) into {}",
        organization.msp_id,
        wallet.path().display()
    );
    Ok(())
}
