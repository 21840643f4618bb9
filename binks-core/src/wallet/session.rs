//! The persisted record of a connected wallet.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Default display name given to a freshly connected wallet
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Role value that marks an administrator
pub const ADMIN_ROLE: &str = "admin";

/// Browser extensions a user can connect with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    MetaMask,
    Phantom,
}

impl ProviderKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MetaMask => "MetaMask",
            Self::Phantom => "Phantom",
        }
    }

    /// Where users are sent when the extension is missing
    pub fn install_url(&self) -> &'static str {
        match self {
            Self::MetaMask => "https://metamask.io/download/",
            Self::Phantom => "https://phantom.app/download",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Connected wallet as stored in local storage.
///
/// Serialized as `{address, type, balance?, chainId?, name?, role?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSession {
    pub address: String,
    #[serde(rename = "type")]
    pub provider: ProviderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    /// Hex string from MetaMask; numeric ids are kept as decimal text
    #[serde(
        default,
        deserialize_with = "chain_id_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub chain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl WalletSession {
    pub fn new(address: impl Into<String>, provider: ProviderKind) -> Self {
        Self {
            address: address.into(),
            provider,
            balance: None,
            chain_id: None,
            name: Some(DEFAULT_DISPLAY_NAME.to_string()),
            role: None,
        }
    }

    /// Whether the session carries the admin role.
    ///
    /// Nothing assigns roles yet, so this is false for every connected wallet.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }

    /// Shortened address for headers and cards
    pub fn short_address(&self) -> String {
        format_address(&self.address)
    }
}

fn chain_id_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChainId {
        Text(String),
        Number(u64),
    }

    Ok(Option::<ChainId>::deserialize(deserializer)?.map(|id| match id {
        ChainId::Text(text) => text,
        ChainId::Number(n) => n.to_string(),
    }))
}

/// Format an address as `0x1234...5678`; short addresses pass through
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() > 10 {
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        address.to_string()
    }
}
