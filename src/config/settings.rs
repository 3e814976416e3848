/// Sweep configuration structures

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use url::Url;

use crate::core::SweepError;

pub const DEFAULT_API_URL: &str = "https://lite-api.jup.ag/ultra/v1";
pub const JUP_MINT: &str = "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN";
pub const NATIVE_MINT_ALIAS: &str = "SOL";
pub const DEFAULT_EXPLORER_TX_URL: &str = "https://solscan.io/tx/";
pub const DEFAULT_PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Ultra API base, without trailing slash
    pub api_url: String,
    /// Mint every other balance is sold into
    pub target_mint: String,
    /// Pseudo-mint the balances endpoint uses for native lamports
    pub native_mint_alias: String,
    /// Prefix the transaction signature is appended to
    pub explorer_tx_url: String,
    /// Environment variable holding the base58 private key
    pub private_key_env: String,
    pub request_timeout_secs: Option<u64>,
    /// Request and sign orders but never execute them
    pub dry_run: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            target_mint: JUP_MINT.to_string(),
            native_mint_alias: NATIVE_MINT_ALIAS.to_string(),
            explorer_tx_url: DEFAULT_EXPLORER_TX_URL.to_string(),
            private_key_env: DEFAULT_PRIVATE_KEY_ENV.to_string(),
            request_timeout_secs: None,
            dry_run: false,
        }
    }
}

impl SweepConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SweepError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SweepError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| SweepError::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        Pubkey::from_str(&self.target_mint).map_err(|e| {
            SweepError::Config(format!("target_mint {} is not a valid mint: {}", self.target_mint, e))
        })?;
        Url::parse(&self.api_url)
            .map_err(|e| SweepError::Config(format!("api_url {} is invalid: {}", self.api_url, e)))?;
        if self.private_key_env.is_empty() {
            return Err(SweepError::Config("private_key_env must not be empty".to_string()));
        }
        Ok(())
    }

    /// Mints that are never offered as the input side of an order
    pub fn is_excluded(&self, mint: &str) -> bool {
        mint == self.native_mint_alias || mint == self.target_mint
    }

    pub fn explorer_link(&self, signature: &str) -> String {
        format!("{}{}", self.explorer_tx_url, signature)
    }
}
