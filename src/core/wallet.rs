use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use tracing::{debug, info, instrument};

use super::error::SweepError;

/// Source of the base58 secret key
pub trait SecretProvider {
    fn secret(&self) -> Option<String>;
}

/// Reads the secret from an environment variable
#[derive(Debug, Clone)]
pub struct EnvSecret {
    pub var: String,
}

impl EnvSecret {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SecretProvider for EnvSecret {
    fn secret(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }
}

impl<F> SecretProvider for F
where
    F: Fn() -> Option<String>,
{
    fn secret(&self) -> Option<String> {
        self()
    }
}

/// Owner of the balances being swept
pub struct Wallet {
    keypair: Keypair,
}

impl Wallet {
    /// Decodes the provider's base58 secret into a signing keypair
    #[instrument(skip(provider))]
    pub fn load(provider: &dyn SecretProvider) -> Result<Self, SweepError> {
        let secret = provider
            .secret()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SweepError::Credential("no private key provided".to_string()))?;

        let bytes = bs58::decode(&secret)
            .into_vec()
            .map_err(|e| SweepError::Credential(format!("private key is not base58: {}", e)))?;
        debug!(len = bytes.len(), "Decoded private key");

        let keypair = Keypair::from_bytes(&bytes)
            .map_err(|e| SweepError::Credential(format!("invalid keypair bytes: {}", e)))?;

        info!(pubkey = %keypair.pubkey(), "Using wallet public key");
        Ok(Self { keypair })
    }

    pub fn from_keypair(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Owner address as the API expects it
    pub fn address(&self) -> String {
        self.keypair.pubkey().to_string()
    }

    pub fn sign_message(&self, message: &[u8]) -> Signature {
        self.keypair.sign_message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_base58_secret() {
        let keypair = Keypair::new();
        let encoded = keypair.to_base58_string();

        let wallet = Wallet::load(&move || Some(encoded.clone())).unwrap();
        assert_eq!(wallet.pubkey(), keypair.pubkey());
        assert_eq!(wallet.address(), keypair.pubkey().to_string());
    }

    #[test]
    fn test_missing_or_empty_secret_is_rejected() {
        let missing = Wallet::load(&|| -> Option<String> { None });
        assert!(matches!(missing, Err(SweepError::Credential(_))));

        let blank = Wallet::load(&|| Some("   ".to_string()));
        assert!(matches!(blank, Err(SweepError::Credential(_))));
    }

    #[test]
    fn test_invalid_secret_is_rejected() {
        // '0' is outside the base58 alphabet
        let not_base58 = Wallet::load(&|| Some("0OIl".to_string()));
        assert!(matches!(not_base58, Err(SweepError::Credential(_))));

        let short = bs58::encode([7u8; 16]).into_string();
        let wrong_length = Wallet::load(&move || Some(short.clone()));
        assert!(matches!(wrong_length, Err(SweepError::Credential(_))));
    }

    #[test]
    fn test_env_provider_reads_variable() {
        let var = "SWEEPER_TEST_PRIVATE_KEY";
        let keypair = Keypair::new();
        std::env::set_var(var, keypair.to_base58_string());

        let wallet = Wallet::load(&EnvSecret::new(var)).unwrap();
        assert_eq!(wallet.pubkey(), keypair.pubkey());

        std::env::remove_var(var);
    }
}
