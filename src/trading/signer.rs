/// Signs the unsigned transaction an order hands back
///
/// The blob is a base64, bincode-encoded `VersionedTransaction` built by the
/// aggregator. Its contents are not inspected beyond locating the wallet's
/// signer slot.

use base64::{engine::general_purpose, Engine as _};
use solana_sdk::{signature::Signature, transaction::VersionedTransaction};
use tracing::debug;

use crate::core::{SweepError, Wallet};

pub fn sign_order_transaction(
    mint: &str,
    transaction_base64: &str,
    wallet: &Wallet,
) -> Result<String, SweepError> {
    let signing_error = |reason: String| SweepError::Signing {
        mint: mint.to_string(),
        reason,
    };

    let transaction_bytes = general_purpose::STANDARD
        .decode(transaction_base64)
        .map_err(|e| signing_error(format!("failed to decode transaction: {}", e)))?;

    let mut transaction: VersionedTransaction = bincode::deserialize(&transaction_bytes)
        .map_err(|e| signing_error(format!("failed to deserialize transaction: {}", e)))?;

    let owner = wallet.pubkey();
    let required = transaction.message.header().num_required_signatures as usize;
    let slot = transaction
        .message
        .static_account_keys()
        .iter()
        .take(required)
        .position(|key| *key == owner)
        .ok_or_else(|| signing_error(format!("{} is not a required signer", owner)))?;

    if transaction.signatures.len() < required {
        transaction.signatures.resize(required, Signature::default());
    }
    let message_bytes = transaction.message.serialize();
    transaction.signatures[slot] = wallet.sign_message(&message_bytes);

    debug!(slot, signature = %transaction.signatures[slot], "✍️ Transaction signed");

    let signed_bytes = bincode::serialize(&transaction)
        .map_err(|e| signing_error(format!("failed to serialize signed transaction: {}", e)))?;

    Ok(general_purpose::STANDARD.encode(signed_bytes))
}
