/// Sweep execution
///
/// Ultra API client, transaction signing and the orchestrator that sells
/// every balance into the target mint.

pub mod report;
pub mod signer;
pub mod sweeper;
pub mod ultra_client;

pub use report::*;
pub use signer::sign_order_transaction;
pub use sweeper::*;
pub use ultra_client::*;
