/// Sweep progress reporting
///
/// The sweeper never logs directly; it emits `SweepEvent`s to a `Reporter`.
/// `TracingReporter` is the console/file sink used by the binary.

use tracing::{error, info, warn};

use sweeper_core::{BalanceEntry, ExecutionResult};

use crate::core::SweepError;

use super::sweeper::SweepSummary;

#[derive(Debug, Clone, PartialEq)]
pub enum SweepEvent {
    Started {
        owner: String,
        target_mint: String,
    },
    BalancesFetched {
        entries: Vec<BalanceEntry>,
    },
    Excluded {
        mint: String,
    },
    Selling {
        mint: String,
        amount: String,
    },
    OrderCreated {
        mint: String,
        request_id: String,
    },
    /// Per-token step failed; the loop moves on
    Skipped {
        error: SweepError,
    },
    Swapped {
        mint: String,
        signature: String,
        explorer_url: String,
    },
    SwapFailed {
        mint: String,
        result: ExecutionResult,
    },
    DryRun {
        mint: String,
        request_id: String,
    },
    Aborted {
        error: SweepError,
    },
    Finished {
        summary: SweepSummary,
    },
}

pub trait Reporter: Send + Sync {
    fn report(&self, event: SweepEvent);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, event: SweepEvent) {
        (**self).report(event)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: SweepEvent) {
        match event {
            SweepEvent::Started { owner, target_mint } => {
                info!("🚀 Starting sweep of {} into {}", owner, target_mint);
            }
            SweepEvent::BalancesFetched { entries } => {
                info!("📊 Balances response: {} tokens", entries.len());
                for entry in &entries {
                    info!("   • {}: {}", entry.mint, entry.balance.amount);
                }
            }
            SweepEvent::Excluded { mint } => {
                info!("⏭️  Skipping {} (native or target)", mint);
            }
            SweepEvent::Selling { mint, amount } => {
                info!("▸ Selling {} of {}", amount, mint);
            }
            SweepEvent::OrderCreated { mint, request_id } => {
                info!("📥 Order created for {} (request {})", mint, request_id);
            }
            SweepEvent::Skipped { error } => {
                error!("{}", error);
            }
            SweepEvent::Swapped {
                mint,
                signature,
                explorer_url,
            } => {
                info!(%mint, %signature, "✅ Success! {}", explorer_url);
            }
            SweepEvent::SwapFailed { mint, result } => {
                error!(%mint, "❌ Failed! Signature: {}", result.signature);
                error!(
                    "   Code: {}, Message: {}",
                    result.code.as_deref().unwrap_or("none"),
                    result.error.as_deref().unwrap_or("none")
                );
            }
            SweepEvent::DryRun { mint, request_id } => {
                warn!("🧪 Dry run: signed order {} for {} not executed", request_id, mint);
            }
            SweepEvent::Aborted { error } => {
                error!("🛑 Sweep aborted: {}", error);
            }
            SweepEvent::Finished { summary } => {
                info!(
                    swept = summary.swept,
                    failed = summary.failed,
                    skipped = summary.skipped,
                    excluded = summary.excluded,
                    elapsed_ms = summary.elapsed_ms,
                    "🏁 Sweep started at {} finished",
                    summary.started_at.to_rfc3339()
                );
            }
        }
    }
}
