/// Sweep orchestrator
///
/// Fetches the owner's balances once, then for every eligible mint runs
/// order → sign → execute to completion before touching the next one.

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tracing::debug;

use sweeper_core::{BalanceEntry, ExecuteRequest, ExecutionResult, OrderRequest};

use crate::config::SweepConfig;
use crate::core::{SecretProvider, StepOutcome, SweepError, Wallet};

use super::report::{Reporter, SweepEvent};
use super::signer::sign_order_transaction;
use super::ultra_client::{UltraApi, UltraClient};

/// Counters for one run
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    pub started_at: DateTime<Utc>,
    /// Executed with status `Success`, or signed in dry-run mode
    pub swept: u32,
    /// Executed but the service reported a non-success status
    pub failed: u32,
    /// Abandoned after an order, signing or submission error
    pub skipped: u32,
    /// Native or target balances left alone
    pub excluded: u32,
    pub elapsed_ms: u64,
}

impl SweepSummary {
    fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            swept: 0,
            failed: 0,
            skipped: 0,
            excluded: 0,
            elapsed_ms: 0,
        }
    }
}

/// Terminal state of one token that got through every step
#[derive(Debug)]
enum TokenOutcome {
    Landed { signature: String },
    Rejected(ExecutionResult),
    NotExecuted { request_id: String },
}

pub struct Sweeper<A, R> {
    api: A,
    reporter: R,
    wallet: Wallet,
    config: SweepConfig,
}

impl<R: Reporter> Sweeper<UltraClient, R> {
    /// Loads the wallet and builds the HTTP client. A failure is reported
    /// once as `Aborted` and returned.
    pub fn connect(
        config: SweepConfig,
        secrets: &dyn SecretProvider,
        reporter: R,
    ) -> Result<Self, SweepError> {
        let setup = Wallet::load(secrets)
            .and_then(|wallet| UltraClient::new(&config).map(|client| (wallet, client)));

        match setup {
            Ok((wallet, client)) => Ok(Self::new(client, reporter, wallet, config)),
            Err(error) => {
                reporter.report(SweepEvent::Aborted {
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }
}

impl<A: UltraApi, R: Reporter> Sweeper<A, R> {
    pub fn new(api: A, reporter: R, wallet: Wallet, config: SweepConfig) -> Self {
        Self {
            api,
            reporter,
            wallet,
            config,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Runs the sweep. Only a fatal failure returns `Err`; per-token failures
    /// are reported and counted in the summary.
    pub async fn run(&self) -> Result<SweepSummary, SweepError> {
        let clock = Instant::now();
        let mut summary = SweepSummary::new(Utc::now());
        let owner = self.wallet.address();

        self.reporter.report(SweepEvent::Started {
            owner: owner.clone(),
            target_mint: self.config.target_mint.clone(),
        });

        let entries = match StepOutcome::from(self.api.balances(&owner).await) {
            StepOutcome::Completed(entries) => entries,
            // nothing can proceed without balances
            StepOutcome::Recoverable(error) | StepOutcome::Fatal(error) => {
                return Err(self.abort(error));
            }
        };
        self.reporter.report(SweepEvent::BalancesFetched {
            entries: entries.clone(),
        });

        for entry in &entries {
            if self.config.is_excluded(&entry.mint) {
                summary.excluded += 1;
                self.reporter.report(SweepEvent::Excluded {
                    mint: entry.mint.clone(),
                });
                continue;
            }

            match StepOutcome::from(self.sweep_token(entry, &owner).await) {
                StepOutcome::Completed(TokenOutcome::Landed { signature }) => {
                    summary.swept += 1;
                    self.reporter.report(SweepEvent::Swapped {
                        mint: entry.mint.clone(),
                        explorer_url: self.config.explorer_link(&signature),
                        signature,
                    });
                }
                StepOutcome::Completed(TokenOutcome::Rejected(result)) => {
                    summary.failed += 1;
                    self.reporter.report(SweepEvent::SwapFailed {
                        mint: entry.mint.clone(),
                        result,
                    });
                }
                StepOutcome::Completed(TokenOutcome::NotExecuted { request_id }) => {
                    summary.swept += 1;
                    self.reporter.report(SweepEvent::DryRun {
                        mint: entry.mint.clone(),
                        request_id,
                    });
                }
                StepOutcome::Recoverable(error) => {
                    summary.skipped += 1;
                    self.reporter.report(SweepEvent::Skipped { error });
                }
                StepOutcome::Fatal(error) => return Err(self.abort(error)),
            }
        }

        summary.elapsed_ms = clock.elapsed().as_millis() as u64;
        self.reporter.report(SweepEvent::Finished {
            summary: summary.clone(),
        });
        Ok(summary)
    }

    async fn sweep_token(
        &self,
        entry: &BalanceEntry,
        owner: &str,
    ) -> Result<TokenOutcome, SweepError> {
        let mint = entry.mint.as_str();
        self.reporter.report(SweepEvent::Selling {
            mint: mint.to_string(),
            amount: entry.balance.amount.clone(),
        });

        let request = OrderRequest {
            input_mint: mint.to_string(),
            output_mint: self.config.target_mint.clone(),
            amount: entry.balance.amount.clone(),
            taker: owner.to_string(),
        };
        let order = self.api.order(&request).await?;
        self.reporter.report(SweepEvent::OrderCreated {
            mint: mint.to_string(),
            request_id: order.request_id.clone(),
        });

        let signed_transaction = sign_order_transaction(mint, &order.transaction, &self.wallet)?;

        if self.config.dry_run {
            return Ok(TokenOutcome::NotExecuted {
                request_id: order.request_id,
            });
        }

        let execution = ExecuteRequest {
            signed_transaction,
            request_id: order.request_id,
        };
        let result = self.api.execute(mint, &execution).await?;
        debug!(%mint, status = %result.status, "Execution verdict");

        if result.is_success() {
            Ok(TokenOutcome::Landed {
                signature: result.signature,
            })
        } else {
            Ok(TokenOutcome::Rejected(result))
        }
    }

    fn abort(&self, error: SweepError) -> SweepError {
        self.reporter.report(SweepEvent::Aborted {
            error: error.clone(),
        });
        error
    }
}
