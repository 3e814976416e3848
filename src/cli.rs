use clap::Parser;

use crate::config::SweepConfig;
use crate::core::SweepError;

/// Sell every token in a wallet for a single target token via Jupiter Ultra
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (can also be set via SWEEPER_CONFIG env var)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Mint to sell everything into
    #[arg(short, long)]
    pub target_mint: Option<String>,

    /// Request and sign orders without executing them
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// File settings (or defaults), overridden by command line flags
    pub fn resolve_config(&self) -> Result<SweepConfig, SweepError> {
        let path = self
            .config
            .clone()
            .or_else(|| std::env::var("SWEEPER_CONFIG").ok());

        let mut config = match path {
            Some(path) => SweepConfig::load_from_file(path)?,
            None => SweepConfig::default(),
        };

        if let Some(target_mint) = &self.target_mint {
            config.target_mint = target_mint.clone();
        }
        if self.dry_run {
            config.dry_run = true;
        }

        config.validate()?;
        Ok(config)
    }
}
