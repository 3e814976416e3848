use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sweeper::cli::Args;
use sweeper::{EnvSecret, Reporter, SweepEvent, Sweeper, TracingReporter};

fn init_tracing() -> Result<()> {
    // Create logs directory if it doesn't exist
    std::fs::create_dir_all("logs")?;

    let file_appender = tracing_appender::rolling::daily("logs", "sweeper.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_level(true)
        .compact();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .json()
        .with_current_span(false)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Keep the writer alive for the whole process
    std::mem::forget(guard);

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("🧹 Sweeper v{} - sell all to target", env!("CARGO_PKG_VERSION"));

    // Every fatal error below is reported exactly once as `Aborted`
    let reporter = TracingReporter;
    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(error) => {
            reporter.report(SweepEvent::Aborted { error });
            std::process::exit(1);
        }
    };
    info!(
        api_url = %config.api_url,
        target_mint = %config.target_mint,
        dry_run = config.dry_run,
        "Configuration loaded"
    );

    let secrets = EnvSecret::new(&config.private_key_env);
    let Ok(sweeper) = Sweeper::connect(config, &secrets, reporter) else {
        std::process::exit(1);
    };

    if sweeper.run().await.is_err() {
        std::process::exit(1);
    }

    info!("👋 Sweep complete");
}
