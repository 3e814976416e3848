// Credentials and error taxonomy
pub mod core;

// Configuration and command line
pub mod config;
pub mod cli;

// Sweep execution
pub mod trading;

// Re-export commonly used types for convenience
pub use crate::core::*;
pub use config::SweepConfig;
pub use trading::{Reporter, SweepEvent, SweepSummary, Sweeper, TracingReporter, UltraApi, UltraClient};
