//! Wire types shared by the Ultra API client and the sweep orchestrator

pub mod types;

pub use types::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WireError {
    #[error("Response missing field: {0}")]
    MissingField(&'static str),

    #[error("Order has no transaction: {0}")]
    NoTransaction(String),
}
