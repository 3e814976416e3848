pub mod error;
pub mod wallet;

pub use error::*;
pub use wallet::*;
