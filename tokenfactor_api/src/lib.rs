mod client;
mod errors;
pub mod types;

pub use self::client::{Client, DEFAULT_LOOKBACK_DAYS};
pub use self::errors::Error;
