//! API request handlers

mod health;
mod reports;
mod statistics;

pub use health::*;
pub use reports::*;
pub use statistics::*;
