pub mod cli;
pub mod error;
pub mod events;
pub mod farmer;
pub mod game;
pub mod journal;
pub mod market;
pub mod metrics;
pub mod money;
pub mod persistence;
pub mod runner;
pub mod scenario;
pub mod strategies;

pub use error::TransactionError;
pub use game::{Action, GameSnapshot, GameState};
pub use scenario::Scenario;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod farmer_test;
#[cfg(test)]
mod metrics_test;
#[cfg(test)]
mod scenario_test;
