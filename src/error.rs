use rust_decimal::Decimal;
use thiserror::Error;

use crate::events::EventId;

/// A rejected farm operation. Whenever one of these is returned the game
/// state is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },

    #[error("pen is full: {requested} pigs would exceed capacity {capacity}")]
    PenFull { requested: u32, capacity: u32 },

    #[error("only {available} pigs are ready for sale, {requested} requested")]
    NotEnoughReadyPigs { requested: u32, available: u32 },

    #[error("amount must not be negative: {0}")]
    InvalidAmount(Decimal),

    #[error("no event with id {0}")]
    UnknownEvent(EventId),

    #[error("event {0} is already resolved")]
    EventAlreadyResolved(EventId),

    #[error("event {0} has expired")]
    EventExpired(EventId),
}
