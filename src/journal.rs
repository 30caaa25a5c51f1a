use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::events::{EventId, EventKind};

/// One line of the farm's activity journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub timestamp: DateTime<Utc>,
    pub day: u32,
    pub kind: JournalKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JournalKind {
    FeedBought {
        amount: Decimal,
        unit_price: Decimal,
        total: Decimal,
    },
    PigletsBought {
        count: u32,
        unit_price: Decimal,
        total: Decimal,
    },
    PigsSold {
        count: u32,
        revenue_per_pig: Decimal,
        total: Decimal,
    },
    PenUpgraded {
        cost: Decimal,
        capacity: u32,
    },
    TransactionRejected {
        action: String,
        reason: String,
    },
    DayPassed {
        feed_consumed: Decimal,
        feed_stock: Decimal,
        pigs_matured: u32,
        underfed: bool,
    },
    MarketUpdated {
        pork_price: Decimal,
        feed_price: Decimal,
        piglet_price: Decimal,
    },
    EventGenerated {
        event_id: EventId,
        title: String,
        event_kind: EventKind,
    },
    EventResolved {
        event_id: EventId,
        money_delta: Decimal,
        feed_delta: Decimal,
        fattening_delta: i32,
        ready_delta: i32,
    },
    EventExpired {
        event_id: EventId,
    },
    GameLoaded {
        events: usize,
    },
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[day {}] ", self.day)?;

        match &self.kind {
            JournalKind::FeedBought {
                amount,
                unit_price,
                total,
            } => write!(f, "Bought {} feed at {} (total {})", amount, unit_price, total),
            JournalKind::PigletsBought {
                count,
                unit_price,
                total,
            } => write!(f, "Bought {} piglets at {} (total {})", count, unit_price, total),
            JournalKind::PigsSold {
                count,
                revenue_per_pig,
                total,
            } => write!(f, "Sold {} pigs at {} each (total {})", count, revenue_per_pig, total),
            JournalKind::PenUpgraded { cost, capacity } => {
                write!(f, "Upgraded pen for {} (capacity {})", cost, capacity)
            }
            JournalKind::TransactionRejected { action, reason } => {
                write!(f, "Rejected {}: {}", action, reason)
            }
            JournalKind::DayPassed {
                feed_consumed,
                feed_stock,
                pigs_matured,
                underfed,
            } => {
                write!(
                    f,
                    "Herd ate {} feed ({} left), {} pigs matured",
                    feed_consumed, feed_stock, pigs_matured
                )?;
                if *underfed {
                    write!(f, " - herd went hungry")?;
                }
                Ok(())
            }
            JournalKind::MarketUpdated {
                pork_price,
                feed_price,
                piglet_price,
            } => write!(
                f,
                "Market: pork {} feed {} piglet {}",
                pork_price, feed_price, piglet_price
            ),
            JournalKind::EventGenerated {
                event_id,
                title,
                event_kind,
            } => write!(f, "Event {} ({:?}): {}", event_id, event_kind, title),
            JournalKind::EventResolved {
                event_id,
                money_delta,
                feed_delta,
                fattening_delta,
                ready_delta,
            } => write!(
                f,
                "Resolved {}: money {:+}, feed {:+}, pigs {:+}/{:+}",
                event_id, money_delta, feed_delta, fattening_delta, ready_delta
            ),
            JournalKind::EventExpired { event_id } => write!(f, "Event {} expired", event_id),
            JournalKind::GameLoaded { events } => {
                write!(f, "Game loaded with {} logged events", events)
            }
        }
    }
}

#[derive(Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, day: u32, kind: JournalKind) {
        self.entries.push(JournalEntry {
            timestamp: Utc::now(),
            day,
            kind,
        });
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let entries: Vec<JournalEntry> = serde_json::from_str(&json)?;
        Ok(Self { entries })
    }
}
