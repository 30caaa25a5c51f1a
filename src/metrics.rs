use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::journal::{JournalEntry, JournalKind};

/// Totals for one game, rebuilt from its journal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmMetrics {
    pub days_simulated: u32,

    pub feed_bought: Decimal,
    pub feed_spend: Decimal,
    pub feed_consumed: Decimal,
    pub hungry_days: u32,

    pub piglets_bought: u32,
    pub piglet_spend: Decimal,
    pub pigs_matured: u32,
    pub pigs_sold: u32,
    pub sales_revenue: Decimal,

    pub pen_upgrades: u32,
    pub upgrade_spend: Decimal,

    pub events_generated: u32,
    pub events_resolved: u32,
    pub events_expired: u32,
    pub event_money: Decimal,

    pub rejected_transactions: u32,

    pub average_pork_price: Decimal,
}

impl FarmMetrics {
    pub fn from_journal(entries: &[JournalEntry]) -> Self {
        let mut metrics = FarmMetrics::default();
        let mut pork_price_sum = Decimal::ZERO;
        let mut market_updates = 0u32;

        for entry in entries {
            match &entry.kind {
                JournalKind::FeedBought { amount, total, .. } => {
                    metrics.feed_bought += amount;
                    metrics.feed_spend += total;
                }
                JournalKind::PigletsBought { count, total, .. } => {
                    metrics.piglets_bought += count;
                    metrics.piglet_spend += total;
                }
                JournalKind::PigsSold { count, total, .. } => {
                    metrics.pigs_sold += count;
                    metrics.sales_revenue += total;
                }
                JournalKind::PenUpgraded { cost, .. } => {
                    metrics.pen_upgrades += 1;
                    metrics.upgrade_spend += cost;
                }
                JournalKind::TransactionRejected { .. } => metrics.rejected_transactions += 1,
                JournalKind::DayPassed {
                    feed_consumed,
                    pigs_matured,
                    underfed,
                    ..
                } => {
                    metrics.days_simulated += 1;
                    metrics.feed_consumed += feed_consumed;
                    metrics.pigs_matured += pigs_matured;
                    if *underfed {
                        metrics.hungry_days += 1;
                    }
                }
                JournalKind::MarketUpdated { pork_price, .. } => {
                    pork_price_sum += pork_price;
                    market_updates += 1;
                }
                JournalKind::EventGenerated { .. } => metrics.events_generated += 1,
                JournalKind::EventResolved { money_delta, .. } => {
                    metrics.events_resolved += 1;
                    metrics.event_money += money_delta;
                }
                JournalKind::EventExpired { .. } => metrics.events_expired += 1,
                JournalKind::GameLoaded { .. } => {}
            }
        }

        if market_updates > 0 {
            metrics.average_pork_price =
                (pork_price_sum / Decimal::from(market_updates)).round_dp(2);
        }

        metrics
    }

    /// Money in minus money out over the journaled period.
    pub fn net_cash_flow(&self) -> Decimal {
        self.sales_revenue + self.event_money - self.feed_spend - self.piglet_spend - self.upgrade_spend
    }
}

impl std::fmt::Display for FarmMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Farm Metrics ({} days):", self.days_simulated)?;
        writeln!(f, "  Net cash flow: {}", self.net_cash_flow())?;
        writeln!(
            f,
            "  - Sales: {} pigs for {} (avg pork {}/kg)",
            self.pigs_sold, self.sales_revenue, self.average_pork_price
        )?;
        writeln!(
            f,
            "  - Piglets: {} bought for {}, {} matured",
            self.piglets_bought, self.piglet_spend, self.pigs_matured
        )?;
        writeln!(
            f,
            "  - Feed: {} bought for {}, {} eaten, {} hungry days",
            self.feed_bought, self.feed_spend, self.feed_consumed, self.hungry_days
        )?;
        writeln!(
            f,
            "  - Pen: {} upgrades for {}",
            self.pen_upgrades, self.upgrade_spend
        )?;
        writeln!(
            f,
            "  - Events: {} generated, {} resolved, {} expired, net {}",
            self.events_generated, self.events_resolved, self.events_expired, self.event_money
        )?;
        writeln!(f, "  - Rejected transactions: {}", self.rejected_transactions)?;
        Ok(())
    }
}
