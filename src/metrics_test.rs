#[cfg(test)]
mod tests {
    use super::super::events::{EventId, EventKind};
    use super::super::journal::*;
    use super::super::metrics::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn create_test_entries() -> Vec<JournalEntry> {
        let base_time = Utc::now();
        let entry = |day, kind| JournalEntry {
            timestamp: base_time,
            day,
            kind,
        };

        vec![
            entry(
                1,
                JournalKind::FeedBought {
                    amount: dec!(10),
                    unit_price: dec!(5),
                    total: dec!(50),
                },
            ),
            entry(
                1,
                JournalKind::PigletsBought {
                    count: 2,
                    unit_price: dec!(250),
                    total: dec!(500),
                },
            ),
            entry(
                1,
                JournalKind::TransactionRejected {
                    action: "upgrade pen".to_string(),
                    reason: "insufficient funds".to_string(),
                },
            ),
            entry(
                2,
                JournalKind::DayPassed {
                    feed_consumed: dec!(8),
                    feed_stock: dec!(52),
                    pigs_matured: 0,
                    underfed: false,
                },
            ),
            entry(
                2,
                JournalKind::MarketUpdated {
                    pork_price: dec!(18),
                    feed_price: dec!(5.5),
                    piglet_price: dec!(240),
                },
            ),
            entry(
                2,
                JournalKind::EventGenerated {
                    event_id: EventId(1),
                    title: "Equipment damage".to_string(),
                    event_kind: EventKind::Danger,
                },
            ),
            entry(
                3,
                JournalKind::DayPassed {
                    feed_consumed: dec!(3),
                    feed_stock: dec!(0),
                    pigs_matured: 1,
                    underfed: true,
                },
            ),
            entry(
                3,
                JournalKind::MarketUpdated {
                    pork_price: dec!(23),
                    feed_price: dec!(4.5),
                    piglet_price: dec!(260),
                },
            ),
            entry(
                3,
                JournalKind::EventResolved {
                    event_id: EventId(1),
                    money_delta: dec!(-150),
                    feed_delta: dec!(0),
                    fattening_delta: 0,
                    ready_delta: 0,
                },
            ),
            entry(
                3,
                JournalKind::PigsSold {
                    count: 1,
                    revenue_per_pig: dec!(2300),
                    total: dec!(2300),
                },
            ),
            entry(
                3,
                JournalKind::PenUpgraded {
                    cost: dec!(1000),
                    capacity: 10,
                },
            ),
        ]
    }

    #[test]
    fn test_metrics_from_journal() {
        let metrics = FarmMetrics::from_journal(&create_test_entries());

        assert_eq!(metrics.days_simulated, 2);
        assert_eq!(metrics.feed_bought, dec!(10));
        assert_eq!(metrics.feed_spend, dec!(50));
        assert_eq!(metrics.feed_consumed, dec!(11));
        assert_eq!(metrics.hungry_days, 1);
        assert_eq!(metrics.piglets_bought, 2);
        assert_eq!(metrics.pigs_matured, 1);
        assert_eq!(metrics.pigs_sold, 1);
        assert_eq!(metrics.sales_revenue, dec!(2300));
        assert_eq!(metrics.pen_upgrades, 1);
        assert_eq!(metrics.events_generated, 1);
        assert_eq!(metrics.events_resolved, 1);
        assert_eq!(metrics.event_money, dec!(-150));
        assert_eq!(metrics.rejected_transactions, 1);
        assert_eq!(metrics.average_pork_price, dec!(20.5));
    }

    #[test]
    fn test_net_cash_flow() {
        let metrics = FarmMetrics::from_journal(&create_test_entries());
        // 2300 - 150 - 50 - 500 - 1000
        assert_eq!(metrics.net_cash_flow(), dec!(600));
    }

    #[test]
    fn test_empty_journal() {
        let metrics = FarmMetrics::from_journal(&[]);
        assert_eq!(metrics, FarmMetrics::default());
        assert_eq!(metrics.average_pork_price, dec!(0));
    }

    #[test]
    fn test_metrics_display() {
        let text = FarmMetrics::from_journal(&create_test_entries()).to_string();
        assert!(text.starts_with("Farm Metrics (2 days):"));
        assert!(text.contains("Net cash flow: 600"));
        assert!(text.contains("Rejected transactions: 1"));
    }

    #[test]
    fn test_journal_file_round_trip() {
        let mut journal = Journal::new();
        for entry in create_test_entries() {
            journal.log(entry.day, entry.kind);
        }
        let path = std::env::temp_dir().join(format!("pig_farm_journal_{}.json", std::process::id()));
        journal.save_to_file(&path).unwrap();

        let loaded = Journal::load_from_file(&path).unwrap();
        assert_eq!(
            FarmMetrics::from_journal(loaded.entries()),
            FarmMetrics::from_journal(journal.entries())
        );
        std::fs::remove_file(&path).unwrap();

        journal.clear();
        assert!(journal.entries().is_empty());
    }
}
