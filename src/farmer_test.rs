#[cfg(test)]
mod tests {
    use super::super::error::TransactionError;
    use super::super::events::EffectDeltas;
    use super::super::farmer::*;
    use super::super::scenario::{FarmStart, GrowthGate};
    use super::super::test_support::{default_farmer, farmer_with};
    use rust_decimal_macros::dec;

    fn herd(fattening_pigs: u32, ready_pigs: u32, feed_stock: rust_decimal::Decimal) -> Farmer {
        farmer_with(FarmStart {
            fattening_pigs,
            ready_pigs,
            feed_stock,
            max_pigs: 20,
            ..FarmStart::default()
        })
    }

    #[test]
    fn test_initial_state() {
        let state = default_farmer().state();
        assert_eq!(state.money, dec!(1000));
        assert_eq!(state.feed_stock, dec!(50));
        assert_eq!(state.feed_consumption, dec!(4));
        assert_eq!(state.fattening_pigs, 2);
        assert_eq!(state.ready_pigs, 0);
        assert_eq!(state.max_pigs, 5);
    }

    #[test]
    fn test_buy_feed_then_unaffordable_feed() {
        let mut farmer = default_farmer();

        assert!(farmer.buy_feed(dec!(10), dec!(5)).is_ok());
        assert_eq!(farmer.state().money, dec!(950));
        assert_eq!(farmer.state().feed_stock, dec!(60));

        let before = farmer.state();
        let result = farmer.buy_feed(dec!(500), dec!(5));
        assert_eq!(
            result,
            Err(TransactionError::InsufficientFunds {
                needed: dec!(2500),
                available: dec!(950),
            })
        );
        assert_eq!(farmer.state(), before);
    }

    #[test]
    fn test_buy_feed_exact_budget_and_rounding() {
        let mut farmer = default_farmer();
        assert!(farmer.buy_feed(dec!(3), dec!(4.333)).is_ok());
        // 12.999 rounds to 13.00
        assert_eq!(farmer.state().money, dec!(987));

        assert!(farmer.buy_feed(dec!(197.4), dec!(5)).is_ok());
        assert_eq!(farmer.state().money, dec!(0));
    }

    #[test]
    fn test_buy_feed_rejects_negative_amount() {
        let mut farmer = default_farmer();
        let before = farmer.state();
        assert_eq!(
            farmer.buy_feed(dec!(-5), dec!(5)),
            Err(TransactionError::InvalidAmount(dec!(-5)))
        );
        assert_eq!(farmer.state(), before);
    }

    #[test]
    fn test_buy_pigs_respects_capacity() {
        let mut farmer = default_farmer();

        assert!(farmer.buy_pigs(3, dec!(250)).is_ok());
        assert_eq!(farmer.state().fattening_pigs, 5);
        assert_eq!(farmer.state().money, dec!(250));

        let before = farmer.state();
        assert_eq!(
            farmer.buy_pigs(1, dec!(10)),
            Err(TransactionError::PenFull {
                requested: 6,
                capacity: 5
            })
        );
        assert_eq!(farmer.state(), before);
    }

    #[test]
    fn test_buy_pigs_insufficient_funds() {
        let mut farmer = default_farmer();
        let before = farmer.state();
        assert!(matches!(
            farmer.buy_pigs(3, dec!(400)),
            Err(TransactionError::InsufficientFunds { .. })
        ));
        assert_eq!(farmer.state(), before);
    }

    #[test]
    fn test_sell_pigs() {
        let mut farmer = herd(0, 3, dec!(10));

        assert!(farmer.sell_pigs(2, dec!(2000)).is_ok());
        assert_eq!(farmer.state().ready_pigs, 1);
        assert_eq!(farmer.state().money, dec!(5000));

        let before = farmer.state();
        assert_eq!(
            farmer.sell_pigs(2, dec!(2000)),
            Err(TransactionError::NotEnoughReadyPigs {
                requested: 2,
                available: 1
            })
        );
        assert_eq!(farmer.state(), before);
    }

    #[test]
    fn test_upgrade_pen() {
        let mut farmer = default_farmer();
        assert!(farmer.upgrade_pen().is_ok());
        assert_eq!(farmer.state().money, dec!(0));
        assert_eq!(farmer.state().max_pigs, 10);

        let before = farmer.state();
        assert!(farmer.upgrade_pen().is_err());
        assert_eq!(farmer.state(), before);
    }

    #[test]
    fn test_pass_day_small_herd_does_not_mature() {
        let mut farmer = default_farmer();
        let report = farmer.pass_day(GrowthGate::Unconditional);

        assert_eq!(report.feed_consumed, dec!(4));
        assert_eq!(report.pigs_matured, 0);
        let state = farmer.state();
        assert_eq!(state.feed_consumption, dec!(4));
        assert_eq!(state.feed_stock, dec!(46));
        assert_eq!(state.fattening_pigs, 2);
        assert_eq!(state.ready_pigs, 0);
    }

    #[test]
    fn test_pass_day_twenty_percent_matures() {
        let mut farmer = herd(10, 1, dec!(100));
        let report = farmer.pass_day(GrowthGate::Unconditional);

        assert_eq!(report.feed_consumed, dec!(22));
        assert_eq!(report.pigs_matured, 2);
        assert_eq!(farmer.state().feed_stock, dec!(78));
        assert_eq!(farmer.state().fattening_pigs, 8);
        assert_eq!(farmer.state().ready_pigs, 3);
    }

    #[test]
    fn test_pass_day_feed_shortage() {
        let mut unconditional = herd(10, 0, dec!(5));
        let report = unconditional.pass_day(GrowthGate::Unconditional);
        assert_eq!(report.feed_consumed, dec!(5));
        assert!(report.was_underfed());
        assert_eq!(unconditional.state().feed_stock, dec!(0));
        assert_eq!(unconditional.state().ready_pigs, 2);

        let mut gated = herd(10, 0, dec!(5));
        let report = gated.pass_day(GrowthGate::FeedGated);
        assert_eq!(report.pigs_matured, 0);
        assert_eq!(gated.state().fattening_pigs, 10);
        assert_eq!(gated.state().feed_stock, dec!(0));
    }

    #[test]
    fn test_pass_day_feed_gated_grows_when_fed() {
        let mut farmer = herd(10, 0, dec!(20));
        let report = farmer.pass_day(GrowthGate::FeedGated);
        assert_eq!(report.pigs_matured, 2);
        assert_eq!(farmer.state().feed_stock, dec!(0));
    }

    #[test]
    fn test_apply_effect_clamps_counts_not_money() {
        let mut farmer = herd(1, 0, dec!(10));
        farmer.apply_effect(&EffectDeltas {
            money: dec!(-1500),
            feed_stock: dec!(-20),
            fattening_pigs: -3,
            ready_pigs: 2,
        });

        let state = farmer.state();
        assert_eq!(state.money, dec!(-500));
        assert_eq!(state.feed_stock, dec!(0));
        assert_eq!(state.fattening_pigs, 0);
        assert_eq!(state.ready_pigs, 2);
    }

    #[test]
    fn test_max_affordable_and_buyable() {
        let farmer = default_farmer();
        assert_eq!(farmer.max_affordable_feed(dec!(4.8)), 208);
        assert_eq!(farmer.max_buyable_pigs(dec!(250)), 3);
        assert_eq!(farmer.max_buyable_pigs(dec!(600)), 1);

        let full = farmer_with(FarmStart {
            fattening_pigs: 5,
            ..FarmStart::default()
        });
        assert_eq!(full.max_buyable_pigs(dec!(1)), 0);
    }

    #[test]
    fn test_state_is_a_copy() {
        let farmer = default_farmer();
        let mut copy = farmer.state();
        copy.money = dec!(0);
        assert_eq!(farmer.state().money, dec!(1000));
    }
}
