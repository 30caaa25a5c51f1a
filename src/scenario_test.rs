#[cfg(test)]
mod tests {
    use super::super::scenario::*;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pig_farm_scenario_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Scenario::default();
        assert_eq!(scenario.name, "classic");
        assert_eq!(scenario.rules.feed_per_pig_per_day, dec!(2));
        assert_eq!(scenario.rules.growth_rate, dec!(0.2));
        assert_eq!(scenario.rules.growth_gate, GrowthGate::Unconditional);
        assert_eq!(scenario.rules.events_per_day, 2);
        assert_eq!(scenario.market.piglet_min, dec!(200));
        assert_eq!(scenario.market.piglet_max, dec!(300));
        assert_eq!(scenario.start.money, dec!(1000));
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_scenario_validation() {
        let mut scenario = Scenario::new("invalid".to_string());

        scenario.market.piglet_min = dec!(400);
        assert!(scenario.validate().is_err());
        scenario.market.piglet_min = dec!(200);

        scenario.market.base_feed_price = dec!(0);
        assert!(scenario.validate().is_err());
        scenario.market.base_feed_price = dec!(5);

        scenario.start.fattening_pigs = 6;
        assert!(scenario.validate().is_err());
        scenario.start.fattening_pigs = 2;

        scenario.market.pork_pricing = PorkPricing::DemandDriven {
            elasticity: dec!(0.05),
            floor: dec!(1.5),
        };
        assert!(scenario.validate().is_err());
        scenario.market.pork_pricing = PorkPricing::Fixed;

        scenario.rules.growth_rate = dec!(1.2);
        assert!(scenario.validate().is_err());
        scenario.rules.growth_rate = dec!(0.2);

        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_standard_scenarios() {
        let scenarios = create_standard_scenarios();
        for name in ["classic", "feed_gated", "volatile", "hard_times", "auto_events"] {
            let scenario = scenarios.get(name).unwrap();
            assert_eq!(scenario.name, name);
            assert!(scenario.validate().is_ok(), "{} should validate", name);
        }

        let hard = &scenarios["hard_times"];
        assert_eq!(hard.rules.growth_gate, GrowthGate::FeedGated);
        assert_eq!(hard.rules.expiry, ExpiryPolicy::NextDay);
        assert_eq!(scenarios["auto_events"].rules.resolution, ResolutionMode::AutoApply);
    }

    #[test]
    fn test_scenario_file_round_trip() {
        let path = temp_path("volatile.json");
        let scenario = create_standard_scenarios().remove("volatile").unwrap();
        scenario.save_to_file(&path).unwrap();

        let loaded = Scenario::load_from_file(&path).unwrap();
        assert_eq!(loaded.name, "volatile");
        assert_eq!(loaded.market.fluctuation, dec!(0.35));
        assert_eq!(loaded.market.pork_pricing, scenario.market.pork_pricing);
        assert_eq!(loaded.market.piglet_pricing, scenario.market.piglet_pricing);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_partial_yaml_scenario() {
        let path = temp_path("tight.yaml");
        let yaml = "\
name: tight
random_seed: 7
start:
  money: 300
rules:
  growth_gate: feed_gated
  expiry: next_day
market:
  piglet_pricing:
    model: derived
    pork_multiplier: 12
";
        std::fs::write(&path, yaml).unwrap();

        let scenario = Scenario::load_from_file(&path).unwrap();
        assert_eq!(scenario.name, "tight");
        assert_eq!(scenario.random_seed, Some(7));
        assert_eq!(scenario.start.money, dec!(300));
        assert_eq!(scenario.start.feed_stock, dec!(50));
        assert_eq!(scenario.rules.growth_gate, GrowthGate::FeedGated);
        assert_eq!(scenario.rules.expiry, ExpiryPolicy::NextDay);
        assert_eq!(
            scenario.market.piglet_pricing,
            PigletPricing::Derived {
                pork_multiplier: dec!(12)
            }
        );
        assert_eq!(scenario.market.base_pork_price, dec!(20));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_scenario_file_is_rejected() {
        let path = temp_path("inverted.json");
        std::fs::write(&path, r#"{"market": {"piglet_min": "350"}}"#).unwrap();
        assert!(matches!(
            Scenario::load_from_file(&path),
            Err(ConfigError::Invalid(_))
        ));
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            Scenario::load_from_file(&temp_path("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_scenario_display() {
        let scenario = create_standard_scenarios().remove("hard_times").unwrap();
        let text = scenario.to_string();
        assert!(text.starts_with("Scenario: hard_times"));
        assert!(text.contains("Piglet band: 200 - 300"));
        assert!(text.contains("Money 600"));
    }
}
