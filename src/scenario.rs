//! Scenario configuration: starting farm, market parameters and the rule
//! variants a game is played under.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub rules: Rules,
    pub market: MarketConfig,
    pub start: FarmStart,
    pub random_seed: Option<u64>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new("classic".to_string())
    }
}

/// Whether fattening pigs need a full ration to mature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthGate {
    /// A share of the fattening herd matures every day, fed or not.
    #[default]
    Unconditional,
    /// Nothing matures on a day the feed stock could not cover the herd.
    FeedGated,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PorkPricing {
    /// Perturbed around a constant base every day.
    #[default]
    Fixed,
    /// Pigs sold since the last update push the next day's base down by
    /// `elasticity` per pig, never below `floor * base`.
    DemandDriven { elasticity: Decimal, floor: Decimal },
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PigletPricing {
    /// Perturbed around its own base, then clamped into the band.
    #[default]
    Fixed,
    /// Today's pork price times `pork_multiplier`, clamped into the band.
    Derived { pork_multiplier: Decimal },
}

/// How generated events reach the farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Events wait in the log until the player resolves them.
    #[default]
    Manual,
    /// Effects are applied the moment an event is generated.
    AutoApply,
}

/// What happens to unresolved events when a new day starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryPolicy {
    #[default]
    Persist,
    /// Events left unresolved from an earlier day expire at the next
    /// day-advance and can no longer be resolved.
    NextDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub feed_per_pig_per_day: Decimal,
    /// Fraction of the fattening herd that matures each day (floored).
    pub growth_rate: Decimal,
    pub growth_gate: GrowthGate,
    pub pen_upgrade_cost: Decimal,
    pub pen_upgrade_increment: u32,
    /// Assumed live weight of a sold pig, used to turn the per-kg pork price
    /// into revenue per head.
    pub market_weight_kg: Decimal,
    pub events_per_day: usize,
    pub resolution: ResolutionMode,
    pub expiry: ExpiryPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            feed_per_pig_per_day: dec!(2),
            growth_rate: dec!(0.2),
            growth_gate: GrowthGate::default(),
            pen_upgrade_cost: dec!(1000),
            pen_upgrade_increment: 5,
            market_weight_kg: dec!(100),
            events_per_day: 2,
            resolution: ResolutionMode::default(),
            expiry: ExpiryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub base_pork_price: Decimal,
    pub base_feed_price: Decimal,
    pub base_piglet_price: Decimal,
    /// Maximum daily deviation from base, as a fraction of base.
    pub fluctuation: Decimal,
    pub piglet_min: Decimal,
    pub piglet_max: Decimal,
    pub pork_pricing: PorkPricing,
    pub piglet_pricing: PigletPricing,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_pork_price: dec!(20),
            base_feed_price: dec!(5),
            base_piglet_price: dec!(250),
            fluctuation: dec!(0.2),
            piglet_min: dec!(200),
            piglet_max: dec!(300),
            pork_pricing: PorkPricing::default(),
            piglet_pricing: PigletPricing::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmStart {
    pub money: Decimal,
    pub feed_stock: Decimal,
    pub fattening_pigs: u32,
    pub ready_pigs: u32,
    pub max_pigs: u32,
}

impl Default for FarmStart {
    fn default() -> Self {
        Self {
            money: dec!(1000),
            feed_stock: dec!(50),
            fattening_pigs: 2,
            ready_pigs: 0,
            max_pigs: 5,
        }
    }
}

impl Scenario {
    pub fn new(name: String) -> Self {
        Self {
            name,
            description: String::new(),
            rules: Rules::default(),
            market: MarketConfig::default(),
            start: FarmStart::default(),
            random_seed: None,
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from YAML (`.yaml`/`.yml`) or JSON (anything else).
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let scenario: Self = if is_yaml {
            serde_yaml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };
        scenario.validate().map_err(ConfigError::Invalid)?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), String> {
        let market = &self.market;
        for (label, price) in [
            ("pork", market.base_pork_price),
            ("feed", market.base_feed_price),
            ("piglet", market.base_piglet_price),
        ] {
            if price <= Decimal::ZERO {
                return Err(format!("Base {} price must be positive, got {}", label, price));
            }
        }
        if market.piglet_min > market.piglet_max {
            return Err(format!(
                "Piglet price band is inverted: {} > {}",
                market.piglet_min, market.piglet_max
            ));
        }
        if market.fluctuation < Decimal::ZERO || market.fluctuation >= Decimal::ONE {
            return Err(format!(
                "Fluctuation must be in [0, 1), got {}",
                market.fluctuation
            ));
        }
        if let PorkPricing::DemandDriven { elasticity, floor } = market.pork_pricing {
            if elasticity < Decimal::ZERO || floor <= Decimal::ZERO || floor > Decimal::ONE {
                return Err("Demand-driven pricing needs elasticity >= 0 and floor in (0, 1]".to_string());
            }
        }
        if let PigletPricing::Derived { pork_multiplier } = market.piglet_pricing {
            if pork_multiplier <= Decimal::ZERO {
                return Err("Derived piglet pricing needs a positive pork multiplier".to_string());
            }
        }

        let rules = &self.rules;
        if rules.growth_rate < Decimal::ZERO || rules.growth_rate > Decimal::ONE {
            return Err(format!("Growth rate must be in [0, 1], got {}", rules.growth_rate));
        }
        if rules.feed_per_pig_per_day < Decimal::ZERO {
            return Err("Feed per pig cannot be negative".to_string());
        }
        if rules.market_weight_kg <= Decimal::ZERO {
            return Err("Market weight must be positive".to_string());
        }

        let start = &self.start;
        if start.fattening_pigs.saturating_add(start.ready_pigs) > start.max_pigs {
            return Err(format!(
                "Starting herd ({} + {}) exceeds pen capacity {}",
                start.fattening_pigs, start.ready_pigs, start.max_pigs
            ));
        }
        if start.feed_stock < Decimal::ZERO {
            return Err("Starting feed stock cannot be negative".to_string());
        }

        Ok(())
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scenario: {}", self.name)?;
        if !self.description.is_empty() {
            writeln!(f, "Description: {}", self.description)?;
        }
        writeln!(f, "\nRules:")?;
        writeln!(
            f,
            "  Feed per pig: {}/day, growth {}% ({:?})",
            self.rules.feed_per_pig_per_day,
            self.rules.growth_rate * dec!(100),
            self.rules.growth_gate
        )?;
        writeln!(
            f,
            "  Pen upgrade: {} for +{} places",
            self.rules.pen_upgrade_cost, self.rules.pen_upgrade_increment
        )?;
        writeln!(
            f,
            "  Events: {} draws/day, {:?} resolution, {:?} expiry",
            self.rules.events_per_day, self.rules.resolution, self.rules.expiry
        )?;
        writeln!(f, "\nMarket:")?;
        writeln!(
            f,
            "  Base prices: pork {}/kg, feed {}/unit, piglet {}/head (+/-{}%)",
            self.market.base_pork_price,
            self.market.base_feed_price,
            self.market.base_piglet_price,
            self.market.fluctuation * dec!(100)
        )?;
        writeln!(
            f,
            "  Piglet band: {} - {}",
            self.market.piglet_min, self.market.piglet_max
        )?;
        writeln!(f, "  Pork pricing: {:?}", self.market.pork_pricing)?;
        writeln!(f, "  Piglet pricing: {:?}", self.market.piglet_pricing)?;
        writeln!(f, "\nStart:")?;
        write!(
            f,
            "  Money {}, feed {}, pigs {}+{} of {}",
            self.start.money,
            self.start.feed_stock,
            self.start.fattening_pigs,
            self.start.ready_pigs,
            self.start.max_pigs
        )
    }
}

pub fn create_standard_scenarios() -> HashMap<String, Scenario> {
    let mut scenarios = HashMap::new();

    let mut classic = Scenario::new("classic".to_string());
    classic.description = "Default farm, fixed prices around base, manual events".to_string();
    scenarios.insert("classic".to_string(), classic);

    let mut feed_gated = Scenario::new("feed_gated".to_string());
    feed_gated.description = "Pigs only mature on days they are fully fed".to_string();
    feed_gated.rules.growth_gate = GrowthGate::FeedGated;
    scenarios.insert("feed_gated".to_string(), feed_gated);

    let mut volatile = Scenario::new("volatile".to_string());
    volatile.description =
        "Wider price swings, pork reacts to supply, piglets track pork".to_string();
    volatile.market.fluctuation = dec!(0.35);
    volatile.market.pork_pricing = PorkPricing::DemandDriven {
        elasticity: dec!(0.02),
        floor: dec!(0.6),
    };
    volatile.market.piglet_pricing = PigletPricing::Derived {
        pork_multiplier: dec!(12.5),
    };
    scenarios.insert("volatile".to_string(), volatile);

    let mut hard_times = Scenario::new("hard_times".to_string());
    hard_times.description =
        "Tight budget, feed-gated growth, unresolved events expire overnight".to_string();
    hard_times.start.money = dec!(600);
    hard_times.start.feed_stock = dec!(20);
    hard_times.rules.growth_gate = GrowthGate::FeedGated;
    hard_times.rules.expiry = ExpiryPolicy::NextDay;
    scenarios.insert("hard_times".to_string(), hard_times);

    let mut auto_events = Scenario::new("auto_events".to_string());
    auto_events.description = "Event effects hit the farm as soon as they happen".to_string();
    auto_events.rules.resolution = ResolutionMode::AutoApply;
    scenarios.insert("auto_events".to_string(), auto_events);

    scenarios
}
