//! Autopilot players for unattended runs.
//!
//! A strategy looks at the current [`GameSnapshot`] and returns the actions
//! it wants to take before the day ends. Strategies plan against projected
//! cash, but the game remains the authority: any action it rejects is simply
//! journaled and skipped.
//!
//! # Strategy Types
//!
//! - **Idle**: does nothing, a baseline for comparing runs
//! - **Steady**: sells every ready pig, resolves events, keeps a feed buffer
//!   and fills the pen with piglets
//! - **Expansion**: steady, plus pen upgrades whenever the pen is full and
//!   cash allows

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::game::{Action, GameSnapshot};
use crate::money::{round2, total_cost, whole_units};
use crate::scenario::Rules;

// === HELPER FUNCTIONS ===

/// Feed needed to keep `herd` pigs fed for `days` days.
fn feed_target(herd: u32, feed_per_pig: Decimal, days: u32) -> Decimal {
    round2(Decimal::from(herd) * feed_per_pig * Decimal::from(days))
}

/// Whole feed units to buy to reach `target`, bounded by `budget`.
fn feed_to_buy(current: Decimal, target: Decimal, budget: Decimal, unit_price: Decimal) -> Decimal {
    let shortfall = (target - current).max(Decimal::ZERO).ceil();
    let affordable = Decimal::from(whole_units(budget, unit_price));
    shortfall.min(affordable)
}

pub trait Strategy {
    /// Actions to take today, in order.
    fn decide(&self, snapshot: &GameSnapshot, rules: &Rules) -> Vec<Action>;

    fn name(&self) -> &str;
}

pub struct IdleStrategy;

impl Strategy for IdleStrategy {
    fn decide(&self, _snapshot: &GameSnapshot, _rules: &Rules) -> Vec<Action> {
        Vec::new()
    }

    fn name(&self) -> &str {
        "Idle"
    }
}

// === STEADY STRATEGY ===
/// Keeps the farm running at its current size.
///
/// # Parameters
/// - `feed_buffer_days`: days of feed to hold for the whole herd (default 5)
/// - `cash_reserve`: money never spent on piglets or feed (default 100)
pub struct SteadyStrategy {
    feed_buffer_days: u32,
    cash_reserve: Decimal,
}

impl SteadyStrategy {
    pub fn new(feed_buffer_days: u32, cash_reserve: Decimal) -> Self {
        Self {
            feed_buffer_days,
            cash_reserve,
        }
    }

    /// Sell, resolve, optionally upgrade, then restock against projected cash.
    fn plan(&self, snapshot: &GameSnapshot, rules: &Rules, upgrade: bool) -> Vec<Action> {
        let farmer = &snapshot.farmer;
        let market = &snapshot.market;
        let mut actions = Vec::new();
        let mut cash = farmer.money;
        let mut capacity = farmer.max_pigs;

        if farmer.ready_pigs > 0 {
            actions.push(Action::SellPigs(farmer.ready_pigs));
            let revenue_per_pig = round2(market.pork_price * rules.market_weight_kg);
            cash += total_cost(Decimal::from(farmer.ready_pigs), revenue_per_pig);
        }
        let mut herd = farmer.fattening_pigs;

        for event in snapshot.unresolved_events() {
            actions.push(Action::ResolveEvent(event.id));
            if let Some(effect) = event.effect {
                cash += effect.money.unwrap_or(Decimal::ZERO);
            }
        }

        if upgrade && herd >= capacity && cash >= rules.pen_upgrade_cost + self.cash_reserve {
            actions.push(Action::UpgradePen);
            cash -= rules.pen_upgrade_cost;
            capacity = capacity.saturating_add(rules.pen_upgrade_increment);
        }

        // Each new piglet must come with its share of the feed buffer.
        let buffer_per_pig = feed_target(1, rules.feed_per_pig_per_day, self.feed_buffer_days);
        let cost_per_piglet = market.piglet_price + total_cost(buffer_per_pig, market.feed_price);
        let spendable = cash - self.cash_reserve - total_cost(
            (feed_target(herd, rules.feed_per_pig_per_day, self.feed_buffer_days) - farmer.feed_stock)
                .max(Decimal::ZERO),
            market.feed_price,
        );
        let piglets = whole_units(spendable, cost_per_piglet).min(capacity.saturating_sub(herd));
        if piglets > 0 {
            actions.push(Action::BuyPiglets(piglets));
            cash -= total_cost(Decimal::from(piglets), market.piglet_price);
            herd += piglets;
        }

        let target = feed_target(herd, rules.feed_per_pig_per_day, self.feed_buffer_days);
        let feed = feed_to_buy(farmer.feed_stock, target, cash - self.cash_reserve, market.feed_price);
        if feed > Decimal::ZERO {
            actions.push(Action::BuyFeed(feed));
        }

        actions
    }
}

impl Default for SteadyStrategy {
    fn default() -> Self {
        Self::new(5, dec!(100))
    }
}

impl Strategy for SteadyStrategy {
    fn decide(&self, snapshot: &GameSnapshot, rules: &Rules) -> Vec<Action> {
        self.plan(snapshot, rules, false)
    }

    fn name(&self) -> &str {
        "Steady"
    }
}

// === EXPANSION STRATEGY ===
/// Steady play that also buys pen upgrades once the pen is full and the
/// upgrade leaves the cash reserve intact.
pub struct ExpansionStrategy {
    steady: SteadyStrategy,
}

impl ExpansionStrategy {
    pub fn new(feed_buffer_days: u32, cash_reserve: Decimal) -> Self {
        Self {
            steady: SteadyStrategy::new(feed_buffer_days, cash_reserve),
        }
    }
}

impl Default for ExpansionStrategy {
    fn default() -> Self {
        Self::new(5, dec!(200))
    }
}

impl Strategy for ExpansionStrategy {
    fn decide(&self, snapshot: &GameSnapshot, rules: &Rules) -> Vec<Action> {
        self.steady.plan(snapshot, rules, true)
    }

    fn name(&self) -> &str {
        "Expansion"
    }
}

pub const STRATEGY_NAMES: [&str; 3] = ["idle", "steady", "expansion"];

/// Create a strategy by name. Names are case-insensitive; unknown names
/// fall back to steady play.
pub fn create_strategy(name: &str) -> Box<dyn Strategy> {
    match name.to_lowercase().as_str() {
        "idle" => Box::new(IdleStrategy),
        "expansion" => Box::new(ExpansionStrategy::default()),
        _ => Box::new(SteadyStrategy::default()),
    }
}
