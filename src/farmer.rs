//! The farm ledger: money, feed and herd counts, mutated only through
//! guarded all-or-nothing transactions.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;
use crate::events::EffectDeltas;
use crate::money::{apply_count_delta, round2, total_cost, whole_units};
use crate::scenario::{FarmStart, GrowthGate, Rules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmerState {
    pub money: Decimal,
    pub feed_stock: Decimal,
    /// Feed eaten on the most recent day.
    pub feed_consumption: Decimal,
    pub fattening_pigs: u32,
    pub ready_pigs: u32,
    pub max_pigs: u32,
}

impl FarmerState {
    pub fn from_start(start: &FarmStart, feed_per_pig: Decimal) -> Self {
        let herd = start.fattening_pigs.saturating_add(start.ready_pigs);
        Self {
            money: start.money,
            feed_stock: start.feed_stock,
            feed_consumption: round2(Decimal::from(herd) * feed_per_pig),
            fattening_pigs: start.fattening_pigs,
            ready_pigs: start.ready_pigs,
            max_pigs: start.max_pigs,
        }
    }

    pub fn total_pigs(&self) -> u32 {
        self.fattening_pigs.saturating_add(self.ready_pigs)
    }

    pub fn free_places(&self) -> u32 {
        self.max_pigs.saturating_sub(self.total_pigs())
    }
}

impl Default for FarmerState {
    fn default() -> Self {
        let rules = Rules::default();
        Self::from_start(&FarmStart::default(), rules.feed_per_pig_per_day)
    }
}

/// What happened to the herd during one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayReport {
    pub feed_consumed: Decimal,
    pub feed_required: Decimal,
    pub pigs_matured: u32,
}

impl DayReport {
    pub fn was_underfed(&self) -> bool {
        self.feed_consumed < self.feed_required
    }
}

pub struct Farmer {
    state: FarmerState,
    feed_per_pig: Decimal,
    growth_rate: Decimal,
    upgrade_cost: Decimal,
    upgrade_increment: u32,
}

impl Farmer {
    pub fn new(start: &FarmStart, rules: &Rules) -> Self {
        Self {
            state: FarmerState::from_start(start, rules.feed_per_pig_per_day),
            feed_per_pig: rules.feed_per_pig_per_day,
            growth_rate: rules.growth_rate,
            upgrade_cost: rules.pen_upgrade_cost,
            upgrade_increment: rules.pen_upgrade_increment,
        }
    }

    pub fn state(&self) -> FarmerState {
        self.state
    }

    pub fn set_state(&mut self, state: FarmerState) {
        self.state = FarmerState {
            feed_stock: state.feed_stock.max(Decimal::ZERO),
            feed_consumption: state.feed_consumption.max(Decimal::ZERO),
            ..state
        };
    }

    pub fn upgrade_cost(&self) -> Decimal {
        self.upgrade_cost
    }

    fn ensure_funds(&self, needed: Decimal) -> Result<(), TransactionError> {
        if self.state.money < needed {
            return Err(TransactionError::InsufficientFunds {
                needed,
                available: self.state.money,
            });
        }
        Ok(())
    }

    pub fn buy_feed(&mut self, amount: Decimal, price_per_unit: Decimal) -> Result<(), TransactionError> {
        if amount < Decimal::ZERO {
            return Err(TransactionError::InvalidAmount(amount));
        }
        let cost = total_cost(amount, price_per_unit);
        self.ensure_funds(cost)?;

        self.state.money = round2(self.state.money - cost);
        self.state.feed_stock = round2(self.state.feed_stock + amount);
        debug!("Bought {} feed for {}", amount, cost);
        Ok(())
    }

    pub fn buy_pigs(&mut self, count: u32, cost_per_pig: Decimal) -> Result<(), TransactionError> {
        let cost = total_cost(Decimal::from(count), cost_per_pig);
        self.ensure_funds(cost)?;

        let requested = self.state.total_pigs().saturating_add(count);
        if requested > self.state.max_pigs {
            return Err(TransactionError::PenFull {
                requested,
                capacity: self.state.max_pigs,
            });
        }

        self.state.money = round2(self.state.money - cost);
        self.state.fattening_pigs += count;
        debug!("Bought {} piglets for {}", count, cost);
        Ok(())
    }

    pub fn sell_pigs(&mut self, count: u32, revenue_per_pig: Decimal) -> Result<(), TransactionError> {
        if self.state.ready_pigs < count {
            return Err(TransactionError::NotEnoughReadyPigs {
                requested: count,
                available: self.state.ready_pigs,
            });
        }

        let revenue = total_cost(Decimal::from(count), revenue_per_pig);
        self.state.money = round2(self.state.money + revenue);
        self.state.ready_pigs -= count;
        debug!("Sold {} pigs for {}", count, revenue);
        Ok(())
    }

    pub fn upgrade_pen(&mut self) -> Result<(), TransactionError> {
        self.ensure_funds(self.upgrade_cost)?;

        self.state.money = round2(self.state.money - self.upgrade_cost);
        self.state.max_pigs = self.state.max_pigs.saturating_add(self.upgrade_increment);
        debug!("Pen upgraded to {} places", self.state.max_pigs);
        Ok(())
    }

    /// Daily tick: the herd eats, then part of the fattening herd matures.
    pub fn pass_day(&mut self, gate: GrowthGate) -> DayReport {
        let feed_required = round2(Decimal::from(self.state.total_pigs()) * self.feed_per_pig);
        let feed_consumed = round2(self.state.feed_stock.min(feed_required));
        self.state.feed_consumption = feed_consumed;
        self.state.feed_stock = round2(self.state.feed_stock - feed_consumed);

        let may_grow = match gate {
            GrowthGate::Unconditional => true,
            GrowthGate::FeedGated => feed_consumed >= feed_required,
        };

        let pigs_matured = if may_grow {
            (Decimal::from(self.state.fattening_pigs) * self.growth_rate)
                .floor()
                .to_u32()
                .unwrap_or(0)
                .min(self.state.fattening_pigs)
        } else {
            0
        };
        self.state.fattening_pigs -= pigs_matured;
        self.state.ready_pigs += pigs_matured;

        DayReport {
            feed_consumed,
            feed_required,
            pigs_matured,
        }
    }

    /// Apply event deltas. Money is not clamped; feed and herd counts
    /// never go below zero.
    pub fn apply_effect(&mut self, deltas: &EffectDeltas) {
        self.state.money = round2(self.state.money + deltas.money);
        self.state.feed_stock = round2((self.state.feed_stock + deltas.feed_stock).max(Decimal::ZERO));
        self.state.fattening_pigs = apply_count_delta(self.state.fattening_pigs, deltas.fattening_pigs);
        self.state.ready_pigs = apply_count_delta(self.state.ready_pigs, deltas.ready_pigs);
    }

    pub fn max_affordable_feed(&self, price_per_unit: Decimal) -> u32 {
        whole_units(self.state.money, price_per_unit)
    }

    /// Piglets that are both affordable and fit in the pen.
    pub fn max_buyable_pigs(&self, cost_per_pig: Decimal) -> u32 {
        whole_units(self.state.money, cost_per_pig).min(self.state.free_places())
    }
}
