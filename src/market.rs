//! Commodity prices and their daily evolution.
//!
//! Prices are memoryless: every update perturbs a constant base value by a
//! symmetric random offset instead of walking from yesterday's price, so the
//! market has bounded volatility and no drift.

use log::debug;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::money::round2;
use crate::scenario::{MarketConfig, PigletPricing, PorkPricing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketState {
    /// Per kilogram.
    pub pork_price: Decimal,
    /// Per unit of feed.
    pub feed_price: Decimal,
    /// Per head.
    pub piglet_price: Decimal,
}

impl MarketState {
    pub fn at_base(config: &MarketConfig) -> Self {
        Self {
            pork_price: config.base_pork_price,
            feed_price: config.base_feed_price,
            piglet_price: config.base_piglet_price,
        }
    }
}

impl Default for MarketState {
    fn default() -> Self {
        Self::at_base(&MarketConfig::default())
    }
}

pub struct Market {
    config: MarketConfig,
    state: MarketState,
    /// Pigs sold since the last update, consumed by demand-driven pricing.
    sold_since_update: u32,
}

impl Market {
    pub fn new(config: MarketConfig) -> Self {
        let state = MarketState::at_base(&config);
        Self {
            config,
            state,
            sold_since_update: 0,
        }
    }

    pub fn state(&self) -> MarketState {
        self.state
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Replace the current prices, e.g. after loading a save. Non-positive
    /// prices fall back to the configured base. Sales recorded before the
    /// replacement no longer weigh on the next update.
    pub fn set_state(&mut self, state: MarketState) {
        let base = MarketState::at_base(&self.config);
        let positive_or = |price: Decimal, fallback: Decimal| {
            if price > Decimal::ZERO { price } else { fallback }
        };
        self.state = MarketState {
            pork_price: positive_or(state.pork_price, base.pork_price),
            feed_price: positive_or(state.feed_price, base.feed_price),
            piglet_price: positive_or(state.piglet_price, base.piglet_price),
        };
        self.sold_since_update = 0;
    }

    pub fn record_sale(&mut self, pigs: u32) {
        self.sold_since_update = self.sold_since_update.saturating_add(pigs);
    }

    /// Revenue for one pig of `market_weight_kg` at today's pork price.
    pub fn revenue_per_pig(&self, market_weight_kg: Decimal) -> Decimal {
        round2(self.state.pork_price * market_weight_kg)
    }

    /// Daily price update. Each price is drawn independently.
    pub fn update_market<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let config = &self.config;

        let pork_base = match config.pork_pricing {
            PorkPricing::Fixed => config.base_pork_price,
            PorkPricing::DemandDriven { elasticity, floor } => {
                let pressure = Decimal::ONE - elasticity * Decimal::from(self.sold_since_update);
                let floor_price = config.base_pork_price * floor;
                round2((config.base_pork_price * pressure).max(floor_price))
            }
        };
        let pork_price = perturb(rng, pork_base, config.fluctuation);
        let feed_price = perturb(rng, config.base_feed_price, config.fluctuation);

        let raw_piglet = match config.piglet_pricing {
            PigletPricing::Fixed => perturb(rng, config.base_piglet_price, config.fluctuation),
            PigletPricing::Derived { pork_multiplier } => round2(pork_price * pork_multiplier),
        };
        // Upper bound wins on an inverted band.
        let piglet_price = raw_piglet.max(config.piglet_min).min(config.piglet_max);

        self.state = MarketState {
            pork_price,
            feed_price,
            piglet_price,
        };
        self.sold_since_update = 0;

        debug!(
            "Market updated: pork {} feed {} piglet {}",
            pork_price, feed_price, piglet_price
        );
    }

    pub fn market_summary(&self) -> String {
        format!(
            "Pork: ¥{:.2}/kg, Feed: ¥{:.2}/unit, Piglets: ¥{:.2}/head",
            self.state.pork_price, self.state.feed_price, self.state.piglet_price
        )
    }
}

/// `base + uniform(-base * fluctuation, +base * fluctuation)`, drawn on the
/// cent grid so the result is already rounded to two places.
fn perturb<R: Rng + ?Sized>(rng: &mut R, base: Decimal, fluctuation: Decimal) -> Decimal {
    let variation_cents = (round2(base * fluctuation) * Decimal::ONE_HUNDRED)
        .abs()
        .to_i64()
        .unwrap_or(0);
    let offset_cents = rng.random_range(-variation_cents..=variation_cents);
    round2(base + Decimal::new(offset_cents, 2))
}
