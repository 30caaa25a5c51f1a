use rand::RngCore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::events::{EventEffect, EventKind, EventManager, EventTemplate};
use crate::farmer::Farmer;
use crate::game::GameState;
use crate::scenario::{FarmStart, Rules, Scenario};

/// Replays a fixed cycle of unit-interval draws, so `rng.random::<f64>()`
/// returns exactly the listed values (for values representable in 53 bits).
pub struct FixedRng {
    words: Vec<u64>,
    next: usize,
}

impl FixedRng {
    pub fn new(draws: &[f64]) -> Self {
        let words = draws
            .iter()
            .map(|d| ((d * (1u64 << 53) as f64) as u64) << 11)
            .collect();
        Self { words, next: 0 }
    }
}

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let word = self.words[self.next % self.words.len()];
        self.next += 1;
        word
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

pub fn farmer_with(start: FarmStart) -> Farmer {
    Farmer::new(&start, &Rules::default())
}

pub fn default_farmer() -> Farmer {
    farmer_with(FarmStart::default())
}

/// A catalog whose single template fires on every draw.
pub fn certain_events(money: Decimal) -> EventManager {
    EventManager::with_catalog(vec![EventTemplate {
        title: "Lucky day".to_string(),
        description: "A neighbour pays back an old debt.".to_string(),
        kind: EventKind::Opportunity,
        probability: 1.0,
        effect: EventEffect {
            money: Some(money),
            ..EventEffect::default()
        },
    }])
}

/// Seeded game where every day brings `events_per_day` "Lucky day" events.
pub fn lucky_game(mut scenario: Scenario) -> GameState {
    scenario.random_seed = Some(17);
    GameState::new(&scenario).with_event_manager(certain_events(dec!(100)))
}
