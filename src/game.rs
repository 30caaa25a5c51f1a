//! The game orchestrator.
//!
//! [`GameState`] owns the farmer, the market, the event manager and the
//! random source, and is the only way to mutate any of them. Every operation
//! either commits completely or returns a [`TransactionError`] with nothing
//! changed. A day-advance always runs farmer tick, then market tick, then
//! event generation.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;
use crate::events::{EffectDeltas, EventId, EventManager, GameEvent};
use crate::farmer::{Farmer, FarmerState};
use crate::journal::{Journal, JournalKind};
use crate::market::{Market, MarketState};
use crate::persistence::{PersistError, SaveStore};
use crate::scenario::{ExpiryPolicy, ResolutionMode, Rules, Scenario};

pub const SNAPSHOT_VERSION: u32 = 1;
pub const MIN_GAME_SPEED: u8 = 1;
pub const MAX_GAME_SPEED: u8 = 5;
pub const MAX_VOLUME: u8 = 100;

/// The flattened game aggregate. This is what gets persisted and what a
/// presentation layer reads after each call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSnapshot {
    pub version: u32,
    pub day: u32,
    pub game_speed: u8,
    pub volume: u8,
    pub farmer: FarmerState,
    pub market: MarketState,
    pub events: Vec<GameEvent>,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            day: 1,
            game_speed: 3,
            volume: 50,
            farmer: FarmerState::default(),
            market: MarketState::default(),
            events: Vec::new(),
        }
    }
}

impl GameSnapshot {
    pub fn unresolved_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(|e| e.is_pending())
    }

    /// Clamp out-of-range settings. Returns the fixed snapshot and whether
    /// anything had to change.
    fn sanitized(mut self) -> (Self, bool) {
        let before = (self.day, self.game_speed, self.volume);
        self.day = self.day.max(1);
        self.game_speed = self.game_speed.clamp(MIN_GAME_SPEED, MAX_GAME_SPEED);
        self.volume = self.volume.min(MAX_VOLUME);
        let changed = before != (self.day, self.game_speed, self.volume);
        (self, changed)
    }
}

/// A single player decision, as issued by a strategy or a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    BuyFeed(Decimal),
    BuyPiglets(u32),
    SellPigs(u32),
    UpgradePen,
    ResolveEvent(EventId),
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::BuyFeed(_) => "buy feed",
            Action::BuyPiglets(_) => "buy piglets",
            Action::SellPigs(_) => "sell pigs",
            Action::UpgradePen => "upgrade pen",
            Action::ResolveEvent(_) => "resolve event",
        }
    }
}

pub struct GameState<R = StdRng> {
    rules: Rules,
    farmer: Farmer,
    market: Market,
    event_manager: EventManager,
    events: Vec<GameEvent>,
    day: u32,
    game_speed: u8,
    volume: u8,
    rng: R,
    journal: Journal,
}

impl GameState<StdRng> {
    /// New game from a scenario, seeded from `random_seed` when present.
    pub fn new(scenario: &Scenario) -> Self {
        let rng = match scenario.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(scenario, rng)
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(scenario: &Scenario, rng: R) -> Self {
        let defaults = GameSnapshot::default();
        Self {
            rules: scenario.rules.clone(),
            farmer: Farmer::new(&scenario.start, &scenario.rules),
            market: Market::new(scenario.market.clone()),
            event_manager: EventManager::new(),
            events: Vec::new(),
            day: defaults.day,
            game_speed: defaults.game_speed,
            volume: defaults.volume,
            rng,
            journal: Journal::new(),
        }
    }

    /// Swap in a different event catalog.
    pub fn with_event_manager(mut self, event_manager: EventManager) -> Self {
        self.event_manager = event_manager;
        self.event_manager.reseed_ids(&self.events);
        self
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn game_speed(&self) -> u8 {
        self.game_speed
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn farmer_state(&self) -> FarmerState {
        self.farmer.state()
    }

    pub fn market_state(&self) -> MarketState {
        self.market.state()
    }

    pub fn market_summary(&self) -> String {
        self.market.market_summary()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn unresolved_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(|e| e.is_pending())
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Hand the journal to the caller and start a fresh one.
    pub fn take_journal(&mut self) -> Journal {
        std::mem::take(&mut self.journal)
    }

    pub fn set_game_speed(&mut self, speed: u8) {
        self.game_speed = speed.clamp(MIN_GAME_SPEED, MAX_GAME_SPEED);
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
    }

    pub fn revenue_per_pig(&self) -> Decimal {
        self.market.revenue_per_pig(self.rules.market_weight_kg)
    }

    pub fn max_affordable_feed(&self) -> u32 {
        self.farmer.max_affordable_feed(self.market.state().feed_price)
    }

    pub fn max_buyable_pigs(&self) -> u32 {
        self.farmer.max_buyable_pigs(self.market.state().piglet_price)
    }

    fn reject(&mut self, action: &str, err: TransactionError) -> TransactionError {
        debug!("Day {}: {} rejected: {}", self.day, action, err);
        self.journal.log(
            self.day,
            JournalKind::TransactionRejected {
                action: action.to_string(),
                reason: err.to_string(),
            },
        );
        err
    }

    pub fn farmer_buy_feed(&mut self, amount: Decimal) -> Result<(), TransactionError> {
        let unit_price = self.market.state().feed_price;
        let before = self.farmer.state().money;
        match self.farmer.buy_feed(amount, unit_price) {
            Ok(()) => {
                let total = before - self.farmer.state().money;
                self.journal.log(
                    self.day,
                    JournalKind::FeedBought {
                        amount,
                        unit_price,
                        total,
                    },
                );
                Ok(())
            }
            Err(err) => Err(self.reject("buy feed", err)),
        }
    }

    pub fn farmer_buy_pigs(&mut self, count: u32) -> Result<(), TransactionError> {
        let unit_price = self.market.state().piglet_price;
        let before = self.farmer.state().money;
        match self.farmer.buy_pigs(count, unit_price) {
            Ok(()) => {
                let total = before - self.farmer.state().money;
                self.journal.log(
                    self.day,
                    JournalKind::PigletsBought {
                        count,
                        unit_price,
                        total,
                    },
                );
                Ok(())
            }
            Err(err) => Err(self.reject("buy piglets", err)),
        }
    }

    pub fn farmer_sell_pigs(&mut self, count: u32) -> Result<(), TransactionError> {
        let revenue_per_pig = self.revenue_per_pig();
        let before = self.farmer.state().money;
        match self.farmer.sell_pigs(count, revenue_per_pig) {
            Ok(()) => {
                self.market.record_sale(count);
                let total = self.farmer.state().money - before;
                self.journal.log(
                    self.day,
                    JournalKind::PigsSold {
                        count,
                        revenue_per_pig,
                        total,
                    },
                );
                Ok(())
            }
            Err(err) => Err(self.reject("sell pigs", err)),
        }
    }

    pub fn farmer_upgrade_pen(&mut self) -> Result<(), TransactionError> {
        let cost = self.farmer.upgrade_cost();
        match self.farmer.upgrade_pen() {
            Ok(()) => {
                let capacity = self.farmer.state().max_pigs;
                self.journal
                    .log(self.day, JournalKind::PenUpgraded { cost, capacity });
                Ok(())
            }
            Err(err) => Err(self.reject("upgrade pen", err)),
        }
    }

    pub fn apply(&mut self, action: &Action) -> Result<(), TransactionError> {
        debug!("Day {}: {}", self.day, action.label());
        match action {
            Action::BuyFeed(amount) => self.farmer_buy_feed(*amount),
            Action::BuyPiglets(count) => self.farmer_buy_pigs(*count),
            Action::SellPigs(count) => self.farmer_sell_pigs(*count),
            Action::UpgradePen => self.farmer_upgrade_pen(),
            Action::ResolveEvent(id) => self.resolve_event(*id).map(|_| ()),
        }
    }

    /// Advance one day: farmer tick, market tick, then the day's events are
    /// appended to the log.
    pub fn pass_day(&mut self) {
        self.day = self.day.saturating_add(1);

        if self.rules.expiry == ExpiryPolicy::NextDay {
            self.expire_stale_events();
        }

        let report = self.farmer.pass_day(self.rules.growth_gate);
        let farmer = self.farmer.state();
        self.journal.log(
            self.day,
            JournalKind::DayPassed {
                feed_consumed: report.feed_consumed,
                feed_stock: farmer.feed_stock,
                pigs_matured: report.pigs_matured,
                underfed: report.was_underfed(),
            },
        );

        self.market.update_market(&mut self.rng);
        let prices = self.market.state();
        self.journal.log(
            self.day,
            JournalKind::MarketUpdated {
                pork_price: prices.pork_price,
                feed_price: prices.feed_price,
                piglet_price: prices.piglet_price,
            },
        );

        let new_events =
            self.event_manager
                .generate_daily_events(self.day, self.rules.events_per_day, &mut self.rng);
        for event in new_events {
            self.journal.log(
                self.day,
                JournalKind::EventGenerated {
                    event_id: event.id,
                    title: event.title.clone(),
                    event_kind: event.kind,
                },
            );
            let event = match self.rules.resolution {
                ResolutionMode::Manual => event,
                ResolutionMode::AutoApply => {
                    self.apply_event(&event);
                    self.event_manager.resolve_event(&event)
                }
            };
            self.events.push(event);
        }

        let farmer = self.farmer.state();
        info!(
            "Day {}: money {} feed {} pigs {}+{}/{} | {}",
            self.day,
            farmer.money,
            farmer.feed_stock,
            farmer.fattening_pigs,
            farmer.ready_pigs,
            farmer.max_pigs,
            self.market.market_summary()
        );
    }

    fn expire_stale_events(&mut self) {
        let today = self.day;
        for event in self.events.iter_mut() {
            if event.is_pending() && event.day < today {
                event.expired = true;
                self.journal
                    .log(today, JournalKind::EventExpired { event_id: event.id });
            }
        }
    }

    fn apply_event(&mut self, event: &GameEvent) -> EffectDeltas {
        let deltas = self.event_manager.apply_event_effect(event);
        self.farmer.apply_effect(&deltas);
        self.journal.log(
            self.day,
            JournalKind::EventResolved {
                event_id: event.id,
                money_delta: deltas.money,
                feed_delta: deltas.feed_stock,
                fattening_delta: deltas.fattening_pigs,
                ready_delta: deltas.ready_pigs,
            },
        );
        deltas
    }

    /// Apply a pending event's effect to the farm and mark it resolved.
    /// Resolving the same event twice fails the second time.
    pub fn resolve_event(&mut self, id: EventId) -> Result<EffectDeltas, TransactionError> {
        let Some(index) = self.events.iter().position(|e| e.id == id && e.is_pending()) else {
            let err = match self.events.iter().find(|e| e.id == id) {
                Some(event) if event.resolved => TransactionError::EventAlreadyResolved(id),
                Some(_) => TransactionError::EventExpired(id),
                None => TransactionError::UnknownEvent(id),
            };
            return Err(self.reject("resolve event", err));
        };

        let event = self.events[index].clone();
        let deltas = self.apply_event(&event);
        self.events[index] = self.event_manager.resolve_event(&event);
        Ok(deltas)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            day: self.day,
            game_speed: self.game_speed,
            volume: self.volume,
            farmer: self.farmer.state(),
            market: self.market.state(),
            events: self.events.clone(),
        }
    }

    /// Replace the whole game with a saved aggregate and re-seed the
    /// farmer, the market and the event id counter from it.
    pub fn load_snapshot(&mut self, snapshot: GameSnapshot) {
        let (snapshot, adjusted) = snapshot.sanitized();
        if adjusted {
            warn!("Loaded game had out-of-range settings; clamped");
        }
        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                "Loading snapshot version {} (current {})",
                snapshot.version, SNAPSHOT_VERSION
            );
        }

        self.day = snapshot.day;
        self.game_speed = snapshot.game_speed;
        self.volume = snapshot.volume;
        self.farmer.set_state(snapshot.farmer);
        self.market.set_state(snapshot.market);
        self.events = snapshot.events;
        let renumbered = self.event_manager.adopt_log(&mut self.events);
        if renumbered > 0 {
            warn!("Gave {} loaded events new ids", renumbered);
        }

        self.journal.log(
            self.day,
            JournalKind::GameLoaded {
                events: self.events.len(),
            },
        );
    }

    pub fn save(&self, store: &mut dyn SaveStore) -> Result<(), PersistError> {
        store.save(&self.snapshot())?;
        debug!("Saved game on day {}", self.day);
        Ok(())
    }

    /// Load the stored game, if any. Returns whether a game was loaded.
    pub fn restore(&mut self, store: &dyn SaveStore) -> Result<bool, PersistError> {
        match store.load()? {
            Some(snapshot) => {
                self.load_snapshot(snapshot);
                info!("Restored game at day {}", self.day);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
