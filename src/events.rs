//! Random farm events: a fixed catalog of templates, a weighted draw that
//! turns templates into dated events, and resolution bookkeeping.

use log::warn;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero is never handed out; a loaded event with id 0 had none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

/// Loaded ids above this leave too little room to keep counting; such a
/// log is renumbered.
const MAX_LOADED_ID: u64 = u64::MAX / 2;

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Info,
    Opportunity,
    Warning,
    Danger,
}

/// Optional deltas an event applies to the farm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEffect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_stock: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fattening_pigs: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_pigs: Option<i32>,
}

impl fmt::Display for EventEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(money) = self.money {
            parts.push(format!("money {:+}", money));
        }
        if let Some(feed) = self.feed_stock {
            parts.push(format!("feed {:+}", feed));
        }
        if let Some(pigs) = self.fattening_pigs {
            parts.push(format!("fattening pigs {:+}", pigs));
        }
        if let Some(pigs) = self.ready_pigs {
            parts.push(format!("ready pigs {:+}", pigs));
        }
        if parts.is_empty() {
            write!(f, "no effect")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// Effect deltas with every missing field filled in as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectDeltas {
    pub money: Decimal,
    pub feed_stock: Decimal,
    pub fattening_pigs: i32,
    pub ready_pigs: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameEvent {
    pub id: EventId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Day the event was generated on.
    pub day: u32,
    pub resolved: bool,
    pub expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<EventEffect>,
}

impl GameEvent {
    pub fn is_pending(&self) -> bool {
        !self.resolved && !self.expired
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[day {}] {} ({:?}): {}", self.day, self.title, self.kind, self.description)?;
        if let Some(effect) = &self.effect {
            write!(f, " [{}]", effect)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub title: String,
    pub description: String,
    pub kind: EventKind,
    /// Weight in [0, 1]. Weights across the catalog need not sum to 1.
    pub probability: f64,
    pub effect: EventEffect,
}

fn template(
    title: &str,
    description: &str,
    kind: EventKind,
    probability: f64,
    effect: EventEffect,
) -> EventTemplate {
    EventTemplate {
        title: title.to_string(),
        description: description.to_string(),
        kind,
        probability,
        effect,
    }
}

/// The built-in catalog. Order matters: earlier templates win small draws.
pub fn default_catalog() -> Vec<EventTemplate> {
    vec![
        template(
            "Market demand rising",
            "Pork demand is up lately and prices may follow.",
            EventKind::Opportunity,
            0.3,
            EventEffect {
                money: Some(dec!(100)),
                ..Default::default()
            },
        ),
        template(
            "Feed price swing",
            "Bad weather has made feed prices jumpy.",
            EventKind::Warning,
            0.25,
            EventEffect {
                money: Some(dec!(-50)),
                ..Default::default()
            },
        ),
        template(
            "Herd health problem",
            "Some pigs are sick and need extra feed and care.",
            EventKind::Danger,
            0.15,
            EventEffect {
                money: Some(dec!(-100)),
                feed_stock: Some(dec!(-20)),
                fattening_pigs: Some(-1),
                ..Default::default()
            },
        ),
        template(
            "Government subsidy",
            "A new hog farming subsidy has been paid out to you.",
            EventKind::Opportunity,
            0.1,
            EventEffect {
                money: Some(dec!(200)),
                ..Default::default()
            },
        ),
        template(
            "Technical training",
            "You attended a husbandry course and picked up new methods.",
            EventKind::Info,
            0.2,
            EventEffect {
                money: Some(dec!(-50)),
                fattening_pigs: Some(1),
                ..Default::default()
            },
        ),
        template(
            "New customer order",
            "A large pork order brings in extra income.",
            EventKind::Opportunity,
            0.15,
            EventEffect {
                money: Some(dec!(300)),
                ..Default::default()
            },
        ),
        template(
            "Equipment damage",
            "Some pen equipment broke and needs repair.",
            EventKind::Danger,
            0.1,
            EventEffect {
                money: Some(dec!(-150)),
                ..Default::default()
            },
        ),
        template(
            "Feed harvest",
            "A nearby feed mill had a bumper harvest.",
            EventKind::Info,
            0.2,
            EventEffect {
                money: Some(dec!(-50)),
                feed_stock: Some(dec!(30)),
                ..Default::default()
            },
        ),
    ]
}

pub struct EventManager {
    catalog: Vec<EventTemplate>,
    next_id: u64,
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EventManager {
    pub fn new() -> Self {
        Self::with_catalog(default_catalog())
    }

    pub fn with_catalog(catalog: Vec<EventTemplate>) -> Self {
        Self { catalog, next_id: 1 }
    }

    pub fn catalog(&self) -> &[EventTemplate] {
        &self.catalog
    }

    /// Continue numbering after the highest id already in `events`.
    pub fn reseed_ids(&mut self, events: &[GameEvent]) {
        let highest = events.iter().map(|e| e.id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(highest.saturating_add(1));
    }

    /// Take over a loaded event log: numbering restarts right after its
    /// highest id and events saved without an id get fresh ones. A log with
    /// ids too large to continue from is renumbered from 1. Returns how many
    /// events got a new id.
    pub fn adopt_log(&mut self, events: &mut [GameEvent]) -> usize {
        let highest = events.iter().map(|e| e.id.0).max().unwrap_or(0);
        if highest > MAX_LOADED_ID {
            warn!("Event ids up to {} leave no room; renumbering {} events", highest, events.len());
            self.next_id = 1;
            for event in events.iter_mut() {
                event.id = self.fresh_id();
            }
            return events.len();
        }

        self.next_id = highest + 1;
        let mut assigned = 0;
        for event in events.iter_mut().filter(|e| e.id.0 == 0) {
            event.id = self.fresh_id();
            assigned += 1;
        }
        assigned
    }

    fn fresh_id(&mut self) -> EventId {
        let id = EventId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// One weighted draw over the catalog. `None` when the draw lands past
    /// the catalog's total weight.
    pub fn generate_random_event<R: Rng + ?Sized>(&mut self, day: u32, rng: &mut R) -> Option<GameEvent> {
        let draw: f64 = rng.random();
        let mut cumulative = 0.0;

        let template = self.catalog.iter().find(|template| {
            cumulative += template.probability;
            draw <= cumulative
        })?;

        let (title, description, kind, effect) = (
            template.title.clone(),
            template.description.clone(),
            template.kind,
            template.effect,
        );
        Some(GameEvent {
            id: self.fresh_id(),
            title,
            description,
            kind,
            day,
            resolved: false,
            expired: false,
            effect: Some(effect),
        })
    }

    pub fn generate_daily_events<R: Rng + ?Sized>(
        &mut self,
        day: u32,
        count: usize,
        rng: &mut R,
    ) -> Vec<GameEvent> {
        (0..count)
            .filter_map(|_| self.generate_random_event(day, rng))
            .collect()
    }

    pub fn apply_event_effect(&self, event: &GameEvent) -> EffectDeltas {
        let effect = event.effect.unwrap_or_default();
        EffectDeltas {
            money: effect.money.unwrap_or(Decimal::ZERO),
            feed_stock: effect.feed_stock.unwrap_or(Decimal::ZERO),
            fattening_pigs: effect.fattening_pigs.unwrap_or(0),
            ready_pigs: effect.ready_pigs.unwrap_or(0),
        }
    }

    pub fn resolve_event(&self, event: &GameEvent) -> GameEvent {
        GameEvent {
            resolved: true,
            ..event.clone()
        }
    }
}
