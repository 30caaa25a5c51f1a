//! Drives a game for a number of days with an autopilot strategy.

use log::{info, warn};
use rand::Rng;

use crate::game::{GameSnapshot, GameState};
use crate::metrics::FarmMetrics;
use crate::persistence::SaveStore;
use crate::strategies::Strategy;

pub struct RunOutcome {
    pub final_state: GameSnapshot,
    pub metrics: FarmMetrics,
    pub rejected_actions: usize,
    pub saves_written: usize,
}

pub struct Runner<'a> {
    strategy: &'a dyn Strategy,
    store: Option<&'a mut dyn SaveStore>,
    /// Autosave every N days; 0 only saves at the end of the run.
    autosave_every: u32,
}

impl<'a> Runner<'a> {
    pub fn new(strategy: &'a dyn Strategy) -> Self {
        Self {
            strategy,
            store: None,
            autosave_every: 1,
        }
    }

    pub fn with_store(mut self, store: &'a mut dyn SaveStore, autosave_every: u32) -> Self {
        self.store = Some(store);
        self.autosave_every = autosave_every;
        self
    }

    /// Play `days` days: each day the strategy acts, then the day passes.
    pub fn run<R: Rng>(&mut self, game: &mut GameState<R>, days: u32) -> RunOutcome {
        let mut rejected_actions = 0;
        let mut saves_written = 0;

        info!(
            "Running {} days with {} strategy from day {}",
            days,
            self.strategy.name(),
            game.day()
        );

        for elapsed in 1..=days {
            let actions = self.strategy.decide(&game.snapshot(), game.rules());
            for action in &actions {
                if game.apply(action).is_err() {
                    rejected_actions += 1;
                }
            }
            game.pass_day();

            let autosave_due = self.autosave_every > 0 && elapsed % self.autosave_every == 0;
            if (autosave_due || elapsed == days) && self.autosave(game) {
                saves_written += 1;
            }
        }

        RunOutcome {
            final_state: game.snapshot(),
            metrics: FarmMetrics::from_journal(game.journal().entries()),
            rejected_actions,
            saves_written,
        }
    }

    /// Save through the store, if any. A failed autosave is logged and the
    /// run continues.
    fn autosave<R: Rng>(&mut self, game: &GameState<R>) -> bool {
        let Some(store) = self.store.as_deref_mut() else {
            return false;
        };
        match game.save(store) {
            Ok(()) => true,
            Err(err) => {
                warn!("Autosave on day {} failed: {}", game.day(), err);
                false
            }
        }
    }
}
