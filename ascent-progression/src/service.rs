use std::sync::Arc;

use ascent_database::Database;

use crate::clock::ProgressionClock;
use crate::rules::ProgressionRules;

/// Entry point for every progression operation.
///
/// Cloning is cheap; clones share the store handle and the global clock.
#[derive(Clone, Debug)]
pub struct Progression {
    pub(crate) db: Database,
    pub(crate) clock: Arc<ProgressionClock>,
    pub(crate) rules: Arc<ProgressionRules>,
}

impl Progression {
    /// Build the service with the clock starting now.
    pub fn new(db: Database, rules: ProgressionRules) -> Self {
        Self::with_clock(db, rules, ProgressionClock::start_now())
    }

    pub fn with_clock(db: Database, rules: ProgressionRules, clock: ProgressionClock) -> Self {
        Self {
            db,
            clock: Arc::new(clock),
            rules: Arc::new(rules),
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn clock(&self) -> &ProgressionClock {
        &self.clock
    }

    pub fn rules(&self) -> &ProgressionRules {
        &self.rules
    }
}
