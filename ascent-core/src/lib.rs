use ascent_database::Database;
use ascent_progression::Progression;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub progression: Progression,
}

impl Data {
    pub fn new(progression: Progression) -> Self {
        Self {
            db: progression.db().clone(),
            progression,
        }
    }
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
