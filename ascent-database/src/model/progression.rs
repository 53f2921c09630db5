use serde::{Deserialize, Serialize};

/// Progression fields of a user, mutated only by the progression engines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRecord {
    pub level: u32,
    pub exp: u64,
    pub coins: u64,
    pub rank: u32,
    pub title: String,
    /// Unix seconds of the last granted check-in.
    pub last_check_in: Option<u64>,
    pub redeemed_codes: Vec<String>,
}

impl ProgressionRecord {
    pub const INITIAL_LEVEL: u32 = 1;
    pub const INITIAL_RANK: u32 = 1;
    pub const INITIAL_TITLE: &'static str = "Newbie";

    /// State of a freshly registered user.
    pub fn initial() -> Self {
        Self {
            level: Self::INITIAL_LEVEL,
            exp: 0,
            coins: 0,
            rank: Self::INITIAL_RANK,
            title: Self::INITIAL_TITLE.to_owned(),
            last_check_in: None,
            redeemed_codes: Vec::new(),
        }
    }
}

/// Read model used to render a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: u64,
    pub name: String,
    pub created_at: u64,
    pub progression: ProgressionRecord,
}
