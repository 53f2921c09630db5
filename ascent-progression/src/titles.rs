/// Titles for ranks 1 through 18, in rank order.
pub const TITLES: [&str; 18] = [
    "Newbie",
    "Pemula",
    "Pemula Senior",
    "Senior",
    "Kapten",
    "Pemimpin Kapten",
    "Jenderal",
    "Jenderal Besar",
    "King",
    "Emperor",
    "Leluhur",
    "Pencerahan Surgawi",
    "Human Immortal",
    "Earth Immortal",
    "Golden Immortal",
    "Immortal Surgawi",
    "Demigod",
    "God",
];

/// Title shown for any rank outside the table.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Look up the title for a rank. Total: anything outside 1..=18 is `"Unknown"`.
pub fn title_for_rank(rank: u32) -> &'static str {
    usize::try_from(rank)
        .ok()
        .and_then(|rank| rank.checked_sub(1))
        .and_then(|idx| TITLES.get(idx))
        .copied()
        .unwrap_or(UNKNOWN_TITLE)
}

/// Iterate `(rank, title)` pairs in rank order.
pub fn all_titles() -> impl Iterator<Item = (u32, &'static str)> {
    (1_u32..).zip(TITLES)
}

#[cfg(test)]
mod tests {
    use super::{UNKNOWN_TITLE, all_titles, title_for_rank};

    #[test]
    fn known_ranks_map_to_fixed_titles() {
        assert_eq!(title_for_rank(1), "Newbie");
        assert_eq!(title_for_rank(2), "Pemula");
        assert_eq!(title_for_rank(8), "Jenderal Besar");
        assert_eq!(title_for_rank(9), "King");
        assert_eq!(title_for_rank(12), "Pencerahan Surgawi");
        assert_eq!(title_for_rank(13), "Human Immortal");
        assert_eq!(title_for_rank(17), "Demigod");
        assert_eq!(title_for_rank(18), "God");
    }

    #[test]
    fn registration_defaults_agree_with_table() {
        use ascent_database::ProgressionRecord;

        assert_eq!(
            title_for_rank(ProgressionRecord::INITIAL_RANK),
            ProgressionRecord::INITIAL_TITLE
        );
    }

    #[test]
    fn ranks_outside_table_are_unknown() {
        assert_eq!(title_for_rank(0), UNKNOWN_TITLE);
        assert_eq!(title_for_rank(19), "Unknown");
        assert_eq!(title_for_rank(u32::MAX), "Unknown");
    }

    #[test]
    fn every_listed_rank_round_trips_through_lookup() {
        let listed: Vec<_> = all_titles().collect();
        assert_eq!(listed.len(), 18);
        assert_eq!(listed.first(), Some(&(1, "Newbie")));
        assert_eq!(listed.last(), Some(&(18, "God")));

        for (rank, title) in listed {
            assert_eq!(title_for_rank(rank), title);
            assert_ne!(title, UNKNOWN_TITLE);
        }
    }
}
