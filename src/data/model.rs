use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Stat categories
// ---------------------------------------------------------------------------

/// The fixed set of per-game statistical categories every loaded row must
/// carry, in canonical display order (the basketball-reference column order).
pub const STAT_CATEGORIES: [&str; 22] = [
    "FG", "FGA", "FG%", "3P", "3PA", "3P%", "2P", "2PA", "2P%", "eFG%", "FT", "FTA", "FT%", "ORB",
    "DRB", "TRB", "AST", "STL", "BLK", "TOV", "PF", "PTS",
];

/// Length of a regulation game in minutes; upper bound for the minutes
/// filter and the basis of per-48 normalization.
pub const GAME_MINUTES: f64 = 48.0;

/// Whether `name` is one of the fixed stat categories.
pub fn is_stat_category(name: &str) -> bool {
    STAT_CATEGORIES.contains(&name)
}

// ---------------------------------------------------------------------------
// PlayerRow – one row of the source table
// ---------------------------------------------------------------------------

/// One player-season: identity, minutes per game, and the 22 stat values.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRow {
    pub player: String,
    /// Three-letter team code, e.g. "ATL".
    pub team: String,
    /// Minutes played per game, non-negative.
    pub minutes: f64,
    /// Category name → per-game value. Always holds all of
    /// [`STAT_CATEGORIES`]; the loader enforces this.
    pub stats: BTreeMap<String, f64>,
}

impl PlayerRow {
    /// Value of a stat category, if present on this row.
    pub fn stat(&self, category: &str) -> Option<f64> {
        self.stats.get(category).copied()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed player table with a pre-computed team index.
/// Built once at load time, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All rows, in source order.
    pub players: Vec<PlayerRow>,
    /// Sorted set of team codes present in the table.
    pub teams: BTreeSet<String>,
}

impl Dataset {
    /// Build the team index from the loaded rows.
    pub fn from_rows(players: Vec<PlayerRow>) -> Self {
        let teams: BTreeSet<String> = players.iter().map(|p| p.team.clone()).collect();
        Dataset { players, teams }
    }

    /// Number of player rows.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player names on the given team, sorted alphabetically.
    pub fn roster(&self, team: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .players
            .iter()
            .filter(|p| p.team == team)
            .map(|p| p.player.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}
