use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::model::{is_stat_category, Dataset, GAME_MINUTES};

// ---------------------------------------------------------------------------
// FilterSpec – one interaction's worth of control values
// ---------------------------------------------------------------------------

/// Inclusive-exclusive minutes window, applied as `min < MP <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinutesRange {
    pub min: f64,
    pub max: f64,
}

impl MinutesRange {
    pub fn new(min: f64, max: f64) -> Self {
        MinutesRange { min, max }
    }

    fn contains(&self, minutes: f64) -> bool {
        self.min < minutes && minutes <= self.max
    }
}

/// Snapshot of the dashboard controls, rebuilt from UI state on every
/// interaction. `categories` keeps the canonical display order so the
/// plotted x slots are stable.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub teams: BTreeSet<String>,
    pub minutes: MinutesRange,
    pub categories: Vec<String>,
    /// Which scaled value the renderer plots; both are always computed.
    pub per48: bool,
}

// ---------------------------------------------------------------------------
// PlottedPoint – one (player, category) output record
// ---------------------------------------------------------------------------

/// One scatter point: a player's value in one category, with both the raw
/// and per-48 readings and both 0–100 scalings kept for hover display.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedPoint {
    pub player: String,
    pub team: String,
    pub minutes: f64,
    pub category: String,
    /// Per-game value straight from the source row.
    pub raw_value: f64,
    /// `48 * raw / minutes`; 0 when minutes is 0.
    pub per48_value: f64,
    /// `raw_value` as a percentage of the category's raw maximum among the
    /// currently filtered players.
    pub scaled_raw: f64,
    /// `per48_value` as a percentage of the category's per-48 maximum.
    pub scaled_per48: f64,
}

impl PlottedPoint {
    /// The Y value the renderer plots for the given normalization mode.
    pub fn plotted(&self, per48: bool) -> f64 {
        if per48 {
            self.scaled_per48
        } else {
            self.scaled_raw
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural validation failures of a [`FilterSpec`]. Numeric edge cases
/// (zero minutes, zero category maximum) are resolved to 0 internally and
/// never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid minutes range: min {min} exceeds max {max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("no stat categories selected")]
    EmptyCategorySelection,
    #[error("unknown team code '{0}'")]
    UnknownTeam(String),
    #[error("unknown stat category '{0}'")]
    UnknownCategory(String),
}

// ---------------------------------------------------------------------------
// The projection pipeline
// ---------------------------------------------------------------------------

/// Turn the full dataset plus current controls into scatter-ready points.
///
/// Four ordered stages:
/// 1. filter rows by team membership and `min < MP <= max`, source order;
/// 2. reshape to long form, one record per surviving row × category;
/// 3. derive `per48_value = 48 * raw / minutes`;
/// 4. scale both values to 0–100 against the per-category maximum among
///    the records produced in stage 2.
///
/// Pure: reads the dataset, mutates nothing, deterministic per input.
/// Unknown teams or categories fail fast rather than filtering to nothing.
pub fn project(dataset: &Dataset, spec: &FilterSpec) -> Result<Vec<PlottedPoint>, ProjectionError> {
    validate(dataset, spec)?;

    // Stage 1: filter.
    let survivors = dataset
        .players
        .iter()
        .filter(|p| spec.teams.contains(&p.team) && spec.minutes.contains(p.minutes));

    // Stages 2 + 3: long-form reshape with the per-48 reading.
    let mut points: Vec<PlottedPoint> = Vec::new();
    for row in survivors {
        for category in &spec.categories {
            let raw_value = row.stat(category).unwrap_or(0.0);
            let per48_value = if row.minutes > 0.0 {
                GAME_MINUTES * raw_value / row.minutes
            } else {
                0.0
            };
            points.push(PlottedPoint {
                player: row.player.clone(),
                team: row.team.clone(),
                minutes: row.minutes,
                category: category.clone(),
                raw_value,
                per48_value,
                scaled_raw: 0.0,
                scaled_per48: 0.0,
            });
        }
    }

    // Stage 4: per-category maxima, then 0–100 scaling.
    let mut max_raw: BTreeMap<&str, f64> = BTreeMap::new();
    let mut max_per48: BTreeMap<&str, f64> = BTreeMap::new();
    for p in &points {
        let raw_slot = max_raw.entry(p.category.as_str()).or_insert(f64::MIN);
        *raw_slot = raw_slot.max(p.raw_value);
        let p48_slot = max_per48.entry(p.category.as_str()).or_insert(f64::MIN);
        *p48_slot = p48_slot.max(p.per48_value);
    }
    let max_raw: BTreeMap<String, f64> = max_raw.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    let max_per48: BTreeMap<String, f64> =
        max_per48.into_iter().map(|(k, v)| (k.to_string(), v)).collect();

    for p in &mut points {
        p.scaled_raw = scale(p.raw_value, max_raw[&p.category]);
        p.scaled_per48 = scale(p.per48_value, max_per48[&p.category]);
    }

    Ok(points)
}

/// 0–100 scaling with a zero-maximum guard: a category where every filtered
/// player sits at 0 plots flat at 0 instead of dividing by zero.
fn scale(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        100.0 * value / max
    } else {
        0.0
    }
}

fn validate(dataset: &Dataset, spec: &FilterSpec) -> Result<(), ProjectionError> {
    if spec.minutes.min > spec.minutes.max {
        return Err(ProjectionError::InvalidRange {
            min: spec.minutes.min,
            max: spec.minutes.max,
        });
    }
    if spec.categories.is_empty() {
        return Err(ProjectionError::EmptyCategorySelection);
    }
    for team in &spec.teams {
        if !dataset.teams.contains(team) {
            return Err(ProjectionError::UnknownTeam(team.clone()));
        }
    }
    for category in &spec.categories {
        if !is_stat_category(category) {
            return Err(ProjectionError::UnknownCategory(category.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::data::model::{PlayerRow, STAT_CATEGORIES};

    /// A row with every category at 0 except the given (category, value)
    /// overrides.
    fn row(player: &str, team: &str, minutes: f64, overrides: &[(&str, f64)]) -> PlayerRow {
        let mut stats: BTreeMap<String, f64> = STAT_CATEGORIES
            .iter()
            .map(|c| (c.to_string(), 0.0))
            .collect();
        for &(cat, val) in overrides {
            stats.insert(cat.to_string(), val);
        }
        PlayerRow {
            player: player.to_string(),
            team: team.to_string(),
            minutes,
            stats,
        }
    }

    /// Alice (ATL, 30 MP, 20 PTS), Bob (ATL, 20 MP, 10 PTS),
    /// Cara (BOS, 40 MP, 25 PTS).
    fn sample_dataset() -> Dataset {
        Dataset::from_rows(vec![
            row("Alice", "ATL", 30.0, &[("PTS", 20.0), ("AST", 5.0)]),
            row("Bob", "ATL", 20.0, &[("PTS", 10.0), ("AST", 8.0)]),
            row("Cara", "BOS", 40.0, &[("PTS", 25.0), ("AST", 2.0)]),
        ])
    }

    fn spec(teams: &[&str], min: f64, max: f64, categories: &[&str]) -> FilterSpec {
        FilterSpec {
            teams: teams.iter().map(|t| t.to_string()).collect(),
            minutes: MinutesRange::new(min, max),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            per48: false,
        }
    }

    fn by_player<'a>(points: &'a [PlottedPoint], player: &str) -> &'a PlottedPoint {
        points.iter().find(|p| p.player == player).unwrap()
    }

    #[test]
    fn filters_by_team_and_scales_raw_values() {
        let ds = sample_dataset();
        let points = project(&ds, &spec(&["ATL"], 5.0, 48.0, &["PTS"])).unwrap();

        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.team == "ATL"));
        assert_eq!(by_player(&points, "Alice").scaled_raw, 100.0);
        assert_eq!(by_player(&points, "Bob").scaled_raw, 50.0);
    }

    #[test]
    fn per48_values_scale_against_their_own_maximum() {
        let ds = sample_dataset();
        let points = project(&ds, &spec(&["ATL"], 5.0, 48.0, &["PTS"])).unwrap();

        let alice = by_player(&points, "Alice");
        let bob = by_player(&points, "Bob");
        assert_eq!(alice.per48_value, 32.0); // 48 * 20 / 30
        assert_eq!(bob.per48_value, 24.0); // 48 * 10 / 20
        assert_eq!(alice.scaled_per48, 100.0);
        assert_eq!(bob.scaled_per48, 75.0);
    }

    #[test]
    fn narrow_minutes_window_yields_clean_empty_output() {
        let ds = sample_dataset();
        // 30 and 20 are both <= 35, so no ATL player survives.
        let points = project(&ds, &spec(&["ATL"], 35.0, 48.0, &["PTS"])).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn minutes_bounds_are_exclusive_then_inclusive() {
        let ds = sample_dataset();
        // min bound is strict: Bob at exactly 20 MP is excluded.
        let points = project(&ds, &spec(&["ATL"], 20.0, 48.0, &["PTS"])).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].player, "Alice");

        // max bound is inclusive: Alice at exactly 30 MP survives.
        let points = project(&ds, &spec(&["ATL"], 5.0, 30.0, &["PTS"])).unwrap();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn output_size_is_survivors_times_categories() {
        let ds = sample_dataset();
        let points = project(&ds, &spec(&["ATL", "BOS"], 5.0, 48.0, &["PTS", "AST", "BLK"]))
            .unwrap();
        assert_eq!(points.len(), 3 * 3);
    }

    #[test]
    fn every_nonzero_category_tops_out_at_100() {
        let ds = sample_dataset();
        let points =
            project(&ds, &spec(&["ATL", "BOS"], 5.0, 48.0, &["PTS", "AST"])).unwrap();

        for category in ["PTS", "AST"] {
            let max_raw = points
                .iter()
                .filter(|p| p.category == category)
                .map(|p| p.scaled_raw)
                .fold(f64::MIN, f64::max);
            let max_p48 = points
                .iter()
                .filter(|p| p.category == category)
                .map(|p| p.scaled_per48)
                .fold(f64::MIN, f64::max);
            assert_eq!(max_raw, 100.0, "{category} raw");
            assert_eq!(max_p48, 100.0, "{category} per-48");
        }
    }

    #[test]
    fn zero_maximum_category_plots_flat_at_zero() {
        let ds = sample_dataset();
        // Nobody in the sample blocks a shot.
        let points = project(&ds, &spec(&["ATL", "BOS"], 5.0, 48.0, &["BLK"])).unwrap();
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.scaled_raw == 0.0));
        assert!(points.iter().all(|p| p.scaled_per48 == 0.0));
    }

    #[test]
    fn survivors_keep_source_order() {
        let ds = sample_dataset();
        let points = project(&ds, &spec(&["ATL", "BOS"], 5.0, 48.0, &["PTS"])).unwrap();
        let order: Vec<&str> = points.iter().map(|p| p.player.as_str()).collect();
        assert_eq!(order, vec!["Alice", "Bob", "Cara"]);
    }

    #[test]
    fn projection_is_deterministic() {
        let ds = sample_dataset();
        let s = spec(&["ATL", "BOS"], 5.0, 48.0, &["PTS", "AST"]);
        assert_eq!(project(&ds, &s).unwrap(), project(&ds, &s).unwrap());
    }

    #[test]
    fn widening_the_filter_only_adds_points() {
        let ds = sample_dataset();
        let narrow = project(&ds, &spec(&["ATL"], 25.0, 48.0, &["PTS"])).unwrap();
        let wider_minutes = project(&ds, &spec(&["ATL"], 5.0, 48.0, &["PTS"])).unwrap();
        let more_teams = project(&ds, &spec(&["ATL", "BOS"], 25.0, 48.0, &["PTS"])).unwrap();

        let ids = |pts: &[PlottedPoint]| -> BTreeSet<(String, String)> {
            pts.iter()
                .map(|p| (p.player.clone(), p.category.clone()))
                .collect()
        };
        assert!(ids(&narrow).is_subset(&ids(&wider_minutes)));
        assert!(ids(&narrow).is_subset(&ids(&more_teams)));
    }

    #[test]
    fn every_point_respects_the_filter_window() {
        let ds = sample_dataset();
        let s = spec(&["ATL", "BOS"], 20.0, 35.0, &["PTS", "AST"]);
        let points = project(&ds, &s).unwrap();
        assert!(!points.is_empty());
        for p in &points {
            assert!(s.teams.contains(&p.team));
            assert!(p.minutes > 20.0 && p.minutes <= 35.0);
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        let ds = sample_dataset();
        let err = project(&ds, &spec(&["ATL"], 30.0, 10.0, &["PTS"])).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::InvalidRange {
                min: 30.0,
                max: 10.0
            }
        );
    }

    #[test]
    fn empty_category_selection_is_rejected() {
        let ds = sample_dataset();
        let err = project(&ds, &spec(&["ATL"], 5.0, 48.0, &[])).unwrap_err();
        assert_eq!(err, ProjectionError::EmptyCategorySelection);
    }

    #[test]
    fn unknown_team_and_category_fail_fast() {
        let ds = sample_dataset();
        assert_eq!(
            project(&ds, &spec(&["SEA"], 5.0, 48.0, &["PTS"])).unwrap_err(),
            ProjectionError::UnknownTeam("SEA".to_string())
        );
        assert_eq!(
            project(&ds, &spec(&["ATL"], 5.0, 48.0, &["PER"])).unwrap_err(),
            ProjectionError::UnknownCategory("PER".to_string())
        );
    }

    #[test]
    fn plotted_accessor_follows_the_per48_flag() {
        let ds = sample_dataset();
        let points = project(&ds, &spec(&["ATL"], 5.0, 48.0, &["PTS"])).unwrap();
        let bob = by_player(&points, "Bob");
        assert_eq!(bob.plotted(false), bob.scaled_raw);
        assert_eq!(bob.plotted(true), bob.scaled_per48);
    }

    #[test]
    fn zero_minutes_row_is_total_not_a_panic() {
        // MP = 0 cannot pass `min < MP` with min >= 0, but the per-48
        // derivation stays defined if a caller ever passes min < 0.
        let ds = Dataset::from_rows(vec![row("Dnp", "ATL", 0.0, &[("PTS", 0.0)])]);
        let points = project(&ds, &spec(&["ATL"], -1.0, 48.0, &["PTS"])).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].per48_value, 0.0);
        assert_eq!(points[0].scaled_per48, 0.0);
    }
}
