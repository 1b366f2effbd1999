use std::collections::BTreeSet;

use crate::color::TeamColors;
use crate::data::model::{Dataset, GAME_MINUTES, STAT_CATEGORIES};
use crate::data::project::{project, FilterSpec, MinutesRange, PlottedPoint, ProjectionError};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded player table (None until the user opens a file).
    pub dataset: Option<Dataset>,

    /// Currently checked team codes.
    pub selected_teams: BTreeSet<String>,

    /// Minutes window, `min < MP <= max`.
    pub minutes_min: f64,
    pub minutes_max: f64,

    /// Currently checked stat categories.
    pub selected_stats: BTreeSet<String>,

    /// Whether the plot shows per-48 scaled values instead of raw scaled.
    pub per48: bool,

    /// Axis picks for the head-to-head comparison section.
    pub compare_x: String,
    pub compare_y: String,

    /// Team → colour assignment for the loaded dataset.
    pub team_colors: Option<TeamColors>,

    /// Output of the last projection (cached between interactions).
    pub points: Vec<PlottedPoint>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selected_teams: BTreeSet::new(),
            minutes_min: 5.0,
            minutes_max: GAME_MINUTES,
            selected_stats: ["PTS", "AST", "BLK"].iter().map(|s| s.to_string()).collect(),
            per48: false,
            compare_x: "PTS".to_string(),
            compare_y: "eFG%".to_string(),
            team_colors: None,
            points: Vec::new(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: select every team, assign colours,
    /// and project once.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selected_teams = dataset.teams.clone();
        self.team_colors = Some(TeamColors::new(&dataset.teams));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.reproject();
    }

    /// The selected categories in canonical display order; this also fixes
    /// the x slot of each category in the scatter.
    pub fn ordered_categories(&self) -> Vec<String> {
        STAT_CATEGORIES
            .iter()
            .filter(|c| self.selected_stats.contains(**c))
            .map(|c| c.to_string())
            .collect()
    }

    /// Assemble a [`FilterSpec`] from the current control values.
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            teams: self.selected_teams.clone(),
            minutes: MinutesRange::new(self.minutes_min, self.minutes_max),
            categories: self.ordered_categories(),
            per48: self.per48,
        }
    }

    /// Re-run the projection pipeline after a control change.
    ///
    /// An empty category selection clears the plot without a banner; any
    /// other validation failure clears the plot and shows the error.
    pub fn reproject(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        match project(dataset, &self.filter_spec()) {
            Ok(points) => {
                self.points = points;
                self.status_message = None;
            }
            Err(ProjectionError::EmptyCategorySelection) => {
                self.points.clear();
                self.status_message = None;
            }
            Err(e) => {
                self.points.clear();
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Toggle one team checkbox.
    pub fn toggle_team(&mut self, team: &str) {
        if !self.selected_teams.remove(team) {
            self.selected_teams.insert(team.to_string());
        }
        self.reproject();
    }

    /// Select every team in the dataset.
    pub fn select_all_teams(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selected_teams = ds.teams.clone();
        }
        self.reproject();
    }

    /// Uncheck every team.
    pub fn select_no_teams(&mut self) {
        self.selected_teams.clear();
        self.reproject();
    }

    /// Toggle one stat checkbox.
    pub fn toggle_stat(&mut self, category: &str) {
        if !self.selected_stats.remove(category) {
            self.selected_stats.insert(category.to_string());
        }
        self.reproject();
    }

    /// Select all 22 stat categories.
    pub fn select_all_stats(&mut self) {
        self.selected_stats = STAT_CATEGORIES.iter().map(|c| c.to_string()).collect();
        self.reproject();
    }

    /// Uncheck every stat category.
    pub fn select_no_stats(&mut self) {
        self.selected_stats.clear();
        self.reproject();
    }
}
