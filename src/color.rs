use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.7, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Team colors
// ---------------------------------------------------------------------------

/// Maps each team code in the dataset to a distinct colour.
#[derive(Debug, Clone)]
pub struct TeamColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl TeamColors {
    /// Assign one hue per team, in sorted team-code order.
    pub fn new(teams: &BTreeSet<String>) -> Self {
        let palette = generate_palette(teams.len());
        let mapping: BTreeMap<String, Color32> = teams
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        TeamColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a team code.
    pub fn color_for(&self, team: &str) -> Color32 {
        self.mapping
            .get(team)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (team code → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(t, c): (&String, &Color32)| (t.clone(), *c))
            .collect()
    }
}
