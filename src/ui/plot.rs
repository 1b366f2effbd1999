use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, MarkerShape, Plot, Points};

use crate::data::model::GAME_MINUTES;
use crate::data::project::PlottedPoint;
use crate::state::AppState;

/// Hover pick-up tolerance in plot units (category slots are 1.0 apart,
/// the y axis spans 0–100).
const HOVER_DX: f64 = 0.25;
const HOVER_DY: f64 = 4.0;

// ---------------------------------------------------------------------------
// Player scatter (central panel)
// ---------------------------------------------------------------------------

/// Render the projected points in the central panel: one column of points
/// per selected category, y = scaled value, marker size from minutes.
pub fn player_scatter(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a player table to start  (File → Open…)");
        });
        return;
    }

    let categories = state.ordered_categories();
    let slots: BTreeMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let per48 = state.per48;
    let team_colors = &state.team_colors;

    let tick_names = categories.clone();
    let response = Plot::new("player_scatter")
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _range| {
            let slot = mark.value.round();
            if (mark.value - slot).abs() > 1e-6 || slot < 0.0 {
                return String::new();
            }
            tick_names
                .get(slot as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_axis_label(if per48 {
            "Scaled per-48 value"
        } else {
            "Scaled per-game value"
        })
        .include_y(0.0)
        .include_y(105.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let pointer = plot_ui.pointer_coordinate();
            let mut nearest: Option<(f64, PlottedPoint)> = None;

            for point in &state.points {
                let Some(&slot) = slots.get(point.category.as_str()) else {
                    continue;
                };
                let x = slot as f64;
                let y = point.plotted(per48);

                let color = team_colors
                    .as_ref()
                    .map(|c| c.color_for(&point.team))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let radius = 2.0 + 6.0 * (point.minutes / GAME_MINUTES) as f32;

                plot_ui.points(
                    Points::new(vec![[x, y]])
                        .name(&point.team)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(radius),
                );

                if let Some(cursor) = pointer {
                    let dx = (cursor.x - x) / HOVER_DX;
                    let dy = (cursor.y - y) / HOVER_DY;
                    let dist = dx * dx + dy * dy;
                    if dist <= 1.0 && nearest.as_ref().map_or(true, |(d, _)| dist < *d) {
                        nearest = Some((dist, point.clone()));
                    }
                }
            }

            nearest.map(|(_, p)| p)
        });

    if let Some(point) = response.inner {
        response.response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            ui.strong(&point.player);
            ui.label(format!(
                "{} per game: {:.1}",
                point.category, point.raw_value
            ));
            ui.label(format!(
                "{} per 48: {:.1}",
                point.category, point.per48_value
            ));
            ui.label(format!("Minutes: {:.1}", point.minutes));
        });
    }
}
