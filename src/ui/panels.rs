use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::model::{GAME_MINUTES, STAT_CATEGORIES};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No player table loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the loop.
    let teams: Vec<String> = dataset.teams.iter().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Team checklist ----
            let header = format!("Teams  ({}/{})", state.selected_teams.len(), teams.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("teams")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_teams();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_teams();
                        }
                    });

                    for team in &teams {
                        let mut text = RichText::new(team);
                        if let Some(colors) = &state.team_colors {
                            text = text.color(colors.color_for(team));
                        }
                        let mut checked = state.selected_teams.contains(team);
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_team(team);
                        }
                    }
                });
            ui.separator();

            // ---- Minutes window ----
            ui.strong("Minutes per game");
            ui.add(
                Slider::new(&mut state.minutes_min, 0.0..=GAME_MINUTES)
                    .text("more than")
                    .fixed_decimals(0),
            );
            ui.add(
                Slider::new(&mut state.minutes_max, 0.0..=GAME_MINUTES)
                    .text("at most")
                    .fixed_decimals(0),
            );
            ui.separator();

            // ---- Stat checklist ----
            let header = format!(
                "Stats  ({}/{})",
                state.selected_stats.len(),
                STAT_CATEGORIES.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("stats")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_stats();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_stats();
                        }
                    });

                    for category in STAT_CATEGORIES {
                        let mut checked = state.selected_stats.contains(category);
                        if ui.checkbox(&mut checked, category).changed() {
                            state.toggle_stat(category);
                        }
                    }
                });
            ui.separator();

            // ---- Head-to-head comparison (axes only for now) ----
            // TODO: wire these picks into a second scatter plotting each
            // player at (x stat, y stat).
            ui.strong("Compare stats");
            axis_combo(ui, "compare_x", "X axis", &mut state.compare_x);
            axis_combo(ui, "compare_y", "Y axis", &mut state.compare_y);
        });

    // Recompute the projection after any control change.
    state.reproject();
}

fn axis_combo(ui: &mut Ui, id: &str, label: &str, current: &mut String) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(current.clone())
            .show_ui(ui, |ui: &mut Ui| {
                for category in STAT_CATEGORIES {
                    if ui
                        .selectable_label(current == category, category)
                        .clicked()
                    {
                        *current = category.to_string();
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} players loaded, {} points plotted",
                ds.len(),
                state.points.len()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.per48, "Per-48 stats")
            .clicked()
        {
            state.per48 = !state.per48;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open player table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} players across {} teams",
                    dataset.len(),
                    dataset.teams.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
