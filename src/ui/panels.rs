use eframe::egui::{self, Color32, RichText, ScrollArea, Sense, Ui};

use crate::band::{BandMode, Deviation};
use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – colouring settings
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Colouring");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Band mode ----
            ui.strong("Bands");
            let mut fixed = !state.config.mode.is_per_group();
            let fixed_band = state.config.fixed_band();
            let before = fixed;
            ui.radio_value(&mut fixed, false, "Per group (mean ± deviation)");
            ui.radio_value(
                &mut fixed,
                true,
                format!("Fixed [{} – {}]", fixed_band.min, fixed_band.max),
            );
            if fixed != before {
                state.set_fixed_mode(fixed);
            }
            ui.separator();

            // ---- Deviation estimator ----
            let per_group = matches!(state.config.mode, BandMode::PerGroup);
            let current = state.config.deviation;
            ui.add_enabled_ui(per_group, |ui: &mut Ui| {
                ui.strong("Deviation");
                egui::ComboBox::from_id_salt("deviation")
                    .selected_text(current.label())
                    .show_ui(ui, |ui: &mut Ui| {
                        for d in Deviation::ALL {
                            if ui.selectable_label(current == d, d.label()).clicked() {
                                state.set_deviation(d);
                            }
                        }
                    });
            });
            ui.separator();

            // ---- Legend ----
            ui.strong("Legend");
            legend(ui);

            ui.separator();
            ui.label(format!(
                "Group key: first {} columns",
                state.config.label_columns
            ));
            if let Some(path) = &state.config.config_path {
                ui.label(format!("Config: {}", path.display()));
            }
        });
}

fn legend(ui: &mut Ui) {
    let stops = color::gradient_stops(16);
    let width = ui.available_width().min(200.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 14.0), Sense::hover());
    let step = rect.width() / stops.len() as f32;
    for (i, c) in stops.into_iter().enumerate() {
        let min = rect.left_top() + egui::vec2(step * i as f32, 0.0);
        let swatch = egui::Rect::from_min_size(min, egui::vec2(step, rect.height()));
        ui.painter()
            .rect_filled(swatch, 0.0, color::to_color32(c));
    }
    ui.horizontal(|ui: &mut Ui| {
        ui.small("below band");
        ui.add_space((width - 110.0).max(8.0));
        ui.small("above band");
    });
    ui.horizontal(|ui: &mut Ui| {
        let (swatch, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
        ui.painter()
            .rect_filled(swatch, 0.0, color::to_color32(color::NEUTRAL));
        ui.small("no spread in group");
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
            if ui
                .add_enabled(state.table.is_some(), egui::Button::new("Export HTML…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(entry) = &state.dataset {
            ui.label(format!(
                "{} rows, {} columns",
                entry.data.len(),
                entry.data.columns.len()
            ));
        }

        ui.separator();

        let fixed = !state.config.mode.is_per_group();
        if ui.selectable_label(fixed, "Fixed Band").clicked() {
            state.set_fixed_mode(!fixed);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open table")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export heat map")
        .add_filter("HTML", &["html", "htm"])
        .set_file_name("heatmap.html")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_html(&path) {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
