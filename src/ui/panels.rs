use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::render::parallel::colorbar;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Right side panel – colour legend and diet-group toggles
// ---------------------------------------------------------------------------

/// Render the legend panel: colour bar, then one checkbox per diet group.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.strong(format!("diet_code ({})", state.chart.scale.name()));
    ui.add_space(4.0);
    colorbar(ui, &state.chart, &state.labels);
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    let labels = state.labels.clone();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (code, label) in labels.iter().enumerate() {
                let code = code as i64;
                let text = RichText::new(label).color(state.chart.code_color(code));
                let mut checked = state.is_visible(code);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_category(code);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with line counts and the scatter-matrix toggle.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(&state.style.parallel_title);
        ui.separator();
        ui.label(format!(
            "{} rows, {} visible",
            state.chart.lines.len(),
            state.visible_lines
        ));
        ui.separator();

        if ui
            .selectable_label(state.show_scatter, "Scatter matrix")
            .clicked()
        {
            state.show_scatter = !state.show_scatter;
        }
    });
}

// ---------------------------------------------------------------------------
// Scatter-matrix window contents
// ---------------------------------------------------------------------------

/// Show the rendered scatter matrix, scaled to fit.
pub fn scatter_view(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.add(
            egui::Image::from_bytes(
                "bytes://scatter_matrix.png",
                egui::load::Bytes::Shared(state.scatter_png.clone()),
            )
            .shrink_to_fit(),
        );
    });
}
