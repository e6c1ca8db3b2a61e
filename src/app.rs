use eframe::egui::{self, Color32, TextStyle};

use crate::config::ChartStyle;
use crate::render::parallel;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DietExplorerApp {
    pub state: AppState,
}

impl DietExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

/// Light theme on white, every non-heading font at `style.font_size`.
pub fn apply_style(ctx: &egui::Context, style: &ChartStyle) {
    ctx.set_theme(egui::Theme::Light);
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = Color32::WHITE;
    visuals.window_fill = Color32::WHITE;
    visuals.extreme_bg_color = Color32::WHITE;
    ctx.set_visuals(visuals);

    let size = style.font_size;
    ctx.style_mut(|s| {
        for (text_style, font) in s.text_styles.iter_mut() {
            if *text_style != TextStyle::Heading {
                font.size = size;
            }
        }
    });
}

impl eframe::App for DietExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and toggles ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: colour bar and group toggles ----
        egui::SidePanel::right("legend_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: parallel coordinates ----
        egui::CentralPanel::default().show(ctx, |ui| {
            parallel::parallel_plot(ui, &self.state.chart, &self.state.hidden);
        });

        // ---- Second window: scatter matrix ----
        if self.state.show_scatter {
            let title = self.state.style.scatter_title.clone();
            let (w, h) = self.state.style.scatter_size;
            let state = &mut self.state;
            ctx.show_viewport_immediate(
                egui::ViewportId::from_hash_of("scatter_matrix"),
                egui::ViewportBuilder::default()
                    .with_title(&title)
                    .with_inner_size([w as f32 * 0.75, h as f32 * 0.75]),
                |ctx, class| {
                    if class == egui::ViewportClass::Embedded {
                        // Backend without multi-viewport support: fall back to an inner window.
                        let mut open = true;
                        egui::Window::new(&title).open(&mut open).show(ctx, |ui| {
                            panels::scatter_view(ui, state);
                        });
                        state.show_scatter = open;
                        return;
                    }
                    egui::CentralPanel::default().show(ctx, |ui| {
                        panels::scatter_view(ui, state);
                    });
                    if ctx.input(|i| i.viewport().close_requested()) {
                        state.show_scatter = false;
                    }
                },
            );
        }
    }
}
