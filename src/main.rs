mod app;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod render;
mod schema;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use eframe::egui;

use app::DietExplorerApp;
use color::{CategoryColorMap, ColorScale};
use config::{ChartStyle, PipelineConfig};
use render::parallel::ParallelCoordinates;
use render::scatter::{draw_scatter_matrix, ScatterMatrix};
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = PipelineConfig::default();
    let style = ChartStyle::default();

    let prepared = pipeline::run(&config)
        .with_context(|| format!("preparing {}", config.input_path.display()))?;
    let labels = prepared.encoder.labels().to_vec();

    // ---- Static figure: scatter matrix ----
    let palette = color::named_palette(&style.group_palette, labels.len())
        .with_context(|| format!("unknown palette '{}'", style.group_palette))?;
    let group_colors = CategoryColorMap::new(&labels, palette);
    let matrix = ScatterMatrix::from_table(
        &prepared.table,
        &config.scatter_vars,
        schema::DIET_GROUP,
        &labels,
    )?;
    draw_scatter_matrix(&matrix, &group_colors, &style, &config.scatter_output_path)
        .map_err(|e| anyhow!("drawing scatter matrix: {e}"))?;
    let scatter_png = std::fs::read(&config.scatter_output_path).with_context(|| {
        format!("reading {}", config.scatter_output_path.display())
    })?;

    // ---- Interactive figure: parallel coordinates ----
    let scale = ColorScale::from_name(&style.color_scale)
        .with_context(|| format!("unknown colour scale '{}'", style.color_scale))?;
    let chart = ParallelCoordinates::new(&prepared.dimensions, &prepared.codes, scale, labels.len())?;
    let state = AppState::new(chart, labels, scatter_png, style.clone());

    let app_name = style.parallel_title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&app_name)
            .with_inner_size(style.window_size)
            .with_min_inner_size(style.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can decode the scatter-matrix png.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            app::apply_style(&cc.egui_ctx, &style);
            Ok(Box::new(DietExplorerApp::new(state)))
        }),
    )
    .map_err(|e| anyhow!("chart window: {e}"))
}
