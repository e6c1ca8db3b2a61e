use std::path::PathBuf;

use crate::schema;

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// Where data comes from, what is kept, and where the static figure goes.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Input table (CSV by default; `.json` / `.parquet` also accepted).
    pub input_path: PathBuf,
    /// PNG written by the scatter-matrix renderer.
    pub scatter_output_path: PathBuf,
    /// Columns kept by the feature selector, in output order.
    pub required_columns: Vec<String>,
    /// Columns plotted against each other in the scatter matrix.
    pub scatter_vars: Vec<String>,
    /// Rows shown in console previews.
    pub preview_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("diet_data.csv"),
            scatter_output_path: PathBuf::from("scatter_matrix.png"),
            required_columns: schema::REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            scatter_vars: schema::SCATTER_VARS.iter().map(|c| c.to_string()).collect(),
            preview_rows: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart styling
// ---------------------------------------------------------------------------

/// Titles, fonts and sizes for both charts.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub parallel_title: String,
    pub scatter_title: String,
    pub font_size: f32,
    /// Continuous scale used to colour parallel-coordinates lines.
    pub color_scale: String,
    /// Qualitative palette used for scatter-matrix groups.
    pub group_palette: String,
    /// Scatter-matrix figure size in pixels.
    pub scatter_size: (u32, u32),
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            parallel_title: "Environmental Impact by Diet Type".to_string(),
            scatter_title: "Dietary Patterns & Key Environmental Indicators".to_string(),
            font_size: 12.0,
            color_scale: "Turbo".to_string(),
            group_palette: "Set2".to_string(),
            scatter_size: (1200, 1100),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
        }
    }
}
