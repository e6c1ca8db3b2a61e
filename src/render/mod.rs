/// Chart renderers.
///
/// * `parallel` – interactive parallel coordinates (egui_plot), one line per row
/// * `scatter`  – static scatter matrix (plotters → PNG)
/// * `kde`      – density curves for the scatter-matrix diagonal

pub mod kde;
pub mod parallel;
pub mod scatter;
