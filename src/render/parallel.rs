use std::collections::BTreeSet;

use eframe::egui::{self, Align2, Color32, Sense, Stroke, Ui};
use egui_plot::{Line, Plot, PlotPoints, VLine};

use crate::color::{to_color32, ColorScale};
use crate::data::dimensions::Dimension;
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

/// One row drawn across all axes.
#[derive(Debug, Clone)]
pub struct ParallelLine {
    pub code: i64,
    /// `[axis index, value]`; axes with a missing value are skipped.
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
}

/// Parallel-coordinates chart built from the dimension list and code column.
#[derive(Debug, Clone)]
pub struct ParallelCoordinates {
    pub axis_labels: Vec<String>,
    pub lines: Vec<ParallelLine>,
    pub scale: ColorScale,
    pub cmin: f64,
    pub cmax: f64,
}

impl ParallelCoordinates {
    /// Lines are coloured by `code` on `scale` over `[0, num_categories - 1]`.
    pub fn new(
        dimensions: &[Dimension],
        codes: &[i64],
        scale: ColorScale,
        num_categories: usize,
    ) -> Result<Self> {
        for dim in dimensions {
            if dim.values.len() != codes.len() {
                return Err(PipelineError::LengthMismatch {
                    column: dim.column.clone(),
                    expected: codes.len(),
                    found: dim.values.len(),
                });
            }
        }

        let cmin = 0.0;
        let cmax = num_categories.saturating_sub(1) as f64;
        let lines = codes
            .iter()
            .enumerate()
            .map(|(row, &code)| ParallelLine {
                code,
                points: dimensions
                    .iter()
                    .enumerate()
                    .filter(|(_, d)| d.values[row].is_finite())
                    .map(|(axis, d)| [axis as f64, d.values[row]])
                    .collect(),
                color: to_color32(scale.sample_range(code as f64, cmin, cmax)),
            })
            .collect();

        Ok(Self {
            axis_labels: dimensions.iter().map(|d| d.label.clone()).collect(),
            lines,
            scale,
            cmin,
            cmax,
        })
    }

    /// Colour of a category code on this chart's scale.
    pub fn code_color(&self, code: i64) -> Color32 {
        to_color32(self.scale.sample_range(code as f64, self.cmin, self.cmax))
    }
}

/// Label for an axis position, empty between axes.
fn label_at(labels: &[String], x: f64) -> &str {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return "";
    }
    labels.get(nearest as usize).map(String::as_str).unwrap_or("")
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Render the parallel-coordinates plot, skipping lines whose code is hidden.
pub fn parallel_plot(ui: &mut Ui, chart: &ParallelCoordinates, hidden: &BTreeSet<i64>) {
    let labels = chart.axis_labels.clone();
    let n_axes = labels.len();

    Plot::new("parallel_coordinates")
        .x_axis_formatter(move |mark, _range| label_at(&labels, mark.value).to_string())
        .y_axis_label("Normalized value")
        .show_grid([false, true])
        .include_x(-0.2)
        .include_x(n_axes.saturating_sub(1) as f64 + 0.2)
        .include_y(0.0)
        .include_y(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for line in chart.lines.iter().filter(|l| !hidden.contains(&l.code)) {
                plot_ui.line(
                    Line::new(PlotPoints::new(line.points.clone()))
                        .color(line.color)
                        .width(1.0),
                );
            }
            for axis in 0..n_axes {
                plot_ui.vline(VLine::new(axis as f64).color(Color32::DARK_GRAY).width(1.5));
            }
        });
}

/// Vertical colour bar with one tick per category code.
pub fn colorbar(ui: &mut Ui, chart: &ParallelCoordinates, labels: &[String]) {
    const BAR_WIDTH: f32 = 18.0;
    const SLICES: usize = 64;

    let height = (ui.available_height() * 0.5).max(120.0);
    let (response, painter) =
        ui.allocate_painter(egui::vec2(ui.available_width(), height), Sense::hover());
    let rect = response.rect;
    let bar = egui::Rect::from_min_size(rect.min, egui::vec2(BAR_WIDTH, height));

    // Top of the bar is cmax, like the chart's y direction.
    let slice_h = height / SLICES as f32;
    for i in 0..SLICES {
        let t = 1.0 - (i as f64 + 0.5) / SLICES as f64;
        let slice = egui::Rect::from_min_size(
            egui::pos2(bar.min.x, bar.min.y + i as f32 * slice_h),
            egui::vec2(BAR_WIDTH, slice_h + 0.5),
        );
        painter.rect_filled(slice, 0.0, to_color32(chart.scale.sample(t)));
    }
    painter.rect_stroke(bar, 0.0, Stroke::new(1.0, Color32::GRAY), egui::StrokeKind::Inside);

    let font = egui::TextStyle::Body.resolve(ui.style());
    let span = (chart.cmax - chart.cmin).max(1.0);
    for (code, label) in labels.iter().enumerate() {
        let t = (code as f64 - chart.cmin) / span;
        let y = bar.max.y - t as f32 * height;
        painter.line_segment(
            [egui::pos2(bar.max.x, y), egui::pos2(bar.max.x + 4.0, y)],
            Stroke::new(1.0, Color32::DARK_GRAY),
        );
        painter.text(
            egui::pos2(bar.max.x + 8.0, y),
            Align2::LEFT_CENTER,
            format!("{code}  {label}"),
            font.clone(),
            Color32::BLACK,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Srgb;

    fn dims() -> Vec<Dimension> {
        vec![
            Dimension {
                label: "GHGs".into(),
                column: "mean_ghgs".into(),
                values: vec![0.0, 0.5, 1.0],
            },
            Dimension {
                label: "Land Use".into(),
                column: "mean_land".into(),
                values: vec![1.0, f64::NAN, 0.0],
            },
        ]
    }

    #[test]
    fn one_line_per_row_with_axis_positions() {
        let chart = ParallelCoordinates::new(&dims(), &[0, 1, 2], ColorScale::Turbo, 3).unwrap();

        assert_eq!(chart.lines.len(), 3);
        assert_eq!(chart.lines[0].points, vec![[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(chart.lines[1].points, vec![[0.0, 0.5]]);
        assert_eq!(chart.axis_labels, vec!["GHGs", "Land Use"]);
    }

    #[test]
    fn colour_range_spans_all_codes() {
        let chart = ParallelCoordinates::new(&dims(), &[0, 1, 2], ColorScale::Turbo, 3).unwrap();

        assert_eq!((chart.cmin, chart.cmax), (0.0, 2.0));
        assert_eq!(chart.lines[0].color, to_color32(ColorScale::Turbo.sample(0.0)));
        assert_eq!(chart.lines[2].color, to_color32(ColorScale::Turbo.sample(1.0)));
        assert_eq!(chart.code_color(1), to_color32(ColorScale::Turbo.sample(0.5)));
    }

    #[test]
    fn single_category_uses_low_end() {
        let chart = ParallelCoordinates::new(&dims(), &[0, 0, 0], ColorScale::Turbo, 1).unwrap();
        let low = to_color32(Srgb::new(0x30, 0x12, 0x3b));
        assert!(chart.lines.iter().all(|l| l.color == low));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = ParallelCoordinates::new(&dims(), &[0, 1], ColorScale::Turbo, 2).unwrap_err();
        assert!(matches!(err, PipelineError::LengthMismatch { expected: 2, found: 3, .. }));
    }

    #[test]
    fn axis_labels_only_at_integer_positions() {
        let chart = ParallelCoordinates::new(&dims(), &[0, 1, 2], ColorScale::Turbo, 3).unwrap();
        assert_eq!(label_at(&chart.axis_labels, 1.0), "Land Use");
        assert_eq!(label_at(&chart.axis_labels, 0.5), "");
        assert_eq!(label_at(&chart.axis_labels, -1.0), "");
        assert_eq!(label_at(&chart.axis_labels, 7.0), "");
    }
}
