//! Static scatter matrix: pairwise scatter plots with per-group KDE diagonals.

use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::kde::{gaussian_kde, kde_support, linspace, KDE_CUT};
use crate::color::{to_rgb, CategoryColorMap};
use crate::config::ChartStyle;
use crate::data::model::Table;
use crate::error::Result;

const KDE_POINTS: usize = 200;
const LEGEND_WIDTH: i32 = 180;

// ---------------------------------------------------------------------------
// Chart input
// ---------------------------------------------------------------------------

/// The normalized variables and the row indices of each group.
#[derive(Debug, Clone)]
pub struct ScatterMatrix {
    pub vars: Vec<String>,
    /// One value sequence per entry of `vars`.
    pub columns: Vec<Vec<f64>>,
    /// `(group label, row indices)`, in legend order.
    pub groups: Vec<(String, Vec<usize>)>,
}

impl ScatterMatrix {
    /// Restrict `table` to `vars` plus `group_column`.
    ///
    /// Groups follow `group_order`; labels missing from it are appended in
    /// first-seen order.
    pub fn from_table<S: AsRef<str>>(
        table: &Table,
        vars: &[S],
        group_column: &str,
        group_order: &[String],
    ) -> Result<Self> {
        let mut names: Vec<&str> = vars.iter().map(|v| v.as_ref()).collect();
        names.push(group_column);
        let restricted = table.project(&names)?;

        let columns = vars
            .iter()
            .map(|v| restricted.numeric(v.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut groups: Vec<(String, Vec<usize>)> =
            group_order.iter().map(|g| (g.clone(), Vec::new())).collect();
        let mut slot: HashMap<String, usize> = group_order
            .iter()
            .enumerate()
            .map(|(i, g)| (g.clone(), i))
            .collect();
        for (row, label) in restricted.text(group_column)?.into_iter().enumerate() {
            let idx = match slot.get(&label) {
                Some(&idx) => idx,
                None => {
                    groups.push((label.clone(), Vec::new()));
                    slot.insert(label, groups.len() - 1);
                    groups.len() - 1
                }
            };
            groups[idx].1.push(row);
        }

        Ok(Self {
            vars: vars.iter().map(|v| v.as_ref().to_string()).collect(),
            columns,
            groups,
        })
    }

    fn finite_count(&self, var: usize, rows: &[usize]) -> usize {
        rows.iter()
            .filter(|&&r| self.columns[var][r].is_finite())
            .count()
    }

    /// Axis range of variable `var`: the padded data range, widened to the
    /// support of every group's density curve.
    pub fn var_range(&self, var: usize) -> (f64, f64) {
        let column = &self.columns[var];
        self.groups
            .iter()
            .filter_map(|(_, rows)| {
                let values: Vec<f64> = rows.iter().map(|&r| column[r]).collect();
                kde_support(&values, KDE_CUT)
            })
            .fold(axis_range(column), |(lo, hi), (s_lo, s_hi)| {
                (lo.min(s_lo), hi.max(s_hi))
            })
    }
}

/// Axis range covering the finite values with 5% padding.
pub fn axis_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if hi - lo <= 0.0 {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Draw the scatter matrix to a PNG at `out_path`.
pub fn draw_scatter_matrix(
    matrix: &ScatterMatrix,
    colors: &CategoryColorMap,
    style: &ChartStyle,
    out_path: &Path,
) -> std::result::Result<(), Box<dyn Error>> {
    let n = matrix.vars.len();
    let root = BitMapBackend::new(out_path, style.scatter_size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(&style.scatter_title, ("sans-serif", f64::from(style.font_size) * 2.0))?;

    let (grid_area, legend_area) = root.split_horizontally(style.scatter_size.0 as i32 - LEGEND_WIDTH);
    let cells = grid_area.split_evenly((n, n));
    let label_font = ("sans-serif", f64::from(style.font_size));
    let ranges: Vec<(f64, f64)> = (0..n).map(|var| matrix.var_range(var)).collect();

    for row in 0..n {
        for col in 0..n {
            let cell = &cells[row * n + col];
            let (x_lo, x_hi) = ranges[col];

            if row == col {
                let grid = linspace(x_lo, x_hi, KDE_POINTS);
                let total = matrix.columns[col].iter().filter(|v| v.is_finite()).count();
                let curves: Vec<(RGBColor, Vec<(f64, f64)>)> = matrix
                    .groups
                    .iter()
                    .filter_map(|(label, rows)| {
                        let values: Vec<f64> = rows.iter().map(|&r| matrix.columns[col][r]).collect();
                        let weight = matrix.finite_count(col, rows) as f64 / total.max(1) as f64;
                        let curve = gaussian_kde(&values, &grid, weight)?;
                        Some((to_rgb(colors.color_for(label)), curve))
                    })
                    .collect();
                let y_max = curves
                    .iter()
                    .flat_map(|(_, c)| c.iter().map(|p| p.1))
                    .fold(0.0f64, f64::max);
                let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

                let mut chart = ChartBuilder::on(cell)
                    .margin(6)
                    .x_label_area_size(30)
                    .y_label_area_size(45)
                    .build_cartesian_2d(x_lo..x_hi, 0.0..y_max)?;
                let mut mesh = chart.configure_mesh();
                mesh.bold_line_style(BLACK.mix(0.12))
                    .light_line_style(BLACK.mix(0.04))
                    .label_style(label_font);
                if row == n - 1 {
                    mesh.x_desc(matrix.vars[col].as_str());
                }
                if col == 0 {
                    mesh.y_desc("Density");
                }
                mesh.draw()?;

                for (color, curve) in curves {
                    chart.draw_series(
                        AreaSeries::new(curve, 0.0, color.mix(0.25)).border_style(color.stroke_width(2)),
                    )?;
                }
            } else {
                let (y_lo, y_hi) = ranges[row];
                let mut chart = ChartBuilder::on(cell)
                    .margin(6)
                    .x_label_area_size(30)
                    .y_label_area_size(45)
                    .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
                let mut mesh = chart.configure_mesh();
                mesh.bold_line_style(BLACK.mix(0.12))
                    .light_line_style(BLACK.mix(0.04))
                    .label_style(label_font);
                if row == n - 1 {
                    mesh.x_desc(matrix.vars[col].as_str());
                }
                if col == 0 {
                    mesh.y_desc(matrix.vars[row].as_str());
                }
                mesh.draw()?;

                let xs = &matrix.columns[col];
                let ys = &matrix.columns[row];
                for (label, rows) in &matrix.groups {
                    let color = to_rgb(colors.color_for(label));
                    chart.draw_series(
                        rows.iter()
                            .filter(|&&r| xs[r].is_finite() && ys[r].is_finite())
                            .map(|&r| Circle::new((xs[r], ys[r]), 3, color.mix(0.8).filled())),
                    )?;
                }
            }
        }
    }

    draw_legend(&legend_area, colors, label_font)?;
    root.present()?;
    log::info!("Scatter matrix written to {}", out_path.display());
    Ok(())
}

fn draw_legend(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    colors: &CategoryColorMap,
    font: (&str, f64),
) -> std::result::Result<(), Box<dyn Error>> {
    let (_, height) = area.dim_in_pixel();
    let entries = colors.legend_entries();
    let line_height = 22;
    let mut y = height as i32 / 2 - (entries.len() as i32 + 1) * line_height / 2;

    area.draw(&Text::new(crate::schema::DIET_GROUP, (10, y), font))?;
    for (label, color) in entries {
        y += line_height;
        let color = to_rgb(color);
        area.draw(&Rectangle::new([(12, y + 2), (24, y + 14)], color.filled()))?;
        area.draw(&Text::new(label, (32, y), font))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ColumnData};
    use crate::schema::*;

    fn table() -> Table {
        Table::new(vec![
            Column::new(
                DIET_GROUP,
                ColumnData::Text(vec!["fish".into(), "vegan".into(), "fish".into(), "meat".into()]),
            ),
            Column::new(MEAN_GHGS, ColumnData::Float(vec![0.2, 0.0, 0.4, 1.0])),
            Column::new(MEAN_WATSCAR, ColumnData::Float(vec![0.5, 0.1, f64::NAN, 1.0])),
            Column::new(MEAN_WATUSE, ColumnData::Float(vec![0.3, 0.0, 0.6, 1.0])),
            Column::new(MEAN_LAND, ColumnData::Float(vec![0.0; 4])),
        ])
        .unwrap()
    }

    #[test]
    fn restricts_to_requested_variables() {
        let order = vec!["fish".to_string(), "vegan".to_string(), "meat".to_string()];
        let matrix = ScatterMatrix::from_table(&table(), &SCATTER_VARS, DIET_GROUP, &order).unwrap();

        assert_eq!(matrix.vars, SCATTER_VARS.to_vec());
        assert_eq!(matrix.columns[2], vec![0.2, 0.0, 0.4, 1.0]);
        assert_eq!(
            matrix.groups,
            vec![
                ("fish".to_string(), vec![0, 2]),
                ("vegan".to_string(), vec![1]),
                ("meat".to_string(), vec![3]),
            ]
        );
    }

    #[test]
    fn unlisted_groups_are_appended() {
        let order = vec!["vegan".to_string()];
        let matrix = ScatterMatrix::from_table(&table(), &[MEAN_GHGS], DIET_GROUP, &order).unwrap();
        let labels: Vec<_> = matrix.groups.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["vegan", "fish", "meat"]);
    }

    #[test]
    fn missing_variable_is_a_schema_error() {
        let err = ScatterMatrix::from_table(&table(), &[MEAN_BIO], DIET_GROUP, &[]).unwrap_err();
        assert!(matches!(err, crate::error::PipelineError::MissingColumns(_)));
    }

    #[test]
    fn finite_count_skips_missing_values() {
        let matrix = ScatterMatrix::from_table(&table(), &SCATTER_VARS, DIET_GROUP, &[]).unwrap();
        assert_eq!(matrix.finite_count(0, &[0, 1, 2, 3]), 3);
    }

    #[test]
    fn axis_range_pads_and_handles_degenerate_columns() {
        let (lo, hi) = axis_range(&[0.0, 1.0]);
        assert!((lo + 0.05).abs() < 1e-12 && (hi - 1.05).abs() < 1e-12);
        assert_eq!(axis_range(&[0.0, 0.0]), (-0.5, 0.5));
        assert_eq!(axis_range(&[f64::NAN]), (0.0, 1.0));
    }

    #[test]
    fn var_range_covers_density_tails() {
        let order = vec!["fish".to_string(), "vegan".to_string(), "meat".to_string()];
        let matrix = ScatterMatrix::from_table(&table(), &[MEAN_GHGS], DIET_GROUP, &order).unwrap();

        let fish_bw = 0.02f64.sqrt() * 2f64.powf(-0.2);
        let (lo, hi) = matrix.var_range(0);
        assert!((lo - (0.2 - KDE_CUT * fish_bw)).abs() < 1e-12);
        assert!((hi - 1.05).abs() < 1e-12);
    }

    #[test]
    fn draws_grid_and_legend_to_png() {
        let labels = vec!["fish".to_string(), "vegan".to_string(), "meat".to_string()];
        let matrix = ScatterMatrix::from_table(&table(), &SCATTER_VARS, DIET_GROUP, &labels).unwrap();
        let colors = CategoryColorMap::new(&labels, crate::color::set2_palette(labels.len()));
        let style = ChartStyle {
            scatter_size: (600, 550),
            ..ChartStyle::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("scatter_matrix.png");

        if let Err(err) = draw_scatter_matrix(&matrix, &colors, &style, &out) {
            // Text rendering needs a system font; headless hosts may have none.
            assert!(err.to_string().to_lowercase().contains("font"), "{err}");
            return;
        }
        let png = image::open(&out).unwrap();
        assert_eq!((png.width(), png.height()), (600, 550));
    }
}
