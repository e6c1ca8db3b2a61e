use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::ChartStyle;
use crate::render::parallel::ParallelCoordinates;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Parallel-coordinates chart (lines, axes, colour scale).
    pub chart: ParallelCoordinates,

    /// Diet group labels; a label's index is its code.
    pub labels: Vec<String>,

    /// Codes whose lines are currently hidden.
    pub hidden: BTreeSet<i64>,

    /// Number of lines passing the current selection (cached).
    pub visible_lines: usize,

    /// Encoded scatter-matrix PNG.
    pub scatter_png: Arc<[u8]>,

    /// Whether the scatter-matrix window is open.
    pub show_scatter: bool,

    pub style: ChartStyle,
}

impl AppState {
    pub fn new(
        chart: ParallelCoordinates,
        labels: Vec<String>,
        scatter_png: Vec<u8>,
        style: ChartStyle,
    ) -> Self {
        let visible_lines = chart.lines.len();
        Self {
            chart,
            labels,
            hidden: BTreeSet::new(),
            visible_lines,
            scatter_png: scatter_png.into(),
            show_scatter: true,
            style,
        }
    }

    /// Recompute `visible_lines` after a selection change.
    pub fn refilter(&mut self) {
        self.visible_lines = self
            .chart
            .lines
            .iter()
            .filter(|l| !self.hidden.contains(&l.code))
            .count();
    }

    /// Toggle a single diet group on or off.
    pub fn toggle_category(&mut self, code: i64) {
        if !self.hidden.remove(&code) {
            self.hidden.insert(code);
        }
        self.refilter();
    }

    /// Show every diet group.
    pub fn select_all(&mut self) {
        self.hidden.clear();
        self.refilter();
    }

    /// Hide every diet group.
    pub fn select_none(&mut self) {
        self.hidden = (0..self.labels.len() as i64).collect();
        self.refilter();
    }

    pub fn is_visible(&self, code: i64) -> bool {
        !self.hidden.contains(&code)
    }
}
