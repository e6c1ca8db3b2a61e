//! Gaussian kernel density estimate for the scatter-matrix diagonals.

const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Scott's rule bandwidth: `std(ddof = 1) * n^(-1/5)`.
///
/// `None` for fewer than two finite values or zero spread; such groups have
/// no density to draw.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = finite.len();
    if n < 2 {
        return None;
    }
    let mean = finite.iter().sum::<f64>() / n as f64;
    let variance = finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_dev = variance.sqrt();
    if std_dev <= 0.0 || !std_dev.is_finite() {
        return None;
    }
    Some(std_dev * (n as f64).powf(-0.2))
}

/// Bandwidths a density curve extends beyond the outermost sample.
pub const KDE_CUT: f64 = 3.0;

/// Interval where the density of `values` is drawn: the finite range widened
/// by `cut` bandwidths on both sides.
pub fn kde_support(values: &[f64], cut: f64) -> Option<(f64, f64)> {
    let bandwidth = scott_bandwidth(values)?;
    let (lo, hi) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    Some((lo - cut * bandwidth, hi + cut * bandwidth))
}

/// `n` evenly spaced points from `lo` to `hi` inclusive.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => (0..n)
            .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Density of `values` at each grid point, scaled by `weight`.
///
/// With `weight` set to a group's share of all rows, the curves of all groups
/// integrate to one together.
pub fn gaussian_kde(values: &[f64], grid: &[f64], weight: f64) -> Option<Vec<(f64, f64)>> {
    let bandwidth = scott_bandwidth(values)?;
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = finite.len() as f64;

    Some(
        grid.iter()
            .map(|&x| {
                let density = finite
                    .iter()
                    .map(|&xi| {
                        let u = (x - xi) / bandwidth;
                        (-0.5 * u * u).exp() * INV_SQRT_2PI / bandwidth
                    })
                    .sum::<f64>()
                    / n;
                (x, density * weight)
            })
            .collect(),
    )
}
