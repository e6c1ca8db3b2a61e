use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

/// Stops of the Turbo scale, evenly spaced over [0, 1].
const TURBO: [(u8, u8, u8); 15] = [
    (0x30, 0x12, 0x3b),
    (0x41, 0x45, 0xab),
    (0x46, 0x75, 0xed),
    (0x39, 0xa2, 0xfc),
    (0x1b, 0xcf, 0xd4),
    (0x24, 0xec, 0xa6),
    (0x61, 0xfc, 0x6c),
    (0xa4, 0xfc, 0x3b),
    (0xd1, 0xe8, 0x34),
    (0xf3, 0xc6, 0x3a),
    (0xfe, 0x9b, 0x2d),
    (0xf3, 0x63, 0x15),
    (0xd9, 0x38, 0x06),
    (0xb1, 0x19, 0x01),
    (0x7a, 0x04, 0x02),
];

/// A named continuous colour scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    Turbo,
}

impl ColorScale {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "turbo" => Some(ColorScale::Turbo),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScale::Turbo => "Turbo",
        }
    }

    /// Colour at position `t` in [0, 1] (clamped; `NaN` maps to the low end).
    pub fn sample(&self, t: f64) -> Srgb<u8> {
        match self {
            ColorScale::Turbo => interpolate(&TURBO, t),
        }
    }

    /// Colour for `value` on a scale running from `cmin` to `cmax`.
    pub fn sample_range(&self, value: f64, cmin: f64, cmax: f64) -> Srgb<u8> {
        let span = cmax - cmin;
        if span <= 0.0 {
            return self.sample(0.0);
        }
        self.sample((value - cmin) / span)
    }
}

fn interpolate(stops: &[(u8, u8, u8)], t: f64) -> Srgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let last = stops.len() - 1;
    let pos = t * last as f64;
    let i = (pos.floor() as usize).min(last - 1);
    let frac = (pos - i as f64) as f32;

    let to_linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = to_linear(stops[i]).mix(to_linear(stops[i + 1]), frac);
    Srgb::<f32>::from_linear(mixed).into_format()
}

// ---------------------------------------------------------------------------
// Qualitative palettes
// ---------------------------------------------------------------------------

const SET2: [(u8, u8, u8); 8] = [
    (0x66, 0xc2, 0xa5),
    (0xfc, 0x8d, 0x62),
    (0x8d, 0xa0, 0xcb),
    (0xe7, 0x8a, 0xc3),
    (0xa6, 0xd8, 0x54),
    (0xff, 0xd9, 0x2f),
    (0xe5, 0xc4, 0x94),
    (0xb3, 0xb3, 0xb3),
];

/// `n` colours of the Set2 palette, cycling once its eight colours run out.
pub fn set2_palette(n: usize) -> Vec<Srgb<u8>> {
    SET2.iter()
        .cycle()
        .take(n)
        .map(|&(r, g, b)| Srgb::new(r, g, b))
        .collect()
}

/// `n` colours of a named qualitative palette (only Set2 is known).
pub fn named_palette(name: &str, n: usize) -> Option<Vec<Srgb<u8>>> {
    match name.to_ascii_lowercase().as_str() {
        "set2" => Some(set2_palette(n)),
        _ => None,
    }
}

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

pub fn to_rgb(c: Srgb<u8>) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: category label → colour
// ---------------------------------------------------------------------------

/// Maps category labels to the palette colours, in label order.
#[derive(Debug, Clone)]
pub struct CategoryColorMap {
    order: Vec<String>,
    mapping: BTreeMap<String, Srgb<u8>>,
    default_color: Srgb<u8>,
}

impl CategoryColorMap {
    /// Label `i` gets `palette[i]`; the palette should cover every label.
    pub fn new(labels: &[String], palette: Vec<Srgb<u8>>) -> Self {
        let mapping = labels.iter().cloned().zip(palette).collect();
        CategoryColorMap {
            order: labels.to_vec(),
            mapping,
            default_color: Srgb::new(128, 128, 128),
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Srgb<u8> {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (label → colour) in label order.
    pub fn legend_entries(&self) -> Vec<(String, Srgb<u8>)> {
        self.order
            .iter()
            .map(|label| (label.clone(), self.color_for(label)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turbo_endpoints_match_first_and_last_stop() {
        assert_eq!(ColorScale::Turbo.sample(0.0), Srgb::new(0x30, 0x12, 0x3b));
        assert_eq!(ColorScale::Turbo.sample(1.0), Srgb::new(0x7a, 0x04, 0x02));
        assert_eq!(ColorScale::Turbo.sample(-3.0), ColorScale::Turbo.sample(0.0));
        assert_eq!(ColorScale::Turbo.sample(f64::NAN), ColorScale::Turbo.sample(0.0));
    }

    #[test]
    fn turbo_hits_interior_stops_exactly() {
        assert_eq!(ColorScale::Turbo.sample(0.5), Srgb::new(0xa4, 0xfc, 0x3b));
    }

    #[test]
    fn range_sampling_handles_single_category() {
        let c = ColorScale::Turbo.sample_range(0.0, 0.0, 0.0);
        assert_eq!(c, ColorScale::Turbo.sample(0.0));
        let top = ColorScale::Turbo.sample_range(5.0, 0.0, 5.0);
        assert_eq!(top, ColorScale::Turbo.sample(1.0));
    }

    #[test]
    fn scale_names_resolve() {
        assert_eq!(ColorScale::from_name("Turbo"), Some(ColorScale::Turbo));
        assert_eq!(ColorScale::from_name("viridis"), None);
    }

    #[test]
    fn set2_cycles_after_eight_colours() {
        let palette = set2_palette(10);
        assert_eq!(palette.len(), 10);
        assert_eq!(palette[8], palette[0]);
        assert_eq!(palette[9], palette[1]);
        assert_ne!(palette[0], palette[1]);
    }

    #[test]
    fn category_map_follows_label_order() {
        let labels = vec!["vegan".to_string(), "meat".to_string()];
        let map = CategoryColorMap::new(&labels, set2_palette(2));

        assert_eq!(map.color_for("vegan"), Srgb::new(0x66, 0xc2, 0xa5));
        assert_eq!(map.color_for("fish"), Srgb::new(128, 128, 128));
        let legend: Vec<_> = map.legend_entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(legend, labels);
    }
}
