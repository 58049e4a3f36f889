//! Color palettes and continuous color scales.

use egui::Color32;

/// Qualitative palette for categorical series (dark-theme friendly).
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(99, 110, 250),  // Blue
    Color32::from_rgb(239, 85, 59),   // Red
    Color32::from_rgb(0, 204, 150),   // Green
    Color32::from_rgb(171, 99, 250),  // Purple
    Color32::from_rgb(255, 161, 90),  // Orange
    Color32::from_rgb(25, 211, 243),  // Cyan
    Color32::from_rgb(255, 102, 146), // Pink
    Color32::from_rgb(182, 232, 128), // Light Green
    Color32::from_rgb(255, 151, 255), // Magenta
    Color32::from_rgb(254, 203, 82),  // Yellow
];

/// Density contour color.
pub const DENSITY_GREEN: Color32 = Color32::from_rgb(0, 255, 0);

/// Fixed product colors for the polar winds chart.
pub fn product_color(product: &str) -> Option<[u8; 3]> {
    match product {
        "Solar Panels" => Some([128, 128, 0]),   // olive
        "Wind Turbines" => Some([0, 0, 255]),    // blue
        "Eco Batteries" => Some([0, 128, 0]),    // green
        "Water Purifiers" => Some([255, 165, 0]), // orange
        _ => None,
    }
}

pub fn series_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

pub fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

/// Piecewise-linear continuous color scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    Viridis,
    Blues,
}

const VIRIDIS: [[u8; 3]; 10] = [
    [68, 1, 84],
    [72, 40, 120],
    [62, 74, 137],
    [49, 104, 142],
    [38, 130, 142],
    [31, 158, 137],
    [53, 183, 121],
    [109, 205, 89],
    [180, 222, 44],
    [253, 231, 37],
];

const BLUES: [[u8; 3]; 9] = [
    [247, 251, 255],
    [222, 235, 247],
    [198, 219, 239],
    [158, 202, 225],
    [107, 174, 214],
    [66, 146, 198],
    [33, 113, 181],
    [8, 81, 156],
    [8, 48, 107],
];

impl ColorScale {
    fn stops(self) -> &'static [[u8; 3]] {
        match self {
            ColorScale::Viridis => &VIRIDIS,
            ColorScale::Blues => &BLUES,
        }
    }

    /// Color at `t` in `[0, 1]`; out-of-range and NaN inputs are clamped.
    pub fn sample(self, t: f64) -> Color32 {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f64;
        let lo = (pos.floor() as usize).min(stops.len() - 1);
        let hi = (lo + 1).min(stops.len() - 1);
        let frac = pos - lo as f64;

        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        Color32::from_rgb(
            mix(stops[lo][0], stops[hi][0]),
            mix(stops[lo][1], stops[hi][1]),
            mix(stops[lo][2], stops[hi][2]),
        )
    }

    /// Color for `value` within `range`.
    pub fn sample_in(self, value: f64, range: (f64, f64)) -> Color32 {
        self.sample(normalize(value, range))
    }
}

/// Map `value` into `[0, 1]` relative to `range`; a zero-width range maps to 0.5.
pub fn normalize(value: f64, range: (f64, f64)) -> f64 {
    let (lo, hi) = range;
    if hi > lo {
        (value - lo) / (hi - lo)
    } else {
        0.5
    }
}

/// Widen `[min, max]` symmetrically so `mid` sits in the middle.
pub fn midpoint_range(min: f64, max: f64, mid: f64) -> (f64, f64) {
    let reach = (max - mid).abs().max((mid - min).abs());
    (mid - reach, mid + reach)
}

/// Min and max of `values`, `(0, 0)` when empty.
pub fn value_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let mut it = values.into_iter();
    let Some(first) = it.next() else {
        return (0.0, 0.0);
    };
    it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scale_endpoints_match_stops() {
        assert_eq!(ColorScale::Viridis.sample(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(ColorScale::Viridis.sample(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(ColorScale::Blues.sample(0.0), Color32::from_rgb(247, 251, 255));
    }

    #[test]
    fn midpoint_range_is_centered() {
        assert_eq!(midpoint_range(0.0, 4.0, 0.5), (-3.0, 4.0));
        assert_eq!(midpoint_range(0.0, 0.0, 0.5), (0.0, 1.0));
    }

    #[test]
    fn every_product_has_a_color() {
        for product in crate::data::PRODUCTS {
            assert!(product_color(product).is_some());
        }
        assert!(product_color("Unknown").is_none());
    }

    #[test]
    fn value_range_of_empty_is_zero() {
        assert_eq!(value_range(std::iter::empty()), (0.0, 0.0));
        assert_eq!(value_range([3.0, -1.0, 2.0]), (-1.0, 3.0));
    }

    proptest! {
        #[test]
        fn out_of_range_inputs_clamp(t in -10.0f64..10.0) {
            let c = ColorScale::Blues.sample(t);
            let clamped = ColorScale::Blues.sample(t.clamp(0.0, 1.0));
            prop_assert_eq!(c, clamped);
        }

        #[test]
        fn normalize_stays_in_unit_interval(v in 0.0f64..100.0) {
            let t = normalize(v, (0.0, 100.0));
            prop_assert!((0.0..=1.0).contains(&t));
        }
    }
}
