//! Temperature-keyed gradients for the FIGlet city name and temperature
//!
//! Both renderers share one palette per temperature band. While a fetch is
//! running the stops slide along the gradient, producing a moving seam.

use artbox::{Color as ArtColor, ColorStop, Fill, LinearGradient};

use crate::state::LOADING_ANIM_CYCLE_TICKS;

/// Angle of the sliding seam used by the city header
pub const HEADER_ANGLE: f32 = 5.0;

/// Angle of the temperature readout; horizontal
pub const READOUT_ANGLE: f32 = 0.0;

/// Pair of colors a gradient runs between
#[derive(Clone, Copy)]
pub struct Palette {
    pub start: ArtColor,
    pub end: ArtColor,
}

/// Upper bound (exclusive) of each band with its start and end colors.
const BANDS: [(i32, Rgb, Rgb); 4] = [
    (0, (150, 200, 255), (200, 230, 255)),   // ice
    (15, (100, 180, 255), (150, 220, 200)),  // cool
    (25, (100, 200, 150), (255, 220, 100)),  // mild
    (35, (255, 180, 80), (255, 120, 80)),    // warm
];
const HOT: (Rgb, Rgb) = ((255, 100, 80), (255, 60, 60));
const NO_DATA: (Rgb, Rgb) = ((180, 180, 180), (220, 220, 220));

type Rgb = (u8, u8, u8);

fn rgb((r, g, b): Rgb) -> ArtColor {
    ArtColor::rgb(r, g, b)
}

fn band(temperature: Option<i32>) -> (Rgb, Rgb) {
    match temperature {
        None => NO_DATA,
        Some(t) => BANDS
            .iter()
            .find(|(upper, _, _)| t < *upper)
            .map_or(HOT, |(_, start, end)| (*start, *end)),
    }
}

impl Palette {
    pub fn for_temperature(temperature: Option<i32>) -> Self {
        let (start, end) = band(temperature);
        Self {
            start: rgb(start),
            end: rgb(end),
        }
    }

    /// Fill whose stops are shifted by `phase` (0..1) along the gradient.
    pub fn fill(self, angle: f32, phase: f32) -> Fill {
        let phase = phase.rem_euclid(1.0);
        let stops = self.stops();

        // Pin both ends to the color that wrapped past them
        let wrap = color_at(&stops, (1.0 - phase).rem_euclid(1.0));
        let mut shifted: Vec<(f32, ArtColor)> = stops
            .iter()
            .map(|&(pos, color)| ((pos + phase) % 1.0, color))
            .collect();
        shifted.push((0.0, wrap));
        shifted.push((1.0, wrap));
        shifted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let stops = shifted
            .into_iter()
            .map(|(pos, color)| ColorStop::new(pos, color))
            .collect();
        Fill::Linear(LinearGradient::new(angle, stops))
    }

    fn stops(self) -> [(f32, ArtColor); 5] {
        let edge = self.start.interpolate(self.end, 0.08);
        [
            (0.0, edge),
            (0.35, self.start),
            (0.5, self.start.interpolate(self.end, 0.5)),
            (0.65, self.end),
            (1.0, edge),
        ]
    }
}

/// Position of the seam within its cycle; zero when idle.
pub fn seam_phase(is_animating: bool, tick_count: u32) -> f32 {
    if !is_animating {
        return 0.0;
    }
    let cycle = LOADING_ANIM_CYCLE_TICKS.max(1);
    (tick_count % cycle) as f32 / cycle as f32
}

/// Linear interpolation over sorted stops.
fn color_at(stops: &[(f32, ArtColor)], position: f32) -> ArtColor {
    let position = position.clamp(0.0, 1.0);
    let upper = stops
        .iter()
        .position(|(pos, _)| *pos >= position)
        .unwrap_or(stops.len() - 1);
    if upper == 0 {
        return stops[0].1;
    }
    let (lo_pos, lo) = stops[upper - 1];
    let (hi_pos, hi) = stops[upper];
    let span = hi_pos - lo_pos;
    if span <= f32::EPSILON {
        return hi;
    }
    lo.interpolate(hi, (position - lo_pos) / span)
}
