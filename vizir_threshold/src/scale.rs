// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis scales.
//!
//! These map data values into chart pixel space. The host chart projects its own series through
//! them, and the threshold masks project through the very same instances so mask edges line up
//! with the rendered data.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A linear mapping from a data interval onto a pixel interval.
///
/// Either interval may run backwards; screen-space y scales usually map the domain minimum to
/// the bottom of the chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a scale mapping `domain` onto `range`.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Widens the domain outwards to round step boundaries.
    ///
    /// The step is picked so that roughly `steps` intervals cover the original domain.
    pub fn nice(self, steps: usize) -> Self {
        let (d0, d1) = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        let step = nice_step((hi - lo) / steps.max(1) as f64);
        if step == 0.0 {
            return self;
        }
        let (lo, hi) = ((lo / step).floor() * step, (hi / step).ceil() * step);
        let domain = if d0 <= d1 { (lo, hi) } else { (hi, lo) };
        Self { domain, ..self }
    }

    /// Maps a data value to pixel space.
    ///
    /// A degenerate domain maps every value to the start of the range.
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return r0;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    /// Clamps a data value into the domain.
    pub fn clamp_to_domain(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        v.clamp(d0.min(d1), d0.max(d1))
    }

    /// The data interval.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The pixel interval.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// `1`, `2`, or `5` times a power of ten, whichever is nearest above `raw`.
fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let mantissa = raw / magnitude;
    let rounded = match mantissa {
        m if m <= 1.0 => 1.0,
        m if m <= 2.0 => 2.0,
        m if m <= 5.0 => 5.0,
        _ => 10.0,
    };
    rounded * magnitude
}

/// Evenly spaced positions for index-based data.
///
/// The first index sits on the start of the range and index `count - 1` on its end. Indices
/// past the end keep the same step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePoint {
    start: f64,
    step: f64,
    count: usize,
}

impl ScalePoint {
    /// Spreads `count` positions across `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        let step = if count > 1 {
            (range.1 - range.0) / (count - 1) as f64
        } else {
            0.0
        };
        Self {
            start: range.0,
            step,
            count,
        }
    }

    /// Number of positions.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Position of `index`.
    pub fn x(&self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }
}

/// Equal-width slots for bar charts, one per index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    start: f64,
    slot: f64,
    padding: f64,
    count: usize,
}

impl ScaleBand {
    /// Splits `range` into `count` slots with no gap between bars.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        let slot = if count > 0 {
            (range.1 - range.0) / count as f64
        } else {
            0.0
        };
        Self {
            start: range.0,
            slot,
            padding: 0.0,
            count,
        }
    }

    /// Sets the gap around each bar as a fraction of its slot, clamped to `[0, 1)`.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.clamp(0.0, 0.95);
        self
    }

    /// Number of slots.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Width of one bar.
    pub fn band_width(&self) -> f64 {
        self.slot * (1.0 - self.padding)
    }

    /// Left edge of the bar at `index`.
    pub fn x(&self, index: usize) -> f64 {
        self.start + self.slot * index as f64 + self.slot * self.padding * 0.5
    }

    /// Center of the slot at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.start + self.slot * (index as f64 + 0.5)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn point_positions_span_the_range() {
        let scale = ScalePoint::new((10.0, 110.0), 5);
        assert!(close(scale.x(0), 10.0));
        assert!(close(scale.x(2), 60.0));
        assert!(close(scale.x(4), 110.0));
        assert!(close(scale.x(5), 135.0));
        assert!(close(ScalePoint::new((10.0, 110.0), 1).x(0), 10.0));
    }

    #[test]
    fn linear_scale_flips_for_screen_y() {
        let s = ScaleLinear::new((-10.0, 20.0), (300.0, 0.0));
        assert!(close(s.map(-10.0), 300.0));
        assert!(close(s.map(20.0), 0.0));
        assert!(close(s.map(5.0), 150.0));
        assert!(close(ScaleLinear::new((3.0, 3.0), (7.0, 9.0)).map(100.0), 7.0));
    }

    #[test]
    fn nice_widens_to_round_bounds() {
        let s = ScaleLinear::new((-9.5, 19.0), (0.0, 1.0)).nice(5);
        assert_eq!(s.domain(), (-10.0, 20.0));
        let s = ScaleLinear::new((1.0, 3.0), (0.0, 1.0)).nice(5);
        assert_eq!(s.domain(), (1.0, 3.0));
        let flat = ScaleLinear::new((2.0, 2.0), (0.0, 1.0)).nice(5);
        assert_eq!(flat.domain(), (2.0, 2.0));
    }

    #[test]
    fn clamp_respects_reversed_domains() {
        let s = ScaleLinear::new((10.0, -10.0), (0.0, 1.0));
        assert_eq!(s.clamp_to_domain(50.0), 10.0);
        assert_eq!(s.clamp_to_domain(-50.0), -10.0);
    }

    #[test]
    fn bars_sit_centered_in_their_slots() {
        let band = ScaleBand::new((0.0, 100.0), 4).with_padding(0.2);
        assert!(close(band.band_width(), 20.0));
        for i in 0..4 {
            assert!(close(band.x(i) + band.band_width() * 0.5, band.center(i)));
        }
        assert!(close(band.x(0), 2.5));
    }
}
