// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mask geometry generation.
//!
//! A mask reveals the part of an overlaid shape that falls inside its fill. One mask is built
//! per classification band:
//! - a threshold series yields an "above" and a "below" mask whose shared edge follows the
//!   projected threshold path, and
//! - a level list yields one horizontal rectangle per band, stacked top to bottom.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::band::Band;
use crate::geometry::ChartGeometry;
use crate::options::{ThresholdOptions, clamp_padding};
use crate::threshold::{ResolvedThreshold, ThresholdLevels, ThresholdSeries};

/// Fill geometry of a mask.
#[derive(Clone, Debug, PartialEq)]
pub enum MaskShape {
    /// A closed path.
    Path(BezPath),
    /// An axis-aligned rectangle.
    Rect(Rect),
}

/// A named, geometry-bound mask definition.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskRegion {
    /// Element id, stable across renders.
    pub id: String,
    /// The band this mask reveals.
    pub band: Band,
    /// The mask element's own extent.
    pub bounding_box: Rect,
    /// The revealed region.
    pub shape: MaskShape,
    /// Fill paint of the revealed region (white shows content).
    pub paint: Color,
}

/// Builds the masks for a resolved threshold.
///
/// Regions come out top to bottom. A threshold series with no projectable point produces no
/// masks.
pub fn build_masks(
    threshold: &ResolvedThreshold,
    geometry: &ChartGeometry,
    options: &ThresholdOptions,
) -> Vec<MaskRegion> {
    match threshold {
        ResolvedThreshold::Series(series) => series_masks(series, geometry, options),
        ResolvedThreshold::Levels(levels) => level_masks(levels, geometry, options),
    }
}

fn series_masks(
    series: &ThresholdSeries,
    geometry: &ChartGeometry,
    options: &ThresholdOptions,
) -> Vec<MaskRegion> {
    let points: Vec<Option<Point>> = series
        .data()
        .iter()
        .enumerate()
        .map(|(i, v)| geometry.project(v, i))
        .collect();
    let edge = options.line_smooth.path(&points);
    let endpoints = edge
        .elements()
        .first()
        .and_then(|el| el.end_point())
        .zip(edge.elements().last().and_then(|el| el.end_point()));
    let Some((first, last)) = endpoints else {
        return Vec::new();
    };

    let size = geometry.svg_size;
    let bounding_box = Rect::new(0.0, 0.0, size.width, size.height);
    [(Band::Above, 0.0), (Band::Below, size.height)]
        .into_iter()
        .map(|(band, y)| MaskRegion {
            id: options.mask_id(band),
            band,
            bounding_box,
            shape: MaskShape::Path(close_against(&edge, first, last, y)),
            paint: css::WHITE,
        })
        .collect()
}

/// Derives a closed region from `edge`: the leading move becomes a vertical drop from
/// `(first.x, y)`, and a trailing line returns to `(last.x, y)`.
fn close_against(edge: &BezPath, first: Point, last: Point, y: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((first.x, y));
    p.line_to(first);
    for &el in edge.elements().iter().skip(1) {
        p.push(el);
    }
    p.line_to((last.x, y));
    p.close_path();
    p
}

fn level_masks(
    levels: &ThresholdLevels,
    geometry: &ChartGeometry,
    options: &ThresholdOptions,
) -> Vec<MaskRegion> {
    let size = geometry.svg_size;
    let pad = clamp_padding(options.mask_padding);
    let top = -pad;
    let bottom = (size.height + pad).max(top);
    let bounding_box = Rect::new(0.0, top, size.width, bottom);
    // `max`/`min` rather than `clamp`: a NaN projection must not panic.
    let project = |level: f64| geometry.project_y(level).max(top).min(bottom);

    Band::all(levels.len())
        .rev()
        .map(|band| {
            let (lower, upper) = levels.bounds(band);
            let y_upper = upper.map_or(top, project);
            let y_lower = lower.map_or(bottom, project);
            MaskRegion {
                id: options.mask_id(band),
                band,
                bounding_box,
                shape: MaskShape::Rect(Rect::new(
                    0.0,
                    y_upper.min(y_lower),
                    size.width,
                    y_upper.max(y_lower),
                )),
                paint: css::WHITE,
            }
        })
        .collect()
}
