// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart geometry handed to plugins during a render pass.

use kurbo::{Point, Rect};

use crate::scale::{ScaleBand, ScaleLinear, ScalePoint};
use crate::value::Value;

/// A width/height pair in chart coordinate units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Horizontal projection used by the host chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisX {
    /// Index-based data: one evenly stepped position per label.
    Index(ScalePoint),
    /// Bar charts: values sit at the center of their band.
    Band(ScaleBand),
    /// Multi-dimensional data: explicit x values through a linear scale.
    ///
    /// Scalar values have no x of their own and use their index instead.
    Continuous(ScaleLinear),
}

impl AxisX {
    /// Projects the x coordinate of `value` at `index`.
    pub fn project(&self, value: &Value, index: usize) -> f64 {
        match self {
            Self::Index(scale) => scale.x(index),
            Self::Band(scale) => scale.center(index),
            Self::Continuous(scale) => scale.map(value.x().unwrap_or(index as f64)),
        }
    }
}

/// Everything a plugin needs to place geometry on the rendered chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartGeometry {
    /// Size of the whole SVG document.
    pub svg_size: Size,
    /// The data rectangle inside the chart padding.
    pub chart_rect: Rect,
    /// Horizontal projection.
    pub axis_x: AxisX,
    /// Vertical projection (range runs from `chart_rect.y1` up to `chart_rect.y0`).
    pub axis_y: ScaleLinear,
}

impl ChartGeometry {
    /// Projects a value at `index` into pixel space. Holes project to `None`.
    pub fn project(&self, value: &Value, index: usize) -> Option<Point> {
        let y = value.y()?;
        Some(Point::new(
            self.axis_x.project(value, index),
            self.axis_y.map(y),
        ))
    }

    /// Projects a data-space y value (a horizontal level) into pixel space.
    pub fn project_y(&self, y: f64) -> f64 {
        self.axis_y.map(y)
    }
}
