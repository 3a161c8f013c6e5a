// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal line/bar chart that renders to an [`SvgDocument`] and drives plugins.

extern crate alloc;

use alloc::format;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use peniko::color::palette::css;
use smallvec::{SmallVec, smallvec};
use vizir_threshold::{
    AxisX, ChartData, ChartGeometry, ChartPlugin, DrawEvent, Interpolation, PrimitiveKind,
    ScaleBand, ScaleLinear, ScalePoint, Series, Size,
};

use crate::document::{StrokeStyle, SvgDocument, SvgElement, SvgGroup, SvgShape, translucent};

const PALETTE: [Color; 4] = [css::STEEL_BLUE, css::TOMATO, css::SEA_GREEN, css::GOLDENROD];
const Y_TICK_COUNT: usize = 5;

/// Options for line charts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineOptions {
    /// Draw the series line.
    pub show_line: bool,
    /// Draw one marker per value.
    pub show_point: bool,
    /// Fill the area between the line and `area_base`.
    pub show_area: bool,
    /// Line interpolation.
    pub line_smooth: Interpolation,
    /// Data-space baseline of the area, clamped into the y domain.
    pub area_base: f64,
    /// Marker radius.
    pub point_radius: f64,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            show_line: true,
            show_point: true,
            show_area: false,
            line_smooth: Interpolation::None,
            area_base: 0.0,
            point_radius: 4.0,
        }
    }
}

impl LineOptions {
    /// Enables or disables the series line.
    pub fn with_line(mut self, show: bool) -> Self {
        self.show_line = show;
        self
    }

    /// Enables or disables point markers.
    pub fn with_points(mut self, show: bool) -> Self {
        self.show_point = show;
        self
    }

    /// Enables or disables the area fill.
    pub fn with_area(mut self, show: bool) -> Self {
        self.show_area = show;
        self
    }

    /// Sets the line interpolation.
    pub fn with_line_smooth(mut self, line_smooth: Interpolation) -> Self {
        self.line_smooth = line_smooth;
        self
    }

    /// Sets the area baseline.
    pub fn with_area_base(mut self, area_base: f64) -> Self {
        self.area_base = area_base;
        self
    }
}

/// Options for bar charts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarOptions {
    /// Gap around each bar as a fraction of its slot.
    pub band_padding: f64,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self { band_padding: 0.2 }
    }
}

/// Chart type and its options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChartKind {
    /// A line chart.
    Line(LineOptions),
    /// A bar chart.
    Bar(BarOptions),
}

/// A chart: data plus layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    /// Chart type.
    pub kind: ChartKind,
    /// Chart data.
    pub data: ChartData,
    /// SVG document size.
    pub size: Size,
    /// Inset of the data rectangle from every edge.
    pub padding: f64,
    /// Lower y bound override.
    pub low: Option<f64>,
    /// Upper y bound override.
    pub high: Option<f64>,
}

impl Chart {
    /// Creates a line chart with default options.
    pub fn line(data: ChartData, size: Size) -> Self {
        Self::new(ChartKind::Line(LineOptions::default()), data, size)
    }

    /// Creates a bar chart with default options.
    pub fn bar(data: ChartData, size: Size) -> Self {
        Self::new(ChartKind::Bar(BarOptions::default()), data, size)
    }

    /// Creates a chart.
    pub fn new(kind: ChartKind, data: ChartData, size: Size) -> Self {
        Self {
            kind,
            data,
            size,
            padding: 10.0,
            low: None,
            high: None,
        }
    }

    /// Sets the data-rectangle inset.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Pins the lower y bound.
    pub fn with_low(mut self, low: f64) -> Self {
        self.low = Some(low);
        self
    }

    /// Pins the upper y bound.
    pub fn with_high(mut self, high: f64) -> Self {
        self.high = Some(high);
        self
    }

    /// Computes the chart rectangle and scales for the current data.
    pub fn geometry(&self) -> ChartGeometry {
        let (w, h) = (self.size.width, self.size.height);
        let pad = self.padding.min(w * 0.5).min(h * 0.5);
        let chart_rect = Rect::new(pad, pad, w - pad, h - pad);

        let baseline = match self.kind {
            ChartKind::Bar(_) => Some(0.0),
            ChartKind::Line(opts) if opts.show_area => Some(opts.area_base),
            ChartKind::Line(_) => None,
        };
        let (mut lo, mut hi) = self.data.y_extent().unwrap_or((0.0, 1.0));
        if let Some(base) = baseline.filter(|b| b.is_finite()) {
            lo = lo.min(base);
            hi = hi.max(base);
        }
        lo = self.low.unwrap_or(lo);
        hi = self.high.unwrap_or(hi);
        if lo == hi {
            lo -= 1.0;
            hi += 1.0;
        }
        let mut axis_y = ScaleLinear::new((lo, hi), (chart_rect.y1, chart_rect.y0));
        if self.low.is_none() && self.high.is_none() {
            axis_y = axis_y.nice(Y_TICK_COUNT);
        }

        let count = self.data.longest_series_len().max(self.data.labels.len());
        let x_range = (chart_rect.x0, chart_rect.x1);
        let axis_x = match self.kind {
            ChartKind::Bar(opts) => AxisX::Band(
                ScaleBand::new(x_range, count).with_padding(opts.band_padding),
            ),
            ChartKind::Line(_) if self.data.is_multi_dimensional() => {
                let (x0, x1) = match self.data.x_extent() {
                    Some((a, b)) if a != b => (a, b),
                    Some((a, _)) => (a - 1.0, a + 1.0),
                    None => (0.0, 1.0),
                };
                AxisX::Continuous(ScaleLinear::new((x0, x1), x_range))
            }
            ChartKind::Line(_) => AxisX::Index(ScalePoint::new(x_range, count)),
        };

        ChartGeometry {
            svg_size: self.size,
            chart_rect,
            axis_x,
            axis_y,
        }
    }

    /// Renders one pass.
    ///
    /// Every plugin's `created` hook runs first; then each primitive is reported to every
    /// plugin in turn and the returned effects are applied to the element before it is
    /// appended to its series group.
    pub fn render(&self, plugins: &[&dyn ChartPlugin]) -> SvgDocument {
        let geometry = self.geometry();
        let mut doc = SvgDocument::new(self.size);
        doc.classes.push(
            match self.kind {
                ChartKind::Line(_) => "ct-chart-line",
                ChartKind::Bar(_) => "ct-chart-bar",
            }
            .into(),
        );
        for plugin in plugins {
            doc.defs.extend(plugin.on_created(&geometry));
        }

        for (series_index, series) in self.data.series.iter().enumerate() {
            let mut group = SvgGroup {
                classes: smallvec!["ct-series".into(), format!("ct-series-{series_index}")],
                children: Vec::new(),
            };
            let mut emit = SeriesEmitter {
                plugins,
                series_index,
                series,
                group: &mut group,
            };
            let color = PALETTE[series_index % PALETTE.len()];
            match self.kind {
                ChartKind::Line(opts) => draw_line_series(&mut emit, &geometry, opts, color),
                ChartKind::Bar(_) => draw_bar_series(&mut emit, &geometry, color),
            }
            doc.groups.push(group);
        }
        doc
    }
}

struct SeriesEmitter<'a> {
    plugins: &'a [&'a dyn ChartPlugin],
    series_index: usize,
    series: &'a Series,
    group: &'a mut SvgGroup,
}

impl SeriesEmitter<'_> {
    fn emit(&mut self, kind: PrimitiveKind, index: usize, element: SvgElement) {
        let event = DrawEvent {
            kind,
            series_index: self.series_index,
            series_name: self.series.name(),
            index,
            value: self.series.data.get(index).copied().unwrap_or_default(),
        };
        let event = match kind {
            PrimitiveKind::Line | PrimitiveKind::Area => DrawEvent {
                index: 0,
                value: vizir_threshold::Value::Missing,
                ..event
            },
            PrimitiveKind::Point | PrimitiveKind::Bar => event,
        };
        let mut elements: SmallVec<[SvgElement; 3]> = smallvec![element];
        for plugin in self.plugins {
            let effect = plugin.on_draw(&event);
            elements = elements
                .into_iter()
                .flat_map(|e| e.apply(&effect))
                .collect();
        }
        self.group.children.extend(elements);
    }
}

fn draw_line_series(
    emit: &mut SeriesEmitter<'_>,
    geometry: &ChartGeometry,
    opts: LineOptions,
    color: Color,
) {
    let points: Vec<Option<Point>> = emit
        .series
        .data
        .iter()
        .enumerate()
        .map(|(i, v)| geometry.project(v, i))
        .collect();
    let line = opts.line_smooth.path(&points);

    if opts.show_area && !line.elements().is_empty() {
        let base = geometry.axis_y.clamp_to_domain(opts.area_base);
        let area = area_path(&line, geometry.project_y(base));
        let element = SvgElement::new(SvgShape::Path(area))
            .with_class("ct-area")
            .with_fill(translucent(color, 0.2));
        emit.emit(PrimitiveKind::Area, 0, element);
    }
    if opts.show_line && !line.elements().is_empty() {
        let element = SvgElement::new(SvgShape::Path(line))
            .with_class("ct-line")
            .with_stroke(StrokeStyle::solid(color, 2.0));
        emit.emit(PrimitiveKind::Line, 0, element);
    }
    if opts.show_point {
        for (index, center) in points.iter().enumerate() {
            let Some(center) = *center else { continue };
            let element = SvgElement::new(SvgShape::Circle {
                center,
                radius: opts.point_radius,
            })
            .with_class("ct-point")
            .with_fill(color);
            emit.emit(PrimitiveKind::Point, index, element);
        }
    }
}

fn draw_bar_series(emit: &mut SeriesEmitter<'_>, geometry: &ChartGeometry, color: Color) {
    let AxisX::Band(band) = geometry.axis_x else {
        return;
    };
    let y_zero = geometry.project_y(geometry.axis_y.clamp_to_domain(0.0));
    let width = band.band_width();
    for (index, value) in emit.series.data.iter().enumerate() {
        let Some(y) = value.y() else { continue };
        let x = band.x(index);
        let y = geometry.project_y(y);
        let rect = Rect::new(x, y.min(y_zero), x + width, y.max(y_zero));
        let element = SvgElement::new(SvgShape::Rect(rect))
            .with_class("ct-bar")
            .with_fill(color);
        emit.emit(PrimitiveKind::Bar, index, element);
    }
}

/// Closes `line` down to the horizontal baseline `y`.
fn area_path(line: &BezPath, y: f64) -> BezPath {
    let els = line.elements();
    let (Some(first), Some(last)) = (
        els.first().and_then(|el| el.end_point()),
        els.last().and_then(|el| el.end_point()),
    ) else {
        return BezPath::new();
    };
    let mut area = BezPath::new();
    area.move_to((first.x, y));
    area.line_to(first);
    for &el in els.iter().skip(1) {
        area.push(el);
    }
    area.line_to((last.x, y));
    area.close_path();
    area
}
