// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny SVG document tree and its serializer.
//!
//! Rendered primitives are plain values; plugin effects are applied by producing new element
//! values rather than mutating live nodes.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use kurbo::{BezPath, PathEl, Point, Rect};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use smallvec::SmallVec;
use vizir_threshold::{DrawEffect, MaskRegion, MaskShape, Size};

/// Stroke paint and width.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in chart coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Geometry of a rendered element.
#[derive(Clone, Debug, PartialEq)]
pub enum SvgShape {
    /// A `<path>`.
    Path(BezPath),
    /// A `<rect>`.
    Rect(Rect),
    /// A `<circle>`.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
    },
}

/// A rendered element: geometry, classes, an optional mask reference, and paint.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgElement {
    /// Element geometry.
    pub shape: SvgShape,
    /// CSS classes, in application order.
    pub classes: SmallVec<[String; 3]>,
    /// Id of the referenced mask.
    pub mask: Option<String>,
    /// Fill paint (`None` writes `fill="none"`).
    pub fill: Option<Brush>,
    /// Optional stroke.
    pub stroke: Option<StrokeStyle>,
}

impl SvgElement {
    /// Creates an unpainted, unclassed element.
    pub fn new(shape: SvgShape) -> Self {
        Self {
            shape,
            classes: SmallVec::new(),
            mask: None,
            fill: None,
            stroke: None,
        }
    }

    /// Adds a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the mask reference.
    pub fn with_mask(mut self, id: impl Into<String>) -> Self {
        self.mask = Some(id.into());
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Sets the stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Returns `true` if the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Applies a plugin effect, returning the element followed by any masked copies.
    pub fn apply(self, effect: &DrawEffect) -> SmallVec<[Self; 3]> {
        match effect {
            DrawEffect::Skip => smallvec::smallvec![self],
            DrawEffect::Classify { class_name, .. } => {
                smallvec::smallvec![self.with_class(class_name.clone())]
            }
            DrawEffect::Overlay { base, clones } => {
                let mut out = SmallVec::new();
                for overlay in clones {
                    out.push(
                        self.clone()
                            .with_mask(overlay.mask_id.clone())
                            .with_class(overlay.class_name.clone()),
                    );
                }
                out.insert(
                    0,
                    self.with_mask(base.mask_id.clone())
                        .with_class(base.class_name.clone()),
                );
                out
            }
        }
    }
}

/// A `<g>` holding one series' elements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgGroup {
    /// CSS classes of the group.
    pub classes: SmallVec<[String; 2]>,
    /// Children in paint order.
    pub children: Vec<SvgElement>,
}

/// A rendered chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgDocument {
    /// Document size.
    pub size: Size,
    /// Classes on the root `<svg>`.
    pub classes: SmallVec<[String; 2]>,
    /// Mask definitions written into `<defs>`.
    pub defs: Vec<MaskRegion>,
    /// Series groups in paint order.
    pub groups: Vec<SvgGroup>,
}

impl SvgDocument {
    /// Creates an empty document.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Looks up a mask definition by id.
    pub fn mask(&self, id: &str) -> Option<&MaskRegion> {
        self.defs.iter().find(|m| m.id == id)
    }

    /// Every element, group by group.
    pub fn elements(&self) -> impl Iterator<Item = &SvgElement> {
        self.groups.iter().flat_map(|g| g.children.iter())
    }

    /// Every element carrying `class`.
    pub fn elements_with_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a SvgElement> {
        self.elements().filter(move |e| e.has_class(class))
    }

    /// Serializes the document.
    ///
    /// Output is deterministic: `<defs>` first, then groups and children in paint order.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let (w, h) = (self.size.width, self.size.height);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}""#
        );
        write_classes(&mut out, &self.classes);
        out.push_str(">\n");

        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            for mask in &self.defs {
                write_mask(&mut out, mask);
            }
            out.push_str("</defs>\n");
        }

        for group in &self.groups {
            out.push_str("<g");
            write_classes(&mut out, &group.classes);
            out.push_str(">\n");
            for element in &group.children {
                write_element(&mut out, element);
            }
            out.push_str("</g>\n");
        }

        out.push_str("</svg>\n");
        out
    }
}

fn write_mask(out: &mut String, mask: &MaskRegion) {
    let b = mask.bounding_box;
    let _ = writeln!(
        out,
        r#"<mask id="{}" maskUnits="userSpaceOnUse" x="{}" y="{}" width="{}" height="{}">"#,
        escape_xml(&mask.id),
        b.x0,
        b.y0,
        b.width(),
        b.height(),
    );
    let brush = Brush::Solid(mask.paint);
    match &mask.shape {
        MaskShape::Path(path) => {
            out.push_str(r#"<path d=""#);
            write_path_data(out, path);
            out.push('"');
        }
        MaskShape::Rect(r) => write_rect_attrs(out, *r),
    }
    write_paint_attr(out, "fill", &brush);
    out.push_str("/>\n</mask>\n");
}

fn write_element(out: &mut String, element: &SvgElement) {
    match &element.shape {
        SvgShape::Path(path) => {
            out.push_str(r#"<path d=""#);
            write_path_data(out, path);
            out.push('"');
        }
        SvgShape::Rect(r) => write_rect_attrs(out, *r),
        SvgShape::Circle { center, radius } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{radius}""#,
                center.x, center.y
            );
        }
    }
    write_classes(out, &element.classes);
    if let Some(id) = &element.mask {
        let _ = write!(out, r#" mask="url(#{})""#, escape_xml(id));
    }
    match &element.fill {
        Some(fill) => write_paint_attr(out, "fill", fill),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &element.stroke {
        write_paint_attr(out, "stroke", &stroke.brush);
        let _ = write!(out, r#" stroke-width="{}""#, stroke.stroke_width);
    }
    out.push_str("/>\n");
}

fn write_rect_attrs(out: &mut String, r: Rect) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        r.x0,
        r.y0,
        r.width(),
        r.height(),
    );
}

fn write_classes(out: &mut String, classes: &[String]) {
    if classes.is_empty() {
        return;
    }
    out.push_str(r#" class=""#);
    for (i, class) in classes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&escape_xml(class));
    }
    out.push('"');
}

/// Writes SVG path data (`M`, `L`, `Q`, `C`, `Z` commands with absolute coordinates).
pub(crate) fn write_path_data(out: &mut String, path: &BezPath) {
    for (i, el) in path.elements().iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = match *el {
            PathEl::MoveTo(p) => write!(out, "M{},{}", p.x, p.y),
            PathEl::LineTo(p) => write!(out, "L{},{}", p.x, p.y),
            PathEl::QuadTo(p1, p2) => write!(out, "Q{},{} {},{}", p1.x, p1.y, p2.x, p2.y),
            PathEl::CurveTo(p1, p2, p3) => write!(
                out,
                "C{},{} {},{} {},{}",
                p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
            ),
            PathEl::ClosePath => write!(out, "Z"),
        };
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = alloc::format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".into(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// A solid paint with `alpha` applied.
pub(crate) fn translucent(color: Color, alpha: f32) -> Brush {
    Brush::Solid(color.with_alpha(alpha))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use smallvec::smallvec;
    use vizir_threshold::{Band, Overlay};

    use super::*;

    fn overlay(band: Band, name: &str) -> Overlay {
        Overlay {
            band,
            mask_id: alloc::format!("mask-{name}"),
            class_name: name.to_string(),
        }
    }

    #[test]
    fn overlay_keeps_the_original_first_and_appends_clones() {
        let line = SvgElement::new(SvgShape::Rect(Rect::new(0.0, 0.0, 1.0, 1.0))).with_class("ct-line");
        let effect = DrawEffect::Overlay {
            base: overlay(Band::Below, "below"),
            clones: smallvec![overlay(Band::Above, "above")],
        };
        let out = line.apply(&effect);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].mask.as_deref(), Some("mask-below"));
        assert!(out[0].has_class("ct-line") && out[0].has_class("below"));
        assert_eq!(out[1].mask.as_deref(), Some("mask-above"));
        assert!(out[1].has_class("ct-line") && out[1].has_class("above"));
        assert_eq!(out[0].shape, out[1].shape);
    }

    #[test]
    fn path_data_is_compact_and_absolute() {
        let mut p = BezPath::new();
        p.move_to((0.0, 1.5));
        p.line_to((2.0, 3.0));
        p.curve_to((1.0, 1.0), (2.0, 2.0), (3.0, 3.0));
        p.close_path();
        let mut out = String::new();
        write_path_data(&mut out, &p);
        assert_eq!(out, "M0,1.5 L2,3 C1,1 2,2 3,3 Z");
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut doc = SvgDocument::new(Size::new(10.0, 10.0));
        doc.groups.push(SvgGroup {
            classes: smallvec!["a\"b".to_string()],
            children: Vec::new(),
        });
        assert!(doc.to_svg_string().contains(r#"<g class="a&quot;b">"#));
    }
}
