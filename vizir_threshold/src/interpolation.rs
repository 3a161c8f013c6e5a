// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path interpolation through projected points.
//!
//! Every strategy bridges holes: missing points are skipped and the neighbours on either side
//! are joined, so a path over a series with at least one present point is always a single
//! subpath that starts with a `MoveTo`.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point};
use serde::Deserialize;
use serde_json::Value as Json;

/// How consecutive points are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "Json")]
pub enum Interpolation {
    /// Straight line segments.
    #[default]
    None,
    /// Cubic segments with horizontal handles `dx / divisor` long.
    Simple {
        /// Handle length divisor (values below `1` are treated as `1`).
        divisor: f64,
    },
    /// Step segments.
    Step {
        /// Move horizontally first, then vertically.
        postpone: bool,
    },
    /// Cardinal (Catmull-Rom style) spline through every point.
    Cardinal {
        /// Curve tension in `[0, 1]`; `0` degenerates to straight segments.
        tension: f64,
    },
}

impl Interpolation {
    /// `Simple` with the default divisor of `2`.
    pub fn simple() -> Self {
        Self::Simple { divisor: 2.0 }
    }

    /// `Step` with the default `postpone = true`.
    pub fn step() -> Self {
        Self::Step { postpone: true }
    }

    /// `Cardinal` with the default tension of `1`.
    pub fn cardinal() -> Self {
        Self::Cardinal { tension: 1.0 }
    }

    /// Builds a path through `points`, bridging `None` entries.
    ///
    /// Returns an empty path when no point is present.
    pub fn path(&self, points: &[Option<Point>]) -> BezPath {
        let pts: Vec<Point> = points.iter().flatten().copied().collect();
        let mut p = BezPath::new();
        let Some(&first) = pts.first() else {
            return p;
        };
        p.move_to(first);
        match *self {
            Self::None => {
                for &pt in &pts[1..] {
                    p.line_to(pt);
                }
            }
            Self::Simple { divisor } => {
                let d = divisor.max(1.0);
                for w in pts.windows(2) {
                    let (prev, curr) = (w[0], w[1]);
                    let len = (curr.x - prev.x) / d;
                    p.curve_to(
                        Point::new(prev.x + len, prev.y),
                        Point::new(curr.x - len, curr.y),
                        curr,
                    );
                }
            }
            Self::Step { postpone } => {
                for w in pts.windows(2) {
                    let (prev, curr) = (w[0], w[1]);
                    if postpone {
                        p.line_to((curr.x, prev.y));
                    } else {
                        p.line_to((prev.x, curr.y));
                    }
                    p.line_to(curr);
                }
            }
            Self::Cardinal { tension } => cardinal(&mut p, &pts, tension),
        }
        p
    }
}

fn cardinal(p: &mut BezPath, pts: &[Point], tension: f64) {
    let t = tension.clamp(0.0, 1.0);
    let c = 1.0 - t;
    let n = pts.len();
    if n < 3 {
        for &pt in &pts[1..] {
            p.line_to(pt);
        }
        return;
    }
    for i in 0..n - 1 {
        let p0 = pts[i.saturating_sub(1)];
        let p1 = pts[i];
        let p2 = pts[i + 1];
        let p3 = pts[(i + 2).min(n - 1)];
        p.curve_to(
            Point::new(
                t * (-p0.x + 6.0 * p1.x + p2.x) / 6.0 + c * p2.x,
                t * (-p0.y + 6.0 * p1.y + p2.y) / 6.0 + c * p2.y,
            ),
            Point::new(
                t * (p1.x + 6.0 * p2.x - p3.x) / 6.0 + c * p2.x,
                t * (p1.y + 6.0 * p2.y - p3.y) / 6.0 + c * p2.y,
            ),
            p2,
        );
    }
}

impl TryFrom<Json> for Interpolation {
    type Error = String;

    /// Accepts `"none" | "simple" | "step" | "cardinal"`, or an object with a `type` field plus
    /// that strategy's parameters.
    fn try_from(json: Json) -> Result<Self, Self::Error> {
        let (kind, params) = match &json {
            Json::String(s) => (s.as_str(), None),
            Json::Object(map) => match map.get("type") {
                Some(Json::String(s)) => (s.as_str(), Some(map)),
                _ => return Err(format!("interpolation object needs a `type`: {json}")),
            },
            _ => return Err(format!("invalid interpolation: {json}")),
        };
        let num = |key: &str, default: f64| -> Result<f64, String> {
            match params.and_then(|m| m.get(key)) {
                None => Ok(default),
                Some(v) => v
                    .as_f64()
                    .ok_or_else(|| format!("`{key}` must be a number: {v}")),
            }
        };
        match kind {
            "none" => Ok(Self::None),
            "simple" => Ok(Self::Simple {
                divisor: num("divisor", 2.0)?,
            }),
            "step" => {
                let postpone = match params.and_then(|m| m.get("postpone")) {
                    None => true,
                    Some(v) => v
                        .as_bool()
                        .ok_or_else(|| format!("`postpone` must be a boolean: {v}"))?,
                };
                Ok(Self::Step { postpone })
            }
            "cardinal" => Ok(Self::Cardinal {
                tension: num("tension", 1.0)?,
            }),
            other => Err(format!("unknown interpolation `{other}`")),
        }
    }
}

impl core::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Simple { .. } => "simple",
            Self::Step { .. } => "step",
            Self::Cardinal { .. } => "cardinal",
        };
        f.write_str(name)
    }
}
