// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series values as the host chart stores them.
//!
//! A chart series is an ordered list of values. Each value is either a bare number (its x is
//! implied by its index), an explicit `(x, y)` point (multi-dimensional data), or a hole.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde_json::Value as Json;

/// A single series value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Value {
    /// A bare number plotted at its index.
    Scalar(f64),
    /// An explicit point.
    Point {
        /// Data-space x.
        x: f64,
        /// Data-space y.
        y: f64,
    },
    /// A hole in the series.
    #[default]
    Missing,
}

impl Value {
    /// Creates a scalar value; non-finite numbers become [`Value::Missing`].
    pub fn scalar(y: f64) -> Self {
        Self::Scalar(y).normalized()
    }

    /// Creates a point value; a non-finite coordinate makes it [`Value::Missing`].
    pub fn point(x: f64, y: f64) -> Self {
        Self::Point { x, y }.normalized()
    }

    /// Returns this value with non-finite numbers mapped to [`Value::Missing`].
    pub fn normalized(self) -> Self {
        match self {
            Self::Scalar(y) if !y.is_finite() => Self::Missing,
            Self::Point { x, y } if !x.is_finite() || !y.is_finite() => Self::Missing,
            v => v,
        }
    }

    /// Returns the y value, if present.
    pub fn y(&self) -> Option<f64> {
        match *self {
            Self::Scalar(y) | Self::Point { y, .. } => Some(y),
            Self::Missing => None,
        }
    }

    /// Returns the explicit x value, if this is a point.
    pub fn x(&self) -> Option<f64> {
        match *self {
            Self::Point { x, .. } => Some(x),
            _ => None,
        }
    }

    /// Returns `true` for holes.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Parses a JSON series entry.
    ///
    /// Accepts a number, `null` (a hole), or an object with a numeric `y` and optional `x`.
    /// Returns `None` for any other shape.
    pub fn from_json(json: &Json) -> Option<Self> {
        match json {
            Json::Null => Some(Self::Missing),
            Json::Number(n) => n.as_f64().map(Self::scalar),
            Json::Object(map) => {
                let y = match map.get("y") {
                    None | Some(Json::Null) => return Some(Self::Missing),
                    Some(y) => y.as_f64()?,
                };
                match map.get("x") {
                    None => Some(Self::scalar(y)),
                    Some(x) => Some(Self::point(x.as_f64()?, y)),
                }
            }
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::scalar(value)
    }
}

impl From<(f64, f64)> for Value {
    fn from((x, y): (f64, f64)) -> Self {
        Self::point(x, y)
    }
}

impl From<Option<f64>> for Value {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::scalar)
    }
}

/// Applies hole normalization to a list of values.
///
/// Holes stay in place so indices keep lining up with the chart labels; interpolation bridges
/// them instead of breaking the path.
pub fn normalize(values: &[Value]) -> Vec<Value> {
    values.iter().map(|v| v.normalized()).collect()
}

/// A named, ordered list of values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    /// Optional series name, used by series-reference thresholds.
    pub name: Option<String>,
    /// Values in plotting order.
    pub data: Vec<Value>,
}

impl Series {
    /// Creates an unnamed series.
    pub fn new<V: Into<Value>>(data: impl IntoIterator<Item = V>) -> Self {
        Self {
            name: None,
            data: data.into_iter().map(Into::into).collect(),
        }
    }

    /// Sets the series name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the series name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of values (holes included).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the series has no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The data a chart plots.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartData {
    /// Category labels along x (index-based charts).
    pub labels: Vec<String>,
    /// Series in drawing order.
    pub series: Vec<Series>,
}

impl ChartData {
    /// Creates empty chart data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the labels.
    pub fn with_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a series.
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Returns `true` if any series carries explicit `(x, y)` points.
    pub fn is_multi_dimensional(&self) -> bool {
        self.series
            .iter()
            .flat_map(|s| s.data.iter())
            .any(|v| matches!(v, Value::Point { .. }))
    }

    /// Length of the longest series.
    pub fn longest_series_len(&self) -> usize {
        self.series.iter().map(Series::len).max().unwrap_or(0)
    }

    /// Returns every distinct x value across all series, ascending.
    pub fn distinct_x_values(&self) -> Vec<f64> {
        let mut xs: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| s.data.iter())
            .filter_map(Value::x)
            .collect();
        xs.sort_by(f64::total_cmp);
        // `-0.0 == 0.0`, so dedup on value equality rather than bit patterns.
        xs.dedup_by(|a, b| a == b);
        xs
    }

    /// Returns the first series with the given name.
    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name() == Some(name))
    }

    /// Inclusive `(min, max)` over every present y value, or `None` if there are none.
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        extent(self.series.iter().flat_map(|s| s.data.iter()).filter_map(Value::y))
    }

    /// Inclusive `(min, max)` over every explicit x value, or `None` if there are none.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        extent(self.series.iter().flat_map(|s| s.data.iter()).filter_map(Value::x))
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn non_finite_values_become_holes() {
        assert_eq!(Value::scalar(f64::NAN), Value::Missing);
        assert_eq!(Value::point(1.0, f64::INFINITY), Value::Missing);
        assert_eq!(
            normalize(&[Value::Scalar(1.0), Value::Scalar(f64::NAN)]),
            vec![Value::Scalar(1.0), Value::Missing]
        );
    }

    #[test]
    fn json_entries_parse_by_shape() {
        let parse = |s: &str| Value::from_json(&serde_json::from_str(s).unwrap());
        assert_eq!(parse("3.5"), Some(Value::Scalar(3.5)));
        assert_eq!(parse("null"), Some(Value::Missing));
        assert_eq!(parse(r#"{"x": 1, "y": 2}"#), Some(Value::Point { x: 1.0, y: 2.0 }));
        assert_eq!(parse(r#"{"y": 2}"#), Some(Value::Scalar(2.0)));
        assert_eq!(parse(r#""seven""#), None);
        assert_eq!(parse(r#"{"x": "a", "y": 2}"#), None);
    }

    #[test]
    fn distinct_x_values_are_sorted_and_deduplicated() {
        let data = ChartData::new()
            .with_series(Series::new([(3.0, 1.0), (1.0, 2.0)]))
            .with_series(Series::new([(1.0, 5.0), (2.0, 6.0), (-0.0, 1.0), (0.0, 2.0)]));
        assert_eq!(data.distinct_x_values(), vec![-0.0, 1.0, 2.0, 3.0]);
        assert!(data.is_multi_dimensional());
    }

    #[test]
    fn series_lookup_returns_first_match() {
        let data = ChartData::new()
            .with_series(Series::new([1.0]).with_name("a"))
            .with_series(Series::new([2.0]).with_name("a"));
        assert_eq!(data.series_named("a").unwrap().data, vec![Value::Scalar(1.0)]);
        assert!(data.series_named("b").is_none());
    }
}
