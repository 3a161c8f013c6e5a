// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold specs and their resolution against chart data.
//!
//! A [`ThresholdSpec`] is what the user configured. Resolution turns it into a
//! [`ResolvedThreshold`]: either a [`ThresholdSeries`] aligned with the chart's x positions, or
//! a sorted [`ThresholdLevels`] list of horizontal levels.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use serde_json::Value as Json;

use crate::band::Band;
use crate::error::ThresholdError;
use crate::value::{ChartData, Value, normalize};

/// Name carried by synthesized threshold series.
///
/// Draw events for a series with the threshold series' name are never classified.
pub const THRESHOLD_SERIES_NAME: &str = "_threshold";

/// A user-supplied threshold.
#[derive(Clone, Debug, PartialEq)]
pub enum ThresholdSpec {
    /// One constant value across the whole chart.
    Constant(f64),
    /// The data of the first chart series with this name.
    SeriesReference(String),
    /// Explicit values: bare numbers (index-based) or `(x, y)` points.
    ExplicitSeries(Vec<Value>),
    /// Horizontal levels, in any order.
    LevelList(Vec<f64>),
}

impl Default for ThresholdSpec {
    fn default() -> Self {
        Self::Constant(0.0)
    }
}

impl From<f64> for ThresholdSpec {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<&str> for ThresholdSpec {
    fn from(name: &str) -> Self {
        Self::SeriesReference(name.to_string())
    }
}

impl ThresholdSpec {
    /// Creates an explicit series spec.
    pub fn explicit<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::ExplicitSeries(values.into_iter().map(Into::into).collect())
    }

    /// Creates a level list spec.
    pub fn levels(levels: impl IntoIterator<Item = f64>) -> Self {
        Self::LevelList(levels.into_iter().collect())
    }

    /// Parses a `threshold` option value.
    ///
    /// Accepts a number, a series name, an array of entries (numbers, `null` holes, or `{x, y}`
    /// objects), or an object with such an array under `data`.
    pub fn from_json(json: &Json) -> Result<Self, ThresholdError> {
        let invalid = || ThresholdError::invalid_spec(json.to_string());
        match json {
            Json::Number(n) => n.as_f64().map(Self::Constant).ok_or_else(invalid),
            Json::String(name) => Ok(Self::SeriesReference(name.clone())),
            Json::Array(entries) => parse_entries(entries).ok_or_else(invalid),
            Json::Object(map) => match map.get("data") {
                Some(Json::Array(entries)) => parse_entries(entries).ok_or_else(invalid),
                _ => Err(invalid()),
            },
            Json::Null | Json::Bool(_) => Err(invalid()),
        }
    }

    /// Parses a `thresholds` option value: an array of numbers.
    pub fn levels_from_json(json: &Json) -> Result<Self, ThresholdError> {
        let invalid = || ThresholdError::invalid_spec(json.to_string());
        let Json::Array(entries) = json else {
            return Err(invalid());
        };
        entries
            .iter()
            .map(Json::as_f64)
            .collect::<Option<Vec<f64>>>()
            .map(Self::LevelList)
            .ok_or_else(invalid)
    }

    /// Resolves this spec against the chart data.
    ///
    /// This is a pure function of its inputs. Fails with
    /// [`ThresholdError::InvalidThresholdSpec`] for a non-finite constant, a series reference
    /// with no matching series or one without a single present value, and an empty or
    /// non-finite level list.
    pub fn resolve(&self, data: &ChartData) -> Result<ResolvedThreshold, ThresholdError> {
        match self {
            Self::Constant(v) => {
                if !v.is_finite() {
                    return Err(ThresholdError::invalid_spec(format!("{v}")));
                }
                let values: Vec<Value> = if data.is_multi_dimensional() {
                    data.distinct_x_values()
                        .into_iter()
                        .map(|x| Value::Point { x, y: *v })
                        .collect()
                } else {
                    let n = data.longest_series_len().max(data.labels.len());
                    alloc::vec![Value::Scalar(*v); n]
                };
                Ok(ResolvedThreshold::Series(ThresholdSeries::new(
                    THRESHOLD_SERIES_NAME,
                    values,
                )))
            }
            Self::SeriesReference(name) => {
                let series = data
                    .series_named(name)
                    .filter(|s| s.data.iter().any(|v| !v.normalized().is_missing()))
                    .ok_or_else(|| ThresholdError::invalid_spec(name.clone()))?;
                Ok(ResolvedThreshold::Series(ThresholdSeries::new(
                    name.clone(),
                    normalize(&series.data),
                )))
            }
            Self::ExplicitSeries(values) => Ok(ResolvedThreshold::Series(ThresholdSeries::new(
                THRESHOLD_SERIES_NAME,
                normalize(values),
            ))),
            Self::LevelList(levels) => ThresholdLevels::new(levels).map(ResolvedThreshold::Levels),
        }
    }
}

fn parse_entries(entries: &[Json]) -> Option<ThresholdSpec> {
    entries
        .iter()
        .map(Value::from_json)
        .collect::<Option<Vec<Value>>>()
        .map(ThresholdSpec::ExplicitSeries)
}

/// A resolved threshold.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedThreshold {
    /// A per-x threshold series.
    Series(ThresholdSeries),
    /// Sorted horizontal levels.
    Levels(ThresholdLevels),
}

impl ResolvedThreshold {
    /// Number of classification bands (`2` for a series).
    pub fn band_count(&self) -> usize {
        match self {
            Self::Series(_) => 2,
            Self::Levels(levels) => levels.band_count(),
        }
    }

    /// Name of the series that must not be classified, if any.
    pub fn series_name(&self) -> Option<&str> {
        match self {
            Self::Series(series) => Some(series.name()),
            Self::Levels(_) => None,
        }
    }

    /// Returns `true` if there is no geometry to build masks from: a series with no present
    /// value.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Series(series) => series.data().iter().all(Value::is_missing),
            Self::Levels(_) => false,
        }
    }

    /// Classifies a drawn value at `index`.
    ///
    /// Holes compare as `0`.
    pub fn classify(&self, value: &Value, index: usize) -> Band {
        let y = value.y().unwrap_or(0.0);
        match self {
            Self::Series(series) => {
                if y >= series.threshold_at(value, index) {
                    Band::Above
                } else {
                    Band::Below
                }
            }
            Self::Levels(levels) => levels.classify(y),
        }
    }
}

/// A threshold series aligned with the chart's x positions.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdSeries {
    name: String,
    data: Vec<Value>,
    by_x: HashMap<u64, f64>,
}

impl ThresholdSeries {
    /// Creates a threshold series, indexing its explicit x values.
    pub fn new(name: impl Into<String>, data: Vec<Value>) -> Self {
        let mut by_x = HashMap::new();
        for v in &data {
            if let Value::Point { x, y } = *v {
                by_x.entry(x_key(x)).or_insert(y);
            }
        }
        Self {
            name: name.into(),
            data,
            by_x,
        }
    }

    /// The series name (the sentinel name for synthesized series).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized values.
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Number of values (holes included).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the series has no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the series carries explicit x values.
    pub fn is_multi_dimensional(&self) -> bool {
        !self.by_x.is_empty()
    }

    /// The threshold that applies to a drawn `value` at `index`.
    ///
    /// Multi-dimensional series match on exact x equality (a scalar drawn value uses its index
    /// as x); index-based series look up `index`. No match, and holes, yield `0`.
    pub fn threshold_at(&self, value: &Value, index: usize) -> f64 {
        if self.is_multi_dimensional() {
            let x = value.x().unwrap_or(index as f64);
            self.by_x.get(&x_key(x)).copied().unwrap_or(0.0)
        } else {
            self.data.get(index).and_then(Value::y).unwrap_or(0.0)
        }
    }
}

fn x_key(x: f64) -> u64 {
    // `0.0` and `-0.0` compare equal, so they share a key.
    if x == 0.0 { 0 } else { x.to_bits() }
}

/// Horizontal threshold levels, sorted ascending with duplicates removed.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdLevels {
    ascending: Vec<f64>,
}

impl ThresholdLevels {
    /// Validates and sorts `levels`.
    ///
    /// Duplicate levels collapse into one, so `[10, 10]` yields a single level and two bands.
    pub fn new(levels: &[f64]) -> Result<Self, ThresholdError> {
        if levels.is_empty() || levels.iter().any(|l| !l.is_finite()) {
            return Err(ThresholdError::invalid_spec(format!("{levels:?}")));
        }
        let mut ascending = levels.to_vec();
        ascending.sort_by(f64::total_cmp);
        ascending.dedup_by(|a, b| a == b);
        Ok(Self { ascending })
    }

    /// Levels, lowest first.
    pub fn ascending(&self) -> &[f64] {
        &self.ascending
    }

    /// Number of distinct levels.
    pub fn len(&self) -> usize {
        self.ascending.len()
    }

    /// `false` for any value built by [`ThresholdLevels::new`], which rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.ascending.is_empty()
    }

    /// Number of bands (`levels + 1`).
    pub fn band_count(&self) -> usize {
        self.ascending.len() + 1
    }

    /// Classifies `y`: scanning from the highest level down, the first level that `y` meets or
    /// exceeds picks the band; a value under every level is `Below`.
    pub fn classify(&self, y: f64) -> Band {
        let n = self.ascending.len();
        for (i, &level) in self.ascending.iter().enumerate().rev() {
            if y >= level {
                return if i + 1 == n {
                    Band::Above
                } else {
                    Band::Between(i)
                };
            }
        }
        Band::Below
    }

    /// The `(lower, upper)` levels bounding `band`; open ends are `None`.
    pub fn bounds(&self, band: Band) -> (Option<f64>, Option<f64>) {
        match band {
            Band::Below => (None, self.ascending.first().copied()),
            Band::Between(i) => (
                self.ascending.get(i).copied(),
                self.ascending.get(i + 1).copied(),
            ),
            Band::Above => (self.ascending.last().copied(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::value::Series;

    fn twelve_points() -> ChartData {
        ChartData::new()
            .with_labels([
                "Jan", "Feb", "Mar", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ])
            .with_series(Series::new([
                5.0, -4.0, 3.0, 7.0, 20.0, 10.0, 3.0, 4.0, 8.0, -10.0, 6.0, -8.0,
            ]))
    }

    fn series(resolved: ResolvedThreshold) -> ThresholdSeries {
        match resolved {
            ResolvedThreshold::Series(s) => s,
            ResolvedThreshold::Levels(_) => panic!("expected a series"),
        }
    }

    fn json(s: &str) -> Json {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn constant_fills_every_index() {
        for t in [-3.5, 0.0, 4.0, 1e9] {
            let s = series(ThresholdSpec::Constant(t).resolve(&twelve_points()).unwrap());
            assert_eq!(s.len(), 12);
            assert!(s.data().iter().all(|v| *v == Value::Scalar(t)));
            assert_eq!(s.name(), THRESHOLD_SERIES_NAME);
        }
    }

    #[test]
    fn constant_on_points_uses_distinct_x_values() {
        let data = ChartData::new()
            .with_series(Series::new([(1.0, 3.0), (4.0, 1.0)]))
            .with_series(Series::new([(4.0, 2.0), (2.0, 9.0)]));
        let s = series(ThresholdSpec::Constant(2.0).resolve(&data).unwrap());
        assert_eq!(
            s.data(),
            &[
                Value::Point { x: 1.0, y: 2.0 },
                Value::Point { x: 2.0, y: 2.0 },
                Value::Point { x: 4.0, y: 2.0 },
            ]
        );
    }

    #[test]
    fn constant_rejects_non_finite_values() {
        assert!(matches!(
            ThresholdSpec::Constant(f64::NAN).resolve(&twelve_points()),
            Err(ThresholdError::InvalidThresholdSpec { .. })
        ));
    }

    #[test]
    fn series_reference_copies_the_first_matching_series() {
        let data = twelve_points()
            .with_series(Series::new([1.0, f64::NAN, 3.0]).with_name("limit"))
            .with_series(Series::new([9.0]).with_name("limit"));
        let s = series(ThresholdSpec::from("limit").resolve(&data).unwrap());
        assert_eq!(s.name(), "limit");
        assert_eq!(s.data(), normalize(&data.series[1].data).as_slice());
        assert_eq!(s.data()[1], Value::Missing);
    }

    #[test]
    fn unknown_or_empty_series_reference_is_invalid() {
        let data = twelve_points()
            .with_series(Series::new(Vec::<f64>::new()).with_name("empty"))
            .with_series(Series::new([f64::NAN, f64::NAN]).with_name("holes"));
        for name in ["missing", "empty", "holes"] {
            let err = ThresholdSpec::from(name).resolve(&data).unwrap_err();
            assert_eq!(
                err,
                ThresholdError::InvalidThresholdSpec {
                    raw: name.to_string()
                }
            );
        }
    }

    #[test]
    fn json_shapes_map_to_variants() {
        assert_eq!(
            ThresholdSpec::from_json(&json("4")),
            Ok(ThresholdSpec::Constant(4.0))
        );
        assert_eq!(
            ThresholdSpec::from_json(&json(r#""limit""#)),
            Ok(ThresholdSpec::from("limit"))
        );
        assert_eq!(
            ThresholdSpec::from_json(&json(r#"[1, null, {"x": 2, "y": 3}]"#)),
            Ok(ThresholdSpec::ExplicitSeries(vec![
                Value::Scalar(1.0),
                Value::Missing,
                Value::Point { x: 2.0, y: 3.0 },
            ]))
        );
        assert_eq!(
            ThresholdSpec::from_json(&json(r#"{"name": "t", "data": [2, 2]}"#)),
            Ok(ThresholdSpec::explicit([2.0, 2.0]))
        );
    }

    #[test]
    fn invalid_json_shapes_echo_the_raw_input() {
        for raw in ["{}", "null", "true", r#"{"name": "x"}"#, r#"{"data": 3}"#, r#"["a"]"#] {
            let err = ThresholdSpec::from_json(&json(raw)).unwrap_err();
            let ThresholdError::InvalidThresholdSpec { raw: echoed } = err else {
                panic!("unexpected error for {raw}");
            };
            assert_eq!(json(&echoed), json(raw), "echo for {raw}");
        }
    }

    #[test]
    fn all_hole_series_counts_as_empty() {
        let holes = ThresholdSpec::explicit([Value::Missing, Value::Missing])
            .resolve(&twelve_points())
            .unwrap();
        assert!(holes.is_empty());
        let partial = ThresholdSpec::explicit([Value::Missing, Value::Scalar(1.0)])
            .resolve(&twelve_points())
            .unwrap();
        assert!(!partial.is_empty());
    }

    #[test]
    fn levels_are_sorted_deduplicated_and_validated() {
        let levels = ThresholdLevels::new(&[20.0, 0.0, 10.0, 10.0]).unwrap();
        assert_eq!(levels.ascending(), &[0.0, 10.0, 20.0]);
        assert_eq!(levels.band_count(), 4);
        assert_eq!(ThresholdLevels::new(&[10.0, 10.0]).unwrap().band_count(), 2);
        assert!(ThresholdLevels::new(&[]).is_err());
        assert!(ThresholdLevels::new(&[1.0, f64::INFINITY]).is_err());
        assert!(ThresholdSpec::levels_from_json(&json("[1, \"a\"]")).is_err());
        assert!(ThresholdSpec::levels_from_json(&json("5")).is_err());
    }

    #[test]
    fn level_classification_is_inclusive_upward() {
        let levels = ThresholdLevels::new(&[0.0, 10.0, 20.0]).unwrap();
        assert_eq!(levels.classify(15.0), Band::Between(1));
        assert_eq!(levels.classify(10.0), Band::Between(1));
        assert_eq!(levels.classify(20.0), Band::Above);
        assert_eq!(levels.classify(0.0), Band::Between(0));
        assert_eq!(levels.classify(-10.0), Band::Below);
        assert_eq!(levels.bounds(Band::Between(1)), (Some(10.0), Some(20.0)));
    }

    #[test]
    fn single_level_matches_a_constant_threshold() {
        let data = twelve_points();
        let constant = ThresholdSpec::Constant(10.0).resolve(&data).unwrap();
        let level = ThresholdSpec::levels([10.0]).resolve(&data).unwrap();
        for (i, v) in data.series[0].data.iter().enumerate() {
            assert_eq!(constant.classify(v, i), level.classify(v, i), "index {i}");
        }
        assert_eq!(constant.band_count(), level.band_count());
    }

    #[test]
    fn multi_dimensional_lookup_falls_back_to_zero_without_an_exact_x() {
        let s = ThresholdSeries::new("t", vec![Value::point(1.0, 5.0), Value::point(2.0, 7.0)]);
        assert_eq!(s.threshold_at(&Value::point(2.0, 0.0), 0), 7.0);
        assert_eq!(s.threshold_at(&Value::point(1.5, 0.0), 0), 0.0);
        let indexed = ThresholdSeries::new("t", vec![Value::Scalar(3.0), Value::Missing]);
        assert_eq!(indexed.threshold_at(&Value::Scalar(1.0), 1), 0.0);
        assert_eq!(indexed.threshold_at(&Value::Scalar(1.0), 7), 0.0);
        assert_eq!(indexed.threshold_at(&Value::Scalar(1.0), 0), 3.0);
    }
}
