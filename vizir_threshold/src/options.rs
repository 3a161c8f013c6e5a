// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plugin options.
//!
//! Options are supplied once when the plugin is constructed and never change afterwards.
//! Every field has a documented default; a JSON options object only needs to name the fields
//! it overrides.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use serde::Deserialize;
use serde_json::Value as Json;

use crate::band::Band;
use crate::error::ThresholdError;
use crate::interpolation::Interpolation;
use crate::threshold::ThresholdSpec;

/// Default padding, in pixels, added above and below level masks.
pub const DEFAULT_MASK_PADDING: f64 = 10.0;

/// CSS class names applied to classified primitives.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassNames {
    /// Class for values at or over the (highest) threshold.
    pub above_threshold: String,
    /// Class for values under the (lowest) threshold.
    pub below_threshold: String,
    /// Prefix for `between` bands; band `i` gets `"{prefix_threshold}-{i}"`.
    pub prefix_threshold: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            above_threshold: "ct-threshold-above".into(),
            below_threshold: "ct-threshold-below".into(),
            prefix_threshold: "ct-threshold-between".into(),
        }
    }
}

/// Ids of the generated `<mask>` elements.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaskNames {
    /// Mask revealing the region over the (highest) threshold.
    pub above_threshold: String,
    /// Mask revealing the region under the (lowest) threshold.
    pub below_threshold: String,
    /// Prefix for `between` masks; band `i` gets `"{prefix_threshold}-{i}"`.
    pub prefix_threshold: String,
}

impl Default for MaskNames {
    fn default() -> Self {
        Self {
            above_threshold: "ct-threshold-mask-above".into(),
            below_threshold: "ct-threshold-mask-below".into(),
            prefix_threshold: "ct-threshold-mask-between".into(),
        }
    }
}

/// The recognized plugin options.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThresholdOptions {
    /// The threshold (`threshold` or `thresholds` in JSON).
    ///
    /// A `thresholds` list is sorted and deduplicated on resolution; the band count is the
    /// number of distinct levels plus one.
    #[serde(skip)]
    pub threshold: ThresholdSpec,
    /// Class names for classified primitives.
    pub class_names: ClassNames,
    /// Mask ids.
    pub mask_names: MaskNames,
    /// Pixels added above the top mask and below the bottom mask of a level list.
    pub mask_padding: f64,
    /// Optional namespace; when set, every generated class and id becomes `"{prefix}-{name}"`.
    pub prefix: Option<String>,
    /// Interpolation used for the threshold series' mask edge.
    pub line_smooth: Interpolation,
}

impl Default for ThresholdOptions {
    fn default() -> Self {
        Self {
            threshold: ThresholdSpec::default(),
            class_names: ClassNames::default(),
            mask_names: MaskNames::default(),
            mask_padding: DEFAULT_MASK_PADDING,
            prefix: None,
            line_smooth: Interpolation::None,
        }
    }
}

impl ThresholdOptions {
    /// Creates options for `threshold` with every other field at its default.
    pub fn new(threshold: impl Into<ThresholdSpec>) -> Self {
        Self {
            threshold: threshold.into(),
            ..Self::default()
        }
    }

    /// Parses an options object.
    ///
    /// `thresholds` (a level list) takes precedence over `threshold`. A malformed threshold
    /// fails with [`ThresholdError::InvalidThresholdSpec`]; any other malformed field fails with
    /// [`ThresholdError::InvalidOptions`]. Unknown fields are ignored.
    pub fn from_json(text: &str) -> Result<Self, ThresholdError> {
        let json: Json = serde_json::from_str(text)
            .map_err(|e| ThresholdError::InvalidOptions(e.to_string()))?;
        Self::from_json_value(json)
    }

    /// Like [`ThresholdOptions::from_json`], for an already parsed document.
    pub fn from_json_value(json: Json) -> Result<Self, ThresholdError> {
        let Json::Object(mut map) = json else {
            return Err(ThresholdError::InvalidOptions(format!(
                "expected an object, got {json}"
            )));
        };
        let threshold = map.remove("threshold");
        let thresholds = map.remove("thresholds");
        let mut options: Self = serde_json::from_value(Json::Object(map))
            .map_err(|e| ThresholdError::InvalidOptions(e.to_string()))?;
        options.threshold = match (thresholds, threshold) {
            (Some(levels), _) => ThresholdSpec::levels_from_json(&levels)?,
            (None, Some(threshold)) => ThresholdSpec::from_json(&threshold)?,
            (None, None) => ThresholdSpec::default(),
        };
        options.mask_padding = clamp_padding(options.mask_padding);
        Ok(options)
    }

    /// Sets the threshold.
    pub fn with_threshold(mut self, threshold: impl Into<ThresholdSpec>) -> Self {
        self.threshold = threshold.into();
        self
    }

    /// Sets a level list threshold.
    ///
    /// Levels may come in any order. Repeated levels collapse into one, so the chart gets one
    /// band per distinct level plus one.
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = f64>) -> Self {
        self.threshold = ThresholdSpec::levels(levels);
        self
    }

    /// Sets the class names.
    pub fn with_class_names(mut self, class_names: ClassNames) -> Self {
        self.class_names = class_names;
        self
    }

    /// Sets the mask ids.
    pub fn with_mask_names(mut self, mask_names: MaskNames) -> Self {
        self.mask_names = mask_names;
        self
    }

    /// Sets the mask padding (negative values clamp to `0`).
    pub fn with_mask_padding(mut self, padding: f64) -> Self {
        self.mask_padding = clamp_padding(padding);
        self
    }

    /// Sets the class/id namespace.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the interpolation of the threshold mask edge.
    pub fn with_line_smooth(mut self, line_smooth: Interpolation) -> Self {
        self.line_smooth = line_smooth;
        self
    }

    /// The class applied to primitives in `band`.
    pub fn class_name(&self, band: Band) -> String {
        let names = &self.class_names;
        self.namespaced(band_name(
            band,
            &names.above_threshold,
            &names.below_threshold,
            &names.prefix_threshold,
        ))
    }

    /// The id of the mask revealing `band`.
    pub fn mask_id(&self, band: Band) -> String {
        let names = &self.mask_names;
        self.namespaced(band_name(
            band,
            &names.above_threshold,
            &names.below_threshold,
            &names.prefix_threshold,
        ))
    }

    fn namespaced(&self, name: String) -> String {
        match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}-{name}"),
            _ => name,
        }
    }
}

fn band_name(band: Band, above: &str, below: &str, between: &str) -> String {
    match band {
        Band::Above => above.to_string(),
        Band::Below => below.to_string(),
        Band::Between(i) => format!("{between}-{i}"),
    }
}

pub(crate) fn clamp_padding(padding: f64) -> f64 {
    if padding.is_finite() { padding.max(0.0) } else { 0.0 }
}
