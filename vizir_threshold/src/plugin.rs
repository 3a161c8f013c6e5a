// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart plugin contract and the threshold plugin.
//!
//! A host chart drives plugins through two synchronous hooks per render pass:
//! - `created`, once per pass, returning mask definitions for the chart's `<defs>`, and
//! - `draw`, once per rendered primitive, returning a declarative [`DrawEffect`].
//!
//! Hooks are pure with respect to the plugin: they read the state captured at attachment and
//! never mutate it, so every pass is independent.

extern crate alloc;

use alloc::vec::Vec;

use crate::classify::{DrawEffect, DrawEvent, classify};
use crate::error::ThresholdError;
use crate::geometry::ChartGeometry;
use crate::mask::{MaskRegion, build_masks};
use crate::options::ThresholdOptions;
use crate::threshold::ResolvedThreshold;
use crate::value::ChartData;

/// Lifecycle hooks a host chart calls during a render pass.
pub trait ChartPlugin {
    /// Called once per render pass, before any primitive is drawn.
    fn on_created(&self, geometry: &ChartGeometry) -> Vec<MaskRegion>;

    /// Called once per rendered primitive.
    fn on_draw(&self, event: &DrawEvent<'_>) -> DrawEffect;
}

/// A threshold plugin attached to one chart.
///
/// The threshold is resolved once, at attachment. Re-renders reuse that resolution; changes to
/// the chart data afterwards are not reflected until the plugin is attached again.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdPlugin {
    options: ThresholdOptions,
    resolved: ResolvedThreshold,
}

impl ThresholdPlugin {
    /// Resolves `options.threshold` against `data`.
    pub fn attach(options: ThresholdOptions, data: &ChartData) -> Result<Self, ThresholdError> {
        let resolved = options.threshold.resolve(data)?;
        Ok(Self { options, resolved })
    }

    /// The options this plugin was built with.
    pub fn options(&self) -> &ThresholdOptions {
        &self.options
    }

    /// The threshold resolved at attachment.
    pub fn resolved(&self) -> &ResolvedThreshold {
        &self.resolved
    }
}

impl ChartPlugin for ThresholdPlugin {
    fn on_created(&self, geometry: &ChartGeometry) -> Vec<MaskRegion> {
        build_masks(&self.resolved, geometry, &self.options)
    }

    fn on_draw(&self, event: &DrawEvent<'_>) -> DrawEffect {
        classify(event, &self.resolved, &self.options)
    }
}

/// Creates a threshold plugin factory.
///
/// The returned function attaches the plugin to a chart's data; it fails with
/// [`ThresholdError::InvalidThresholdSpec`] when the threshold cannot be resolved against that
/// data.
pub fn threshold_plugin(
    options: ThresholdOptions,
) -> impl Fn(&ChartData) -> Result<ThresholdPlugin, ThresholdError> {
    move |data| ThresholdPlugin::attach(options.clone(), data)
}
