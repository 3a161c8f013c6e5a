// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold banding for line and bar charts.
//!
//! Given a threshold (a constant, a named series, explicit values, or a list of levels), this
//! crate splits a rendered chart into bands above, below, and between the threshold levels:
//! - **Resolution** turns a [`ThresholdSpec`] into a [`ResolvedThreshold`] aligned with the
//!   chart's data.
//! - **Mask geometry** projects the resolved threshold through the chart's own scales and
//!   produces one [`MaskRegion`] per band.
//! - **Classification** decides, per drawn primitive, which class to add (points) or which
//!   masked copies to layer (lines, areas, bars).
//!
//! The host chart drives all of this through the [`ChartPlugin`] hooks and materializes the
//! returned [`MaskRegion`]s and [`DrawEffect`]s into its own rendering tree.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod band;
mod classify;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod geometry;
mod interpolation;
mod mask;
mod options;
mod plugin;
mod scale;
mod threshold;
mod value;

pub use band::Band;
pub use classify::{DrawEffect, DrawEvent, Overlay, PrimitiveKind, classify};
pub use error::ThresholdError;
pub use geometry::{AxisX, ChartGeometry, Size};
pub use interpolation::Interpolation;
pub use mask::{MaskRegion, MaskShape, build_masks};
pub use options::{ClassNames, DEFAULT_MASK_PADDING, MaskNames, ThresholdOptions};
pub use plugin::{ChartPlugin, ThresholdPlugin, threshold_plugin};
pub use scale::{ScaleBand, ScaleLinear, ScalePoint};
pub use threshold::{
    ResolvedThreshold, THRESHOLD_SERIES_NAME, ThresholdLevels, ThresholdSeries, ThresholdSpec,
};
pub use value::{ChartData, Series, Value, normalize};
