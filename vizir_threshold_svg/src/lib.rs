// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An SVG line/bar chart host for `vizir_threshold` plugins.
//!
//! [`Chart::render`] runs one render pass: plugins contribute mask definitions, then every drawn
//! primitive is reported to them and their effects are materialized into an [`SvgDocument`].

#![no_std]

extern crate alloc;

mod chart;
mod document;

pub use chart::{BarOptions, Chart, ChartKind, LineOptions};
pub use document::{StrokeStyle, SvgDocument, SvgElement, SvgGroup, SvgShape};
