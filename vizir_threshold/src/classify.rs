// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-primitive classification during the draw phase.
//!
//! Points are classified by value. Lines, areas, and bars are classified visually: the original
//! element keeps the lowest band and one masked copy is requested per higher band, so the
//! overlapping copies reconstruct a single multi-colored shape.

extern crate alloc;

use alloc::string::String;

use smallvec::SmallVec;

use crate::band::Band;
use crate::options::ThresholdOptions;
use crate::threshold::ResolvedThreshold;
use crate::value::Value;

/// The kind of a rendered primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// A single data point.
    Point,
    /// A series line.
    Line,
    /// A filled series area.
    Area,
    /// A single bar.
    Bar,
}

/// One rendered primitive, as reported by the host during the draw phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawEvent<'a> {
    /// What was drawn.
    pub kind: PrimitiveKind,
    /// Index of the owning series in the chart data.
    pub series_index: usize,
    /// Name of the owning series.
    pub series_name: Option<&'a str>,
    /// Value index within the series (`0` for whole-series primitives).
    pub index: usize,
    /// The drawn value ([`Value::Missing`] for whole-series primitives).
    pub value: Value,
}

/// A masked, classed variant of a rendered shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    /// The band this variant shows.
    pub band: Band,
    /// Id of the mask to reference.
    pub mask_id: String,
    /// Class to add.
    pub class_name: String,
}

/// What the rendering binding should do with a drawn primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawEffect {
    /// Leave the primitive untouched.
    Skip,
    /// Add a class to the primitive.
    Classify {
        /// The band the value fell in.
        band: Band,
        /// Class to add.
        class_name: String,
    },
    /// Mask the primitive and insert masked copies after it.
    Overlay {
        /// Applied to the original element (the lowest band).
        base: Overlay,
        /// One copy per higher band, bottom to top.
        clones: SmallVec<[Overlay; 2]>,
    },
}

/// Classifies one drawn primitive.
///
/// Primitives of the threshold series itself are skipped. Whole-shape primitives are skipped
/// when there is no mask geometry to reference.
pub fn classify(
    event: &DrawEvent<'_>,
    threshold: &ResolvedThreshold,
    options: &ThresholdOptions,
) -> DrawEffect {
    if event.series_name.is_some() && event.series_name == threshold.series_name() {
        return DrawEffect::Skip;
    }

    match event.kind {
        PrimitiveKind::Point => {
            let band = threshold.classify(&event.value, event.index);
            DrawEffect::Classify {
                band,
                class_name: options.class_name(band),
            }
        }
        PrimitiveKind::Line | PrimitiveKind::Area | PrimitiveKind::Bar => {
            if threshold.is_empty() {
                return DrawEffect::Skip;
            }
            let overlay = |band| Overlay {
                band,
                mask_id: options.mask_id(band),
                class_name: options.class_name(band),
            };
            let mut bands = Band::all(threshold.band_count() - 1);
            let base = bands.next().map_or_else(|| overlay(Band::Below), overlay);
            DrawEffect::Overlay {
                base,
                clones: bands.map(overlay).collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use super::*;
    use crate::threshold::{THRESHOLD_SERIES_NAME, ThresholdSpec};
    use crate::value::{ChartData, Series};

    const VALUES: [f64; 12] = [5.0, -4.0, 3.0, 7.0, 20.0, 10.0, 3.0, 4.0, 8.0, -10.0, 6.0, -8.0];

    fn data() -> ChartData {
        ChartData::new().with_series(Series::new(VALUES))
    }

    fn point(index: usize, y: f64) -> DrawEvent<'static> {
        DrawEvent {
            kind: PrimitiveKind::Point,
            series_index: 0,
            series_name: None,
            index,
            value: Value::Scalar(y),
        }
    }

    fn shape(kind: PrimitiveKind) -> DrawEvent<'static> {
        DrawEvent {
            kind,
            series_index: 0,
            series_name: None,
            index: 0,
            value: Value::Missing,
        }
    }

    #[test]
    fn points_split_at_the_threshold_inclusive_above() {
        let options = ThresholdOptions::new(4.0);
        let resolved = options.threshold.resolve(&data()).unwrap();
        let above: Vec<usize> = VALUES
            .iter()
            .enumerate()
            .filter(|&(i, &y)| {
                classify(&point(i, y), &resolved, &options)
                    == DrawEffect::Classify {
                        band: Band::Above,
                        class_name: "ct-threshold-above".into(),
                    }
            })
            .map(|(i, _)| i)
            .collect();
        assert_eq!(above, [0, 3, 4, 5, 7, 8, 10]);
        assert_eq!(
            classify(&point(1, -4.0), &resolved, &options),
            DrawEffect::Classify {
                band: Band::Below,
                class_name: "ct-threshold-below".into(),
            }
        );
    }

    #[test]
    fn lines_get_a_below_base_and_an_above_clone() {
        let options = ThresholdOptions::new(4.0);
        let resolved = options.threshold.resolve(&data()).unwrap();
        for kind in [PrimitiveKind::Line, PrimitiveKind::Area, PrimitiveKind::Bar] {
            let DrawEffect::Overlay { base, clones } = classify(&shape(kind), &resolved, &options)
            else {
                panic!("expected an overlay for {kind:?}");
            };
            assert_eq!(base.mask_id, "ct-threshold-mask-below");
            assert_eq!(base.class_name, "ct-threshold-below");
            assert_eq!(clones.len(), 1);
            assert_eq!(clones[0].mask_id, "ct-threshold-mask-above");
            assert_eq!(clones[0].class_name, "ct-threshold-above");
        }
    }

    #[test]
    fn levels_overlay_one_clone_per_higher_band() {
        let options = ThresholdOptions::default().with_levels([0.0, 10.0, 20.0]);
        let resolved = options.threshold.resolve(&data()).unwrap();
        let DrawEffect::Overlay { base, clones } =
            classify(&shape(PrimitiveKind::Area), &resolved, &options)
        else {
            panic!("expected an overlay");
        };
        assert_eq!(base.band, Band::Below);
        let bands: Vec<Band> = clones.iter().map(|o| o.band).collect();
        assert_eq!(bands, [Band::Between(0), Band::Between(1), Band::Above]);
        assert_eq!(
            classify(&point(0, 15.0), &resolved, &options),
            DrawEffect::Classify {
                band: Band::Between(1),
                class_name: "ct-threshold-between-1".into(),
            }
        );
    }

    #[test]
    fn threshold_series_is_never_classified() {
        let data = data().with_series(Series::new([1.0, 2.0]).with_name("limit"));
        let options = ThresholdOptions::new("limit");
        let resolved = options.threshold.resolve(&data).unwrap();
        let mut event = point(0, 5.0);
        event.series_name = Some("limit");
        assert_eq!(classify(&event, &resolved, &options), DrawEffect::Skip);

        let constant = ThresholdSpec::Constant(1.0).resolve(&data).unwrap();
        event.series_name = Some(THRESHOLD_SERIES_NAME);
        assert_eq!(classify(&event, &constant, &options), DrawEffect::Skip);
    }

    #[test]
    fn empty_threshold_classifies_points_against_zero_and_leaves_shapes_alone() {
        let options = ThresholdOptions::new(ThresholdSpec::explicit(Vec::<f64>::new()));
        let resolved = options.threshold.resolve(&data()).unwrap();
        assert_eq!(
            classify(&shape(PrimitiveKind::Line), &resolved, &options),
            DrawEffect::Skip
        );
        let DrawEffect::Classify { band, .. } = classify(&point(3, 0.0), &resolved, &options)
        else {
            panic!("expected a class");
        };
        assert_eq!(band, Band::Above);
        let DrawEffect::Classify { band, .. } = classify(&point(3, -0.5), &resolved, &options)
        else {
            panic!("expected a class");
        };
        assert_eq!(band, Band::Below);
    }

    #[test]
    fn all_hole_threshold_leaves_shapes_alone() {
        let options = ThresholdOptions::new(ThresholdSpec::explicit([f64::NAN, f64::NAN]));
        let resolved = options.threshold.resolve(&data()).unwrap();
        for kind in [PrimitiveKind::Line, PrimitiveKind::Area, PrimitiveKind::Bar] {
            assert_eq!(classify(&shape(kind), &resolved, &options), DrawEffect::Skip);
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let options = ThresholdOptions::new(4.0);
        let resolved = options.threshold.resolve(&data()).unwrap();
        for (i, &y) in VALUES.iter().enumerate() {
            assert_eq!(
                classify(&point(i, y), &resolved, &options),
                classify(&point(i, y), &resolved, &options)
            );
        }
    }
}
