// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification bands.

use core::cmp::Ordering;

/// A contiguous classification region bounded by zero, one, or two threshold levels.
///
/// Levels are indexed in ascending order. `Between(i)` lies between level `i` and level
/// `i + 1`, `Below` lies under level `0`, and `Above` lies at or over the highest level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    /// Under the lowest level.
    Below,
    /// Between ascending level `i` and level `i + 1`.
    Between(usize),
    /// At or over the highest level.
    Above,
}

impl Band {
    /// Position in the bottom-to-top band order (`Below` is `0`).
    pub fn rank(self) -> usize {
        match self {
            Self::Below => 0,
            Self::Between(i) => i + 1,
            Self::Above => usize::MAX,
        }
    }

    /// Every band for `level_count` levels, bottom to top.
    ///
    /// Yields `level_count + 1` bands (`Below` and `Above` only for a single level).
    pub fn all(level_count: usize) -> impl DoubleEndedIterator<Item = Self> {
        let between = level_count.saturating_sub(1);
        core::iter::once(Self::Below)
            .chain((0..between).map(Self::Between))
            .chain(core::iter::once(Self::Above))
    }
}

impl PartialOrd for Band {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Band {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn bands_are_ordered_bottom_to_top() {
        let bands: Vec<Band> = Band::all(3).collect();
        assert_eq!(
            bands,
            [Band::Below, Band::Between(0), Band::Between(1), Band::Above]
        );
        assert!(bands.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_level_has_two_bands() {
        assert_eq!(Band::all(1).count(), 2);
    }
}
