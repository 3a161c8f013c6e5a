// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `libm` fallbacks for the `f64` methods `core` lacks.
//!
//! Only compiled without `std`; with `std` the inherent methods resolve instead.

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("vizir_threshold needs either the `std` or the `libm` feature");

/// Rounding and power helpers used by scale nicing.
pub(crate) trait FloatExt {
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn log10(self) -> Self;
    fn powf(self, exp: Self) -> Self;
}

#[cfg(feature = "libm")]
impl FloatExt for f64 {
    #[inline]
    fn floor(self) -> Self {
        libm::floor(self)
    }

    #[inline]
    fn ceil(self) -> Self {
        libm::ceil(self)
    }

    #[inline]
    fn log10(self) -> Self {
        libm::log10(self)
    }

    #[inline]
    fn powf(self, exp: Self) -> Self {
        libm::pow(self, exp)
    }
}
