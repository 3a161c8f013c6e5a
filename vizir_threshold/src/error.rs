// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while configuring or attaching the threshold plugin.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

/// Errors returned by threshold resolution and options parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThresholdError {
    /// The threshold is not a number, a known series name, a value list, or an object with
    /// `data`; or a level list is empty or holds a non-finite level.
    ///
    /// `raw` echoes the offending input.
    #[error("invalid `threshold` value: {raw}")]
    InvalidThresholdSpec {
        /// The offending input, as written.
        raw: String,
    },

    /// The options document is malformed outside of the threshold fields.
    #[error("invalid threshold options: {0}")]
    InvalidOptions(String),
}

impl ThresholdError {
    pub(crate) fn invalid_spec(raw: impl Into<String>) -> Self {
        Self::InvalidThresholdSpec { raw: raw.into() }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;

    #[test]
    fn message_echoes_the_raw_input() {
        let err = ThresholdError::invalid_spec("{}");
        assert_eq!(err.to_string(), "invalid `threshold` value: {}");
    }
}
