// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration.
//!
//! All tolerances and calibration constants live here. Values come from
//! [`Default`], a JSON document, or `STAIRSCAN_*` environment variables.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inclusive acceptance band for long-side / short-side ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatioBand {
    pub min: f64,
    pub max: f64,
}

impl AspectRatioBand {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, ratio: f64) -> bool {
        ratio >= self.min && ratio <= self.max
    }
}

impl Default for AspectRatioBand {
    fn default() -> Self {
        Self { min: 3.5, max: 4.0 }
    }
}

/// Configuration for the tread classification pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Absolute z tolerance for the horizontal-plane filter.
    /// Default: 1e-3. Near-exact CAD exports work with 1e-5..1e-4.
    pub horizontal_tolerance: f64,

    /// Per-axis tolerance when matching a segment end to the next start.
    /// Default: 1e-3
    pub closure_tolerance: f64,

    /// Band around ±1 (parallel) and 0 (perpendicular) for normalized dot
    /// products of rectangle edges. Default: 0.1
    pub angle_tolerance: f64,

    /// Planar centre distance below which two rectangles share a footprint.
    /// Default: 0.1 length units
    pub stack_xy_tolerance: f64,

    /// Accepted tread proportions. Default: [3.5, 4.0]
    pub aspect_ratio: AspectRatioBand,

    /// Decimal places kept in displayed depths. Default: 2
    pub depth_precision: u32,

    /// Minimum tread depth for the safety check (model units). Default: 0.25
    pub min_tread_depth: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            horizontal_tolerance: 1e-3,
            closure_tolerance: 1e-3,
            angle_tolerance: 0.1,
            stack_xy_tolerance: 0.1,
            aspect_ratio: AspectRatioBand::default(),
            depth_precision: 2,
            min_tread_depth: 0.25,
        }
    }
}

impl PipelineConfig {
    /// Parses a JSON configuration; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PipelineConfig =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load overrides from `STAIRSCAN_*` environment variables.
    ///
    /// Unset or unparsable variables keep the default value.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`PipelineConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read_f64 = |key: &str, default: f64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .unwrap_or(default)
        };

        Self {
            horizontal_tolerance: read_f64(
                "STAIRSCAN_HORIZONTAL_TOLERANCE",
                defaults.horizontal_tolerance,
            ),
            closure_tolerance: read_f64("STAIRSCAN_CLOSURE_TOLERANCE", defaults.closure_tolerance),
            angle_tolerance: read_f64("STAIRSCAN_ANGLE_TOLERANCE", defaults.angle_tolerance),
            stack_xy_tolerance: read_f64("STAIRSCAN_STACK_XY_TOLERANCE", defaults.stack_xy_tolerance),
            aspect_ratio: AspectRatioBand {
                min: read_f64("STAIRSCAN_ASPECT_MIN", defaults.aspect_ratio.min),
                max: read_f64("STAIRSCAN_ASPECT_MAX", defaults.aspect_ratio.max),
            },
            depth_precision: lookup("STAIRSCAN_DEPTH_PRECISION")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.depth_precision),
            min_tread_depth: read_f64("STAIRSCAN_MIN_TREAD_DEPTH", defaults.min_tread_depth),
        }
    }

    pub fn with_aspect_ratio(mut self, min: f64, max: f64) -> Self {
        self.aspect_ratio = AspectRatioBand::new(min, max);
        self
    }

    pub fn with_horizontal_tolerance(mut self, tolerance: f64) -> Self {
        self.horizontal_tolerance = tolerance;
        self
    }

    /// Rejects tolerances that are negative or non-finite and aspect bands
    /// that are empty or not positive.
    pub fn validate(&self) -> Result<()> {
        let tolerances = [
            ("horizontal_tolerance", self.horizontal_tolerance),
            ("closure_tolerance", self.closure_tolerance),
            ("angle_tolerance", self.angle_tolerance),
            ("stack_xy_tolerance", self.stack_xy_tolerance),
            ("min_tread_depth", self.min_tread_depth),
        ];
        for (name, value) in tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        let band = self.aspect_ratio;
        if !band.min.is_finite() || !band.max.is_finite() || band.min <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "aspect ratio band must be finite and positive (got [{}, {}])",
                band.min, band.max
            )));
        }
        if band.min > band.max {
            return Err(Error::InvalidConfig(format!(
                "aspect ratio band is inverted: min {} > max {}",
                band.min, band.max
            )));
        }

        if self.depth_precision > 15 {
            return Err(Error::InvalidConfig(format!(
                "depth_precision must be at most 15 (got {})",
                self.depth_precision
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.aspect_ratio, AspectRatioBand::new(3.5, 4.0));
        assert_eq!(config.depth_precision, 2);
    }

    #[test]
    fn band_is_inclusive() {
        let band = AspectRatioBand::default();
        assert!(band.contains(3.5));
        assert!(band.contains(4.0));
        assert!(band.contains(3.75));
        assert!(!band.contains(2.0));
        assert!(!band.contains(4.01));
    }

    #[test]
    fn json_keeps_defaults_for_missing_fields() {
        let config =
            PipelineConfig::from_json(r#"{"aspect_ratio": {"min": 3.0, "max": 4.5}}"#).unwrap();
        assert_eq!(config.aspect_ratio, AspectRatioBand::new(3.0, 4.5));
        assert_eq!(config.horizontal_tolerance, 1e-3);
        assert_eq!(config.min_tread_depth, 0.25);
    }

    #[test]
    fn json_rejects_inverted_band() {
        let err = PipelineConfig::from_json(r#"{"aspect_ratio": {"min": 4.0, "max": 3.0}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn json_rejects_garbage() {
        assert!(matches!(
            PipelineConfig::from_json(r#"{"angle_tolerance": "wide"}"#),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn negative_tolerance_is_invalid() {
        let config = PipelineConfig {
            closure_tolerance: -1.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("closure_tolerance"));
    }

    #[test]
    fn lookup_overrides_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = [
            ("STAIRSCAN_HORIZONTAL_TOLERANCE", "0.0001"),
            ("STAIRSCAN_ASPECT_MIN", "3.0"),
            ("STAIRSCAN_DEPTH_PRECISION", "3"),
            ("STAIRSCAN_ANGLE_TOLERANCE", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = PipelineConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.horizontal_tolerance, 1e-4);
        assert_eq!(config.aspect_ratio.min, 3.0);
        assert_eq!(config.aspect_ratio.max, 4.0);
        assert_eq!(config.depth_precision, 3);
        assert_eq!(config.angle_tolerance, 0.1);
    }
}
