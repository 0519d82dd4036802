// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{CommonResult, ConfigError, CursorPalette, ProjectionConfig, SegmentsConfig,
            ok};

/// All the tuning knobs of the editor core in one place. Missing fields in the JSON take
/// their default values.
///
/// ```
/// use r3bl_editor_core::EditorCoreConfig;
///
/// let config =
///     EditorCoreConfig::from_json_str(r#"{ "segments": { "segment_size": 128 } }"#)
///         .unwrap();
/// assert_eq!(config.segments.segment_size, 128);
/// assert_eq!(config.projection.refresh_threshold, 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorCoreConfig {
    pub segments: SegmentsConfig,
    pub projection: ProjectionConfig,
    pub palette: CursorPalette,
}

impl EditorCoreConfig {
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found in one of the sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.segments.validate()?;
        self.projection.validate()?;
        ok!()
    }

    /// Parse and validate a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::Parse`] if `json` is malformed, or the error from
    /// [`Self::validate`].
    pub fn from_json_str(json: &str) -> CommonResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|error| ConfigError::Parse {
            message: error.to_string(),
        })?;
        config.validate()?;
        ok!(config)
    }
}
