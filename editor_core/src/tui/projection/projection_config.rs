// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ok};

pub const DEFAULT_REFRESH_THRESHOLD: usize = 4;

/// Tuning for [`crate::Projection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Incremental reconciliation needs at least this many cached rows (or the whole
    /// view, when it is shorter). With fewer, the view is refreshed instead.
    pub refresh_threshold: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            refresh_threshold: DEFAULT_REFRESH_THRESHOLD,
        }
    }
}

impl ProjectionConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroRefreshThreshold`] if the threshold is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_threshold == 0 {
            return Err(ConfigError::ZeroRefreshThreshold);
        }
        ok!()
    }

    /// The threshold for a view that is `height` rows tall.
    #[must_use]
    pub fn threshold_for(&self, height: usize) -> usize { self.refresh_threshold.min(height) }
}
