//! Evaluator configuration.
//!
//! The evaluator derives weekdays and times of day from civil time in a single
//! fixed timezone, so the timezone is part of the configuration rather than a
//! property of the caller's machine.
//!
//! ```toml
//! timezone = "Asia/Manila"
//! assume_available_when_no_data = true
//! ```

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// Timezone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Manila;

/// Settings shared by every availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    /// IANA timezone in which reservation timestamps are read as civil time.
    pub timezone: Tz,
    /// When a venue has no schedule blocks at all, report it as available
    /// instead of failing with `NoScheduleData`.
    pub assume_available_when_no_data: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            assume_available_when_no_data: true,
        }
    }
}

impl EvaluatorConfig {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| AvailabilityError::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AvailabilityError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Replace the timezone with the given IANA name.
    ///
    /// # Errors
    /// Returns `AvailabilityError::InvalidTimezone` if the name is not a valid
    /// IANA identifier.
    pub fn with_timezone(mut self, timezone: &str) -> Result<Self> {
        self.timezone = timezone
            .parse()
            .map_err(|_| AvailabilityError::InvalidTimezone(timezone.to_string()))?;
        Ok(self)
    }

    pub fn with_assume_available_when_no_data(mut self, assume: bool) -> Self {
        self.assume_available_when_no_data = assume;
        self
    }
}
