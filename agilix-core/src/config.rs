//! Daily view gate configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Records a user may view per UTC day.
pub const DEFAULT_DAILY_LIMIT: usize = 50;

/// Rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Limits applied by the daily view gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GateConfig {
    pub daily_limit: usize,
    pub page_size: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            daily_limit: DEFAULT_DAILY_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl GateConfig {
    /// Highest page reachable before the limit trips: `ceil(limit / page_size)`.
    pub fn max_page(&self) -> usize {
        self.daily_limit.div_ceil(self.page_size.max(1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.daily_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "daily_limit".to_string(),
                value: self.daily_limit.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                value: self.page_size.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
