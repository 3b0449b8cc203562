use serde::{Deserialize, Serialize};

/// Number of trial offsets used when nothing else is configured: straight down plus three
/// columns to either side.
pub const DEFAULT_MAX_FAN_OUT: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// How many slots below an anchor are tried before a node is rejected with
    /// [`Error::NoFreeSlot`](crate::Error::NoFreeSlot).
    pub max_fan_out: usize,
    /// Reject dependency cycles up front with
    /// [`Error::CycleDetected`](crate::Error::CycleDetected) instead of letting them stall
    /// the placement passes.
    pub detect_cycles: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_fan_out: DEFAULT_MAX_FAN_OUT,
            detect_cycles: false,
        }
    }
}

impl LayoutOptions {
    pub fn with_max_fan_out(mut self, max_fan_out: usize) -> Self {
        self.max_fan_out = max_fan_out;
        self
    }

    pub fn with_detect_cycles(mut self, detect_cycles: bool) -> Self {
        self.detect_cycles = detect_cycles;
        self
    }

    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
