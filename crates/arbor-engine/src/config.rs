//! Engine timing configuration.

use std::time::Duration;

/// Timing knobs for the run controller.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Wall-clock wait between published states at 1x speed.
    pub base_interval: Duration,

    /// How long a hold must persist before auto-repeat starts.
    pub hold_debounce: Duration,

    /// Speed multiplier applied while boost is held and to hold auto-repeat.
    /// Clamped to at least 1.
    pub speed_multiplier: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_millis(1000),
            hold_debounce: Duration::from_millis(250),
            speed_multiplier: 10,
        }
    }
}

impl EngineConfig {
    /// Create a config optimized for fast stepping (tests, local).
    #[must_use]
    pub fn fast() -> Self {
        Self {
            base_interval: Duration::from_millis(2),
            hold_debounce: Duration::from_millis(10),
            speed_multiplier: 10,
        }
    }

    /// Set the pacing interval at 1x speed.
    #[must_use]
    pub fn with_base_interval(mut self, interval: Duration) -> Self {
        self.base_interval = interval;
        self
    }

    /// Set the hold debounce window.
    #[must_use]
    pub fn with_hold_debounce(mut self, debounce: Duration) -> Self {
        self.hold_debounce = debounce;
        self
    }

    /// Set the initial speed multiplier.
    #[must_use]
    pub fn with_speed_multiplier(mut self, multiplier: u32) -> Self {
        self.speed_multiplier = multiplier.max(1);
        self
    }
}
