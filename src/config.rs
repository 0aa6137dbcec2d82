use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

pub const GESTURE_ENABLED_DEFAULT: bool = false;
pub const DEBUG_ENABLED_DEFAULT: bool = true;
// Press and release each need this long before the power manager registers
// them as one actuation.
pub const PWRKEY_HOLD_MS_DEFAULT: u32 = 60;
pub const PWRKEY_HOLD_MS_MIN: u32 = 1;
pub const PWRKEY_HOLD_MS_MAX: u32 = 1_000;

pub(crate) const LOG_TAG: &str = "s2s";

/// Process-wide tunables shared by the recognition path, the actuator task
/// and the control surface.
///
/// Every field is a single-writer atomic; readers tolerate a stale value for
/// one event.
#[derive(Debug)]
pub struct RuntimeConfig {
    gesture_enabled: AtomicBool,
    debug_enabled: AtomicBool,
    pwrkey_hold_ms: AtomicU32,
}

impl RuntimeConfig {
    pub const fn new() -> Self {
        Self {
            gesture_enabled: AtomicBool::new(GESTURE_ENABLED_DEFAULT),
            debug_enabled: AtomicBool::new(DEBUG_ENABLED_DEFAULT),
            pwrkey_hold_ms: AtomicU32::new(PWRKEY_HOLD_MS_DEFAULT),
        }
    }

    pub fn gesture_enabled(&self) -> bool {
        self.gesture_enabled.load(Ordering::Relaxed)
    }

    pub fn set_gesture_enabled(&self, enabled: bool) {
        self.gesture_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled.load(Ordering::Relaxed)
    }

    pub fn set_debug_enabled(&self, enabled: bool) {
        self.debug_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn pwrkey_hold_ms(&self) -> u32 {
        self.pwrkey_hold_ms.load(Ordering::Relaxed)
    }

    /// Stores the hold duration, clamped to the supported range.
    pub fn set_pwrkey_hold_ms(&self, hold_ms: u32) {
        let clamped = hold_ms.clamp(PWRKEY_HOLD_MS_MIN, PWRKEY_HOLD_MS_MAX);
        self.pwrkey_hold_ms.store(clamped, Ordering::Relaxed);
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_module_start_state() {
        let config = RuntimeConfig::new();
        assert!(!config.gesture_enabled());
        assert!(config.debug_enabled());
        assert_eq!(config.pwrkey_hold_ms(), 60);
    }

    #[test]
    fn hold_duration_is_clamped() {
        let config = RuntimeConfig::new();
        config.set_pwrkey_hold_ms(0);
        assert_eq!(config.pwrkey_hold_ms(), PWRKEY_HOLD_MS_MIN);
        config.set_pwrkey_hold_ms(50_000);
        assert_eq!(config.pwrkey_hold_ms(), PWRKEY_HOLD_MS_MAX);
    }
}
