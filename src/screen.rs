use core::sync::atomic::{AtomicBool, Ordering};

/// Display blank/unblank notifications from the host's power management.
pub trait ScreenObserver {
    fn screen_off(&self);
    fn screen_on(&self);
}

/// Tracks whether the display is blanked. Gesture evaluation is suspended
/// while it is.
#[derive(Debug, Default)]
pub struct ScreenGate {
    suspended: AtomicBool,
}

impl ScreenGate {
    pub const fn new() -> Self {
        Self {
            suspended: AtomicBool::new(false),
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::Relaxed)
    }
}

impl ScreenObserver for ScreenGate {
    fn screen_off(&self) {
        self.suspended.store(true, Ordering::Relaxed);
    }

    fn screen_on(&self) {
        self.suspended.store(false, Ordering::Relaxed);
    }
}
