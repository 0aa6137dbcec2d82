use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use embassy_time::{Duration, Timer};

use super::config::{RuntimeConfig, LOG_TAG};

pub const KEY_POWER: u16 = 116;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

/// Receiver of synthetic key edges, e.g. a virtual input device.
pub trait PowerKeySink {
    fn key(&mut self, code: u16, edge: KeyEdge);
    /// Marks the end of one input report.
    fn sync(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    Queued,
    /// A press cycle is already pending or running; the request was dropped.
    Busy,
}

#[derive(Clone, Copy, Debug)]
struct PressRequest;

/// Single-slot hand-off between the recognition path and the task that
/// performs the press.
///
/// `trigger` never blocks. At most one press cycle is pending or running at
/// any time; requests made meanwhile are dropped, not queued.
pub struct PowerTrigger {
    requests: Channel<CriticalSectionRawMutex, PressRequest, 1>,
    in_flight: AtomicBool,
}

impl PowerTrigger {
    pub const fn new() -> Self {
        Self {
            requests: Channel::new(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn trigger(&self) -> TriggerOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return TriggerOutcome::Busy;
        }

        // A full slot still holds a request whose cycle releases the flag.
        if self.requests.try_send(PressRequest).is_err() {
            return TriggerOutcome::Busy;
        }
        TriggerOutcome::Queued
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Worker loop; spawn it once per sink.
    pub async fn run<S: PowerKeySink>(&self, sink: &mut S, config: &RuntimeConfig) -> ! {
        loop {
            self.run_once(sink, config).await;
        }
    }

    /// Waits for one request and runs its press cycle to completion.
    pub async fn run_once<S: PowerKeySink>(&self, sink: &mut S, config: &RuntimeConfig) {
        let PressRequest = self.requests.receive().await;

        let hold_ms = config.pwrkey_hold_ms();
        if config.debug_enabled() {
            log::info!("{LOG_TAG}: pwrkey press hold_ms={hold_ms}");
        }
        press_cycle(sink, Duration::from_millis(u64::from(hold_ms))).await;

        self.in_flight.store(false, Ordering::Release);
    }
}

impl Default for PowerTrigger {
    fn default() -> Self {
        Self::new()
    }
}

async fn press_cycle<S: PowerKeySink>(sink: &mut S, hold: Duration) {
    sink.key(KEY_POWER, KeyEdge::Down);
    sink.sync();
    Timer::after(hold).await;

    sink.key(KEY_POWER, KeyEdge::Up);
    sink.sync();
    Timer::after(hold).await;
}
