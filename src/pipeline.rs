use super::{
    actuator::{PowerTrigger, TriggerOutcome},
    config::{RuntimeConfig, LOG_TAG},
    decoder::{Axis, TouchDecoder, TouchSample},
    geometry::{Classification, ZoneGeometry},
    gesture::{
        GestureEngine, GestureInput, GestureOutput, GestureProgress, GestureStage, ResetReason,
    },
    screen::ScreenGate,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStep {
    /// Not a touch position code.
    Ignored,
    /// Gestures are switched off; the report was not decoded.
    Disabled,
    /// Waiting for the other axis.
    Pending,
    /// Sample classified while the display is blanked.
    Gated {
        sample: TouchSample,
        classification: Classification,
    },
    Evaluated {
        sample: TouchSample,
        classification: Classification,
        output: GestureOutput,
        trigger: Option<TriggerOutcome>,
    },
}

impl PipelineStep {
    pub fn fired(&self) -> bool {
        matches!(self, Self::Evaluated { output, .. } if output.fired())
    }
}

/// Per-device recognition context: raw axis reports in, power trigger
/// requests out. Never blocks.
pub struct GesturePipeline<'a> {
    decoder: TouchDecoder,
    geometry: ZoneGeometry,
    engine: GestureEngine,
    config: &'a RuntimeConfig,
    screen: &'a ScreenGate,
    trigger: &'a PowerTrigger,
}

impl<'a> GesturePipeline<'a> {
    pub fn new(
        geometry: ZoneGeometry,
        config: &'a RuntimeConfig,
        screen: &'a ScreenGate,
        trigger: &'a PowerTrigger,
    ) -> Self {
        Self {
            decoder: TouchDecoder::new(),
            geometry,
            engine: GestureEngine::new(),
            config,
            screen,
            trigger,
        }
    }

    pub fn on_abs_event(&mut self, code: u16, value: i32) -> PipelineStep {
        let Some(axis) = Axis::from_abs_code(code) else {
            return PipelineStep::Ignored;
        };
        self.on_axis(axis, value)
    }

    pub fn on_axis(&mut self, axis: Axis, value: i32) -> PipelineStep {
        if !self.config.gesture_enabled() {
            return PipelineStep::Disabled;
        }
        let Some(sample) = self.decoder.ingest(axis, value) else {
            return PipelineStep::Pending;
        };
        self.on_sample(sample)
    }

    /// Classifies a completed sample and advances the gesture.
    pub fn on_sample(&mut self, sample: TouchSample) -> PipelineStep {
        let debug = self.config.debug_enabled();
        let classification = self.geometry.classify(sample);
        if debug {
            log_classification(sample, classification);
        }

        if self.screen.is_suspended() {
            return PipelineStep::Gated {
                sample,
                classification,
            };
        }

        let armed = self.config.gesture_enabled();
        let output = self
            .engine
            .feed(GestureInput::from(classification), armed);
        let trigger = output.fired().then(|| self.trigger.trigger());

        if debug {
            log_gesture(output, trigger);
        }

        PipelineStep::Evaluated {
            sample,
            classification,
            output,
            trigger,
        }
    }

    pub fn stage(&self) -> GestureStage {
        self.engine.stage()
    }

    pub fn progress(&self) -> GestureProgress {
        self.engine.progress()
    }
}

fn log_classification(sample: TouchSample, classification: Classification) {
    match classification {
        Classification::OutOfBand => log::info!(
            "{LOG_TAG}: touch out_of_band x={} y={}",
            sample.x,
            sample.y
        ),
        Classification::Zone(token) => log::info!(
            "{LOG_TAG}: touch x={} y={} zone={}",
            sample.x,
            sample.y,
            token.label()
        ),
    }
}

fn log_gesture(output: GestureOutput, trigger: Option<TriggerOutcome>) {
    let trace = output.trace;
    match trigger {
        Some(TriggerOutcome::Queued) => log::info!("{LOG_TAG}: gesture complete, pwrkey queued"),
        Some(TriggerOutcome::Busy) => log::info!("{LOG_TAG}: gesture complete, pwrkey busy"),
        None if trace.reset_reason != ResetReason::None => log::info!(
            "{LOG_TAG}: gesture reset reason={}",
            trace.reset_reason.label()
        ),
        None => log::info!("{LOG_TAG}: gesture stage={}", trace.stage.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decoder::{ABS_MT_POSITION_X, ABS_MT_POSITION_Y},
        geometry::GestureToken,
        screen::ScreenObserver,
    };

    mod capture {
        use std::{cell::RefCell, string::String, sync::Once, vec::Vec};

        struct CaptureLogger;

        std::thread_local! {
            static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
        }

        impl log::Log for CaptureLogger {
            fn enabled(&self, _: &log::Metadata<'_>) -> bool {
                true
            }

            fn log(&self, record: &log::Record<'_>) {
                LINES.with(|lines| lines.borrow_mut().push(std::format!("{}", record.args())));
            }

            fn flush(&self) {}
        }

        static LOGGER: CaptureLogger = CaptureLogger;
        static INSTALL: Once = Once::new();

        /// Routes log records to a per-thread buffer and clears it.
        pub fn start() {
            INSTALL.call_once(|| {
                let _ = log::set_logger(&LOGGER);
                log::set_max_level(log::LevelFilter::Trace);
            });
            LINES.with(|lines| lines.borrow_mut().clear());
        }

        pub fn take() -> Vec<String> {
            LINES.with(|lines| core::mem::take(&mut *lines.borrow_mut()))
        }
    }

    struct Fixture {
        config: RuntimeConfig,
        screen: ScreenGate,
        trigger: PowerTrigger,
    }

    impl Fixture {
        fn enabled() -> Self {
            let config = RuntimeConfig::new();
            config.set_gesture_enabled(true);
            Self {
                config,
                screen: ScreenGate::new(),
                trigger: PowerTrigger::new(),
            }
        }

        fn pipeline(&self) -> GesturePipeline<'_> {
            GesturePipeline::new(
                ZoneGeometry::ZENFONE2,
                &self.config,
                &self.screen,
                &self.trigger,
            )
        }
    }

    fn touch(pipeline: &mut GesturePipeline<'_>, x: i32, y: i32) -> PipelineStep {
        assert_eq!(pipeline.on_axis(Axis::X, x), PipelineStep::Pending);
        pipeline.on_axis(Axis::Y, y)
    }

    #[test]
    fn full_gesture_requests_one_press() {
        let fixture = Fixture::enabled();
        let mut pipeline = fixture.pipeline();

        assert!(!touch(&mut pipeline, 250, 2000).fired());
        assert!(!touch(&mut pipeline, 550, 2000).fired());
        let last = touch(&mut pipeline, 900, 2000);

        assert!(last.fired());
        assert!(matches!(
            last,
            PipelineStep::Evaluated {
                trigger: Some(TriggerOutcome::Queued),
                ..
            }
        ));
        assert!(fixture.trigger.is_busy());
        assert_eq!(pipeline.stage(), GestureStage::Idle);
    }

    #[test]
    fn skipped_zone_resets_without_press() {
        let fixture = Fixture::enabled();
        let mut pipeline = fixture.pipeline();

        let _ = touch(&mut pipeline, 250, 2000);
        let step = touch(&mut pipeline, 900, 2000);

        assert!(!step.fired());
        assert!(!fixture.trigger.is_busy());
        assert_eq!(pipeline.stage(), GestureStage::Idle);
    }

    #[test]
    fn disabled_gestures_skip_decoding() {
        let fixture = Fixture::enabled();
        fixture.config.set_gesture_enabled(false);
        let mut pipeline = fixture.pipeline();

        assert_eq!(pipeline.on_axis(Axis::X, 250), PipelineStep::Disabled);
        assert_eq!(pipeline.on_axis(Axis::Y, 2000), PipelineStep::Disabled);

        fixture.config.set_gesture_enabled(true);
        // Nothing was buffered while disabled.
        assert_eq!(pipeline.on_axis(Axis::X, 250), PipelineStep::Pending);
    }

    #[test]
    fn blanked_screen_keeps_progress_and_never_fires() {
        let fixture = Fixture::enabled();
        let mut pipeline = fixture.pipeline();

        let _ = touch(&mut pipeline, 250, 2000);
        fixture.screen.screen_off();

        for (x, y) in [(550, 2000), (900, 2000), (250, 1000)] {
            let step = touch(&mut pipeline, x, y);
            assert!(matches!(step, PipelineStep::Gated { .. }));
        }
        assert_eq!(pipeline.progress().as_slice(), &[GestureToken::Back]);
        assert!(!fixture.trigger.is_busy());

        fixture.screen.screen_on();
        let _ = touch(&mut pipeline, 550, 2000);
        assert!(touch(&mut pipeline, 900, 2000).fired());
    }

    #[test]
    fn band_miss_resets_progress() {
        let fixture = Fixture::enabled();
        let mut pipeline = fixture.pipeline();

        let _ = touch(&mut pipeline, 250, 2000);
        let _ = touch(&mut pipeline, 550, 2000);
        let step = touch(&mut pipeline, 900, 1000);

        assert!(matches!(
            step,
            PipelineStep::Evaluated {
                classification: Classification::OutOfBand,
                ..
            }
        ));
        assert!(pipeline.progress().is_empty());
        assert!(!touch(&mut pipeline, 900, 2000).fired());
    }

    #[test]
    fn second_gesture_while_press_pending_is_dropped() {
        let fixture = Fixture::enabled();
        let mut pipeline = fixture.pipeline();

        for (x, y) in [(250, 2000), (550, 2000), (900, 2000), (250, 2000), (550, 2000)] {
            let _ = touch(&mut pipeline, x, y);
        }
        let again = touch(&mut pipeline, 900, 2000);

        assert!(again.fired());
        assert!(matches!(
            again,
            PipelineStep::Evaluated {
                trigger: Some(TriggerOutcome::Busy),
                ..
            }
        ));
    }

    #[test]
    fn abs_codes_drive_the_decoder() {
        let fixture = Fixture::enabled();
        let mut pipeline = fixture.pipeline();

        assert_eq!(pipeline.on_abs_event(0x39, 7), PipelineStep::Ignored);
        assert_eq!(
            pipeline.on_abs_event(ABS_MT_POSITION_X, 250),
            PipelineStep::Pending
        );
        let step = pipeline.on_abs_event(ABS_MT_POSITION_Y, 2000);
        assert!(matches!(
            step,
            PipelineStep::Evaluated {
                classification: Classification::Zone(GestureToken::Back),
                ..
            }
        ));
    }

    #[test]
    fn debug_off_logs_nothing() {
        let fixture = Fixture::enabled();
        fixture.config.set_debug_enabled(false);
        let mut pipeline = fixture.pipeline();
        capture::start();

        let _ = touch(&mut pipeline, 250, 2000);
        let _ = touch(&mut pipeline, 550, 2000);
        let _ = touch(&mut pipeline, 900, 1000);

        assert!(capture::take().is_empty());
    }

    #[test]
    fn debug_on_logs_each_classified_touch() {
        let fixture = Fixture::enabled();
        fixture.config.set_debug_enabled(true);
        let mut pipeline = fixture.pipeline();
        capture::start();

        let _ = touch(&mut pipeline, 250, 2000);
        let _ = touch(&mut pipeline, 900, 1000);

        let lines = capture::take();
        assert!(lines
            .iter()
            .any(|line| line.starts_with("s2s: touch x=250 y=2000 zone=back")));
        assert!(lines
            .iter()
            .any(|line| line == "s2s: touch out_of_band x=900 y=1000"));
    }
}
