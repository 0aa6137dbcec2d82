use anyhow::{Context, Result};
use embassy_futures::block_on;
use sweep2sleep::{
    control, Classification, GesturePipeline, KeyEdge, PipelineStep, PowerKeySink, PowerTrigger,
    RuntimeConfig, ScreenGate, ScreenObserver, ZoneGeometry,
};

use super::trace::{ReplayLine, ReplayStep};

#[derive(Clone, Copy, Debug)]
pub struct ReplayOptions {
    pub geometry: ZoneGeometry,
    pub hold_ms: u32,
    pub debug: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub samples: usize,
    pub actuations: Vec<usize>,
    pub rows: Vec<String>,
}

#[derive(Default)]
struct CountingSink {
    downs: usize,
}

impl PowerKeySink for CountingSink {
    fn key(&mut self, _code: u16, edge: KeyEdge) {
        if edge == KeyEdge::Down {
            self.downs += 1;
        }
    }

    fn sync(&mut self) {}
}

/// Feeds a trace through a fresh pipeline. Pending presses are run to
/// completion before the next line, so every completed gesture is counted.
pub fn replay(lines: &[ReplayLine], options: ReplayOptions) -> Result<ReplayReport> {
    let config = RuntimeConfig::new();
    config.set_gesture_enabled(true);
    config.set_debug_enabled(options.debug);
    config.set_pwrkey_hold_ms(options.hold_ms);
    let screen = ScreenGate::new();
    let trigger = PowerTrigger::new();
    let mut pipeline = GesturePipeline::new(options.geometry, &config, &screen, &trigger);
    let mut sink = CountingSink::default();
    let mut report = ReplayReport::default();

    for line in lines {
        let step = match &line.step {
            ReplayStep::Axis(axis, value) => Some(pipeline.on_axis(*axis, *value)),
            ReplayStep::Abs { code, value } => Some(pipeline.on_abs_event(*code, *value)),
            ReplayStep::ScreenOff => {
                screen.screen_off();
                None
            }
            ReplayStep::ScreenOn => {
                screen.screen_on();
                None
            }
            ReplayStep::Set { attr, payload } => {
                control::store(&config, *attr, payload.as_bytes())
                    .map_err(|err| anyhow::anyhow!("{err}"))
                    .with_context(|| format!("line {}: set {}", line.line_no, attr.name()))?;
                None
            }
        };

        if let Some(step) = step {
            if let Some(row) = sample_row(line.line_no, &step) {
                report.samples += 1;
                report.rows.push(row);
            }
        }

        if trigger.is_busy() {
            block_on(trigger.run_once(&mut sink, &config));
            report.actuations.push(line.line_no);
        }
    }

    debug_assert_eq!(sink.downs, report.actuations.len());
    Ok(report)
}

fn sample_row(line_no: usize, step: &PipelineStep) -> Option<String> {
    let (sample, classification, verdict) = match step {
        PipelineStep::Gated {
            sample,
            classification,
        } => (sample, classification, "gated".to_string()),
        PipelineStep::Evaluated {
            sample,
            classification,
            output,
            ..
        } => {
            let verdict = if output.fired() {
                "fire".to_string()
            } else {
                output.trace.stage.label().to_string()
            };
            (sample, classification, verdict)
        }
        _ => return None,
    };
    let zone = match classification {
        Classification::OutOfBand => "out_of_band",
        Classification::Zone(token) => token.label(),
    };
    Some(format!(
        "sample,{line_no},{},{},{zone},{verdict}",
        sample.x, sample.y
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::parse_trace;

    const BUNDLED: &str = include_str!("../traces/back_home_menu.trace");

    fn options() -> ReplayOptions {
        ReplayOptions {
            geometry: ZoneGeometry::ZENFONE2,
            hold_ms: 1,
            debug: false,
        }
    }

    #[test]
    fn bundled_trace_fires_twice() {
        let lines = parse_trace(BUNDLED.as_bytes()).unwrap();
        let report = replay(&lines, options()).unwrap();

        assert_eq!(report.actuations.len(), 2);
        assert!(report.rows.iter().any(|row| row.ends_with(",gated")));
        assert_eq!(
            report.rows.iter().filter(|row| row.ends_with(",fire")).count(),
            2
        );
    }

    #[test]
    fn invalid_control_write_aborts_replay() {
        let lines = parse_trace("set sweep2sleep nope\n".as_bytes()).unwrap();
        let err = replay(&lines, options()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid input"));
    }
}
