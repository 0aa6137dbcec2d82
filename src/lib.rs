//! Sweep2sleep: recognizes a BACK → HOME → MENU tap sequence along the bottom
//! edge of a touch panel and synthesizes a power key press in response.
//!
//! The recognition path ([`GesturePipeline`]) is synchronous and never sleeps,
//! so it can be driven straight from an input event callback. The key press
//! itself runs in a separate async task ([`PowerTrigger::run`]).

#![cfg_attr(not(test), no_std)]

pub mod actuator;
pub mod config;
pub mod control;
pub mod decoder;
pub mod geometry;
pub mod gesture;
pub mod pipeline;
pub mod screen;

pub use actuator::{KeyEdge, PowerKeySink, PowerTrigger, TriggerOutcome, KEY_POWER};
pub use config::RuntimeConfig;
pub use control::{ControlAttribute, ControlError, VERSION};
pub use decoder::{Axis, TouchDecoder, TouchSample};
pub use geometry::{AxisRange, Classification, GeometryError, GestureToken, ZoneGeometry};
pub use gesture::{GestureAction, GestureEngine, GestureInput, GestureOutput, GestureStage};
pub use pipeline::{GesturePipeline, PipelineStep};
pub use screen::{ScreenGate, ScreenObserver};
