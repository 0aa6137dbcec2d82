pub mod hsm;
pub mod trace;
pub mod types;

pub use hsm::{GestureEngine, GestureOutput};
pub use trace::GestureTrace;
pub use types::{
    ActionBuffer, GestureAction, GestureInput, GestureProgress, GestureStage, ResetReason,
};
