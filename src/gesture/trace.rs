use super::types::{GestureInput, GestureStage, ResetReason};

/// Snapshot of the engine after one dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureTrace {
    pub stage: GestureStage,
    pub input: Option<GestureInput>,
    pub reset_reason: ResetReason,
    pub ignored: bool,
    pub fired: bool,
}
