use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{
    trace::GestureTrace,
    types::{ActionBuffer, GestureAction, GestureInput, GestureProgress, GestureStage, ResetReason},
};
use crate::geometry::GestureToken;

#[derive(Default)]
struct DispatchContext {
    actions: ActionBuffer,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureOutput {
    pub actions: ActionBuffer,
    pub trace: GestureTrace,
}

impl GestureOutput {
    pub fn fired(&self) -> bool {
        self.actions.contains_fire()
    }
}

/// Recognizes BACK → HOME → MENU, with immediate repeats of the most recent
/// token tolerated and anything else resetting to idle.
pub struct GestureEngine {
    machine: statig::blocking::StateMachine<GestureHsm>,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureEngine {
    pub fn new() -> Self {
        Self {
            machine: GestureHsm::default().state_machine(),
        }
    }

    /// Dispatches one input. With `armed` false the input is ignored and the
    /// current progress is kept as is.
    pub fn feed(&mut self, input: GestureInput, armed: bool) -> GestureOutput {
        if !armed {
            return GestureOutput {
                actions: ActionBuffer::new(),
                trace: GestureTrace {
                    stage: self.stage(),
                    input: Some(input),
                    ignored: true,
                    ..GestureTrace::default()
                },
            };
        }

        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&input, &mut context);
        self.finish(input, context)
    }

    pub fn stage(&self) -> GestureStage {
        self.machine.inner().stage
    }

    pub fn progress(&self) -> GestureProgress {
        self.stage().progress()
    }

    fn finish(&self, input: GestureInput, context: DispatchContext) -> GestureOutput {
        GestureOutput {
            actions: context.actions,
            trace: GestureTrace {
                stage: self.stage(),
                input: Some(input),
                reset_reason: context.actions.reset_reason(),
                ignored: false,
                fired: context.actions.contains_fire(),
            },
        }
    }
}

#[derive(Default)]
struct GestureHsm {
    stage: GestureStage,
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[action]
    fn enter_idle(&mut self) {
        self.stage = GestureStage::Idle;
    }

    #[action]
    fn enter_saw_back(&mut self) {
        self.stage = GestureStage::SawBack;
    }

    #[action]
    fn enter_saw_back_home(&mut self) {
        self.stage = GestureStage::SawBackHome;
    }

    #[state(superstate = "tracking", entry_action = "enter_idle")]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureInput) -> Outcome<State> {
        match event {
            GestureInput::Token(GestureToken::Back) => {
                context
                    .actions
                    .push(GestureAction::Advanced(GestureStage::SawBack));
                Transition(State::saw_back())
            }
            _ => Super,
        }
    }

    #[state(superstate = "tracking", entry_action = "enter_saw_back")]
    fn saw_back(&mut self, context: &mut DispatchContext, event: &GestureInput) -> Outcome<State> {
        match event {
            GestureInput::Token(GestureToken::Back) => {
                context
                    .actions
                    .push(GestureAction::Repeat(GestureToken::Back));
                Handled
            }
            GestureInput::Token(GestureToken::Home) => {
                context
                    .actions
                    .push(GestureAction::Advanced(GestureStage::SawBackHome));
                Transition(State::saw_back_home())
            }
            _ => Super,
        }
    }

    #[state(superstate = "tracking", entry_action = "enter_saw_back_home")]
    fn saw_back_home(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureInput,
    ) -> Outcome<State> {
        match event {
            GestureInput::Token(GestureToken::Home) => {
                context
                    .actions
                    .push(GestureAction::Repeat(GestureToken::Home));
                Handled
            }
            GestureInput::Token(GestureToken::Menu) => {
                context.actions.push(GestureAction::Fire);
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    /// Anything a state did not claim breaks the sequence.
    #[superstate]
    fn tracking(&mut self, context: &mut DispatchContext, event: &GestureInput) -> Outcome<State> {
        context.actions.push(GestureAction::Reset {
            reason: ResetReason::for_input(*event),
        });
        Transition(State::idle())
    }
}
