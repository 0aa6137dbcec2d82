use crate::geometry::{Classification, GestureToken};

/// What the state machine consumes for one completed touch sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureInput {
    Token(GestureToken),
    OutOfBand,
}

impl From<Classification> for GestureInput {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::OutOfBand => Self::OutOfBand,
            Classification::Zone(token) => Self::Token(token),
        }
    }
}

pub type GestureProgress = heapless::Vec<GestureToken, 2>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum GestureStage {
    #[default]
    Idle = 0,
    SawBack = 1,
    SawBackHome = 2,
}

impl GestureStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SawBack => "saw_back",
            Self::SawBackHome => "saw_back_home",
        }
    }

    /// Tokens of the BACK → HOME → MENU sequence matched so far.
    pub fn progress(self) -> GestureProgress {
        let matched: &[GestureToken] = match self {
            Self::Idle => &[],
            Self::SawBack => &[GestureToken::Back],
            Self::SawBackHome => &[GestureToken::Back, GestureToken::Home],
        };
        GestureProgress::from_slice(matched).unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum ResetReason {
    #[default]
    None = 0,
    UnexpectedToken = 1,
    NoZone = 2,
    OutOfBand = 3,
}

impl ResetReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::UnexpectedToken => "unexpected_token",
            Self::NoZone => "no_zone",
            Self::OutOfBand => "out_of_band",
        }
    }

    pub const fn for_input(input: GestureInput) -> Self {
        match input {
            GestureInput::OutOfBand => Self::OutOfBand,
            GestureInput::Token(GestureToken::None) => Self::NoZone,
            GestureInput::Token(_) => Self::UnexpectedToken,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GestureAction {
    Advanced(GestureStage),
    Repeat(GestureToken),
    Reset { reason: ResetReason },
    Fire,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActionBuffer {
    len: usize,
    slots: [Option<GestureAction>; Self::MAX],
}

impl ActionBuffer {
    pub const MAX: usize = 2;

    pub const fn new() -> Self {
        Self {
            len: 0,
            slots: [None; Self::MAX],
        }
    }

    pub fn push(&mut self, action: GestureAction) {
        if self.len >= Self::MAX {
            return;
        }
        self.slots[self.len] = Some(action);
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &GestureAction> {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }

    pub fn contains_fire(&self) -> bool {
        self.iter()
            .any(|action| matches!(action, GestureAction::Fire))
    }

    pub fn reset_reason(&self) -> ResetReason {
        self.iter()
            .find_map(|action| match action {
                GestureAction::Reset { reason } => Some(*reason),
                _ => None,
            })
            .unwrap_or_default()
    }
}

impl Default for ActionBuffer {
    fn default() -> Self {
        Self::new()
    }
}
