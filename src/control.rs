use core::fmt::{self, Write};

use super::config::{RuntimeConfig, PWRKEY_HOLD_MS_MAX, PWRKEY_HOLD_MS_MIN};

pub const VERSION: &str = "1.0.1";

/// Text-encoded tunables, named after the attributes the original driver
/// exposed under `android_touch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAttribute {
    Enable,
    Debug,
    HoldMs,
    Version,
}

impl ControlAttribute {
    pub const ALL: [Self; 4] = [Self::Enable, Self::Debug, Self::HoldMs, Self::Version];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Enable => "sweep2sleep",
            Self::Debug => "sweep2sleep_debug",
            Self::HoldMs => "sweep2sleep_pwrkey_dur",
            Self::Version => "sweep2sleep_version",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }

    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::Version)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlError {
    /// Payload did not start with an integer.
    InvalidInput,
    OutOfRange,
    ReadOnly,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => f.write_str("invalid input"),
            Self::OutOfRange => f.write_str("value out of range"),
            Self::ReadOnly => f.write_str("attribute is read-only"),
        }
    }
}

pub type AttributeText = heapless::String<16>;

pub fn show(config: &RuntimeConfig, attr: ControlAttribute) -> AttributeText {
    let mut out = AttributeText::new();
    let _ = match attr {
        ControlAttribute::Enable => writeln!(out, "{}", u8::from(config.gesture_enabled())),
        ControlAttribute::Debug => writeln!(out, "{}", u8::from(config.debug_enabled())),
        ControlAttribute::HoldMs => writeln!(out, "{}", config.pwrkey_hold_ms()),
        ControlAttribute::Version => writeln!(out, "{VERSION}"),
    };
    out
}

/// Applies a write and returns the number of bytes consumed.
///
/// The payload must start with a decimal integer (after optional whitespace
/// and sign); anything following it is ignored.
pub fn store(
    config: &RuntimeConfig,
    attr: ControlAttribute,
    payload: &[u8],
) -> Result<usize, ControlError> {
    if !attr.is_writable() {
        return Err(ControlError::ReadOnly);
    }
    let Some(value) = parse_leading_i32(payload) else {
        return Err(ControlError::InvalidInput);
    };

    match attr {
        ControlAttribute::Enable => config.set_gesture_enabled(value > 0),
        ControlAttribute::Debug => match value {
            0 => config.set_debug_enabled(false),
            1 => config.set_debug_enabled(true),
            _ => {}
        },
        ControlAttribute::HoldMs => {
            let Ok(hold_ms) = u32::try_from(value) else {
                return Err(ControlError::OutOfRange);
            };
            if !(PWRKEY_HOLD_MS_MIN..=PWRKEY_HOLD_MS_MAX).contains(&hold_ms) {
                return Err(ControlError::OutOfRange);
            }
            config.set_pwrkey_hold_ms(hold_ms);
        }
        ControlAttribute::Version => return Err(ControlError::ReadOnly),
    }
    Ok(payload.len())
}

fn parse_leading_i32(bytes: &[u8]) -> Option<i32> {
    let mut i = 0usize;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    parse_i32_ascii(bytes, i).map(|(value, _)| value)
}

fn parse_u64_ascii(bytes: &[u8], mut i: usize) -> Option<(u64, usize)> {
    let mut value = 0u64;
    let start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value
            .checked_mul(10)?
            .checked_add((bytes[i] - b'0') as u64)?;
        i += 1;
    }
    if i == start {
        None
    } else {
        Some((value, i))
    }
}

fn parse_i32_ascii(bytes: &[u8], i: usize) -> Option<(i32, usize)> {
    if i >= bytes.len() {
        return None;
    }
    let mut idx = i;
    let mut sign = 1i64;
    if bytes[idx] == b'-' {
        sign = -1;
        idx += 1;
    } else if bytes[idx] == b'+' {
        idx += 1;
    }

    let (unsigned, next_idx) = parse_u64_ascii(bytes, idx)?;
    let signed = sign.checked_mul(i64::try_from(unsigned).ok()?)?;
    let value = i32::try_from(signed).ok()?;
    Some((value, next_idx))
}
