use core::fmt;

use super::decoder::TouchSample;

/// Symbolic zone a touch landed in. `Back`, `Home` and `Menu` are the three
/// capacitive key areas below the display, in the order the gesture expects
/// them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum GestureToken {
    #[default]
    None = 0,
    Back = 1,
    Home = 2,
    Menu = 3,
}

impl GestureToken {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Back => "back",
            Self::Home => "home",
            Self::Menu => "menu",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// The y coordinate missed the band; any gesture progress is void.
    OutOfBand,
    Zone(GestureToken),
}

/// Inclusive coordinate range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisRange {
    pub lo: i32,
    pub hi: i32,
}

impl AxisRange {
    pub const fn new(lo: i32, hi: i32) -> Self {
        Self { lo, hi }
    }

    pub const fn contains(&self, value: i32) -> bool {
        value >= self.lo && value <= self.hi
    }

    const fn overlaps(&self, other: &AxisRange) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryError {
    InvertedRange { zone: &'static str },
    OverlappingZones {
        first: &'static str,
        second: &'static str,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedRange { zone } => write!(f, "zone {zone} has lo > hi"),
            Self::OverlappingZones { first, second } => {
                write!(f, "zones {first} and {second} overlap on x")
            }
        }
    }
}

/// Panel-specific thresholds for the gesture band and the three key zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneGeometry {
    pub band: AxisRange,
    pub back: AxisRange,
    pub home: AxisRange,
    pub menu: AxisRange,
}

impl ZoneGeometry {
    /// Raw pixel thresholds of the 1080x1920 Zenfone 2 panel, whose key area
    /// reports y beyond the visible display height.
    pub const ZENFONE2: Self = Self {
        band: AxisRange::new(1910, 2500),
        back: AxisRange::new(200, 300),
        home: AxisRange::new(500, 600),
        menu: AxisRange::new(850, 975),
    };

    pub fn classify(&self, sample: TouchSample) -> Classification {
        if !self.band.contains(sample.y) {
            return Classification::OutOfBand;
        }

        let token = if self.back.contains(sample.x) {
            GestureToken::Back
        } else if self.home.contains(sample.x) {
            GestureToken::Home
        } else if self.menu.contains(sample.x) {
            GestureToken::Menu
        } else {
            GestureToken::None
        };
        Classification::Zone(token)
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        let named = [
            ("band", self.band),
            ("back", self.back),
            ("home", self.home),
            ("menu", self.menu),
        ];
        for (zone, range) in named {
            if range.lo > range.hi {
                return Err(GeometryError::InvertedRange { zone });
            }
        }

        let zones = &named[1..];
        for (idx, (first, a)) in zones.iter().enumerate() {
            for (second, b) in &zones[idx + 1..] {
                if a.overlaps(b) {
                    return Err(GeometryError::OverlappingZones {
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for ZoneGeometry {
    fn default() -> Self {
        Self::ZENFONE2
    }
}
