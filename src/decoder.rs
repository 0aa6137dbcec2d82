pub const ABS_MT_POSITION_X: u16 = 0x35;
pub const ABS_MT_POSITION_Y: u16 = 0x36;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Maps a multi-touch absolute axis code to an axis; other codes are not
    /// part of a touch position.
    pub const fn from_abs_code(code: u16) -> Option<Self> {
        match code {
            ABS_MT_POSITION_X => Some(Self::X),
            ABS_MT_POSITION_Y => Some(Self::Y),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchSample {
    pub x: i32,
    pub y: i32,
}

/// Batches per-axis reports into complete touch positions.
///
/// Holds one in-flight sample. A sample is emitted once both axes have been
/// reported since the previous emission; later reports for an axis that is
/// already ready overwrite its value.
#[derive(Clone, Copy, Debug, Default)]
pub struct TouchDecoder {
    pending: TouchSample,
    x_ready: bool,
    y_ready: bool,
}

impl TouchDecoder {
    pub const fn new() -> Self {
        Self {
            pending: TouchSample { x: 0, y: 0 },
            x_ready: false,
            y_ready: false,
        }
    }

    pub fn ingest(&mut self, axis: Axis, value: i32) -> Option<TouchSample> {
        match axis {
            Axis::X => {
                self.pending.x = value;
                self.x_ready = true;
            }
            Axis::Y => {
                self.pending.y = value;
                self.y_ready = true;
            }
        }

        if !(self.x_ready && self.y_ready) {
            return None;
        }

        self.clear();
        Some(self.pending)
    }

    pub fn clear(&mut self) {
        self.x_ready = false;
        self.y_ready = false;
    }

    pub fn is_pending(&self) -> bool {
        self.x_ready || self.y_ready
    }
}
