/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::structs::{SEG_DASH, SEG_DIGITS, SEG_DOT, SEG_DOWN, SEG_UP};
use crate::shared::{Direction, DisplayFace, ElevatorState, SegmentCommand};

/***************************************/
/*       Public data structures        */
/***************************************/

/// Door indicator patterns, one bit per LED.
pub const DOOR_CLOSED: u8 = 0b0110;
pub const DOOR_OPEN: u8 = 0b1001;
pub const DOOR_CLOSING: u8 = 0b1111;

/// Four-phase door sequence (closed, open, closing, closed) driven off
/// the shared millisecond clock. Re-arming overwrites the start time and
/// restarts the sequence; after the last phase the timer disarms itself
/// with the closed pattern latched.
pub struct DoorAnimation {
    started_at: Option<u32>,
    phase_time: u32,
    current_pattern: u8,
}

impl DoorAnimation {
    pub fn new(phase_time: u32) -> DoorAnimation {
        DoorAnimation {
            started_at: None,
            phase_time,
            current_pattern: DOOR_CLOSED,
        }
    }

    pub fn arm(&mut self, now: u32) {
        self.started_at = Some(now);
    }

    pub fn is_armed(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn pattern(&self) -> u8 {
        self.current_pattern
    }

    /// Pure function of elapsed time. Returns the indicator pattern to
    /// write whenever it differs from the last one written.
    pub fn service(&mut self, now: u32) -> Option<u8> {
        let started_at = self.started_at?;
        let elapsed = now.wrapping_sub(started_at);

        let pattern = match elapsed / self.phase_time {
            0 => DOOR_CLOSED,
            1 => DOOR_OPEN,
            2 => DOOR_CLOSING,
            _ => {
                self.started_at = None;
                DOOR_CLOSED
            }
        };

        if pattern != self.current_pattern {
            self.current_pattern = pattern;
            Some(pattern)
        } else {
            None
        }
    }
}

/// Alternates the active segment face once per distinct millisecond
/// observed, the chip-select toggle of a hardware multiplexed display.
/// One face carries the direction indicator, the other the current floor
/// digit with the dot lit while the car is between floors.
pub struct DisplayMultiplexer {
    last_observed: Option<u32>,
    active_face: DisplayFace,
}

impl DisplayMultiplexer {
    pub fn new() -> DisplayMultiplexer {
        DisplayMultiplexer {
            last_observed: None,
            active_face: DisplayFace::Level,
        }
    }

    pub fn service(&mut self, now: u32, state: &ElevatorState) -> Option<SegmentCommand> {
        if self.last_observed == Some(now) {
            return None;
        }
        self.last_observed = Some(now);

        self.active_face = match self.active_face {
            DisplayFace::Direction => DisplayFace::Level,
            DisplayFace::Level => DisplayFace::Direction,
        };

        let pattern = match self.active_face {
            DisplayFace::Direction => direction_pattern(state.direction),
            DisplayFace::Level => {
                let digit = SEG_DIGITS[state.current_floor.index() as usize];
                if state.position.is_floor_boundary() {
                    digit
                } else {
                    digit | SEG_DOT
                }
            }
        };

        Some(SegmentCommand {
            face: self.active_face,
            pattern,
        })
    }
}

fn direction_pattern(direction: Direction) -> u8 {
    match direction {
        Direction::Up => SEG_UP,
        Direction::Down => SEG_DOWN,
        Direction::Stationary => SEG_DASH,
    }
}
