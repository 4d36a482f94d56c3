/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::cmp::Ordering;

/***************************************/
/*       Public data structures        */
/***************************************/

/// Number of position units between two adjacent floors. The LED matrix
/// dedicates one row per unit, with a floor strip on every fourth row.
pub const FLOOR_HEIGHT: u8 = 4;

/// LED matrix dimensions of the front panel.
pub const MATRIX_WIDTH: u8 = 8;
pub const MATRIX_HEIGHT: u8 = 16;

/// Segment patterns for the two-face display. Bit 7 is the decimal dot.
pub const SEG_DIGITS: [u8; 4] = [0x3F, 0x06, 0x5B, 0x4F];
pub const SEG_UP: u8 = 0x01;
pub const SEG_DOWN: u8 = 0x08;
pub const SEG_DASH: u8 = 0x40;
pub const SEG_DOT: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Floor {
    Floor0,
    Floor1,
    Floor2,
    Floor3,
}

impl Floor {
    pub fn from_index(index: u8) -> Option<Floor> {
        match index {
            0 => Some(Floor::Floor0),
            1 => Some(Floor::Floor1),
            2 => Some(Floor::Floor2),
            3 => Some(Floor::Floor3),
            _ => None,
        }
    }

    /// Decodes the two destination switch lines into a floor.
    pub fn from_switches(lines: u8) -> Floor {
        match lines & 0b11 {
            0 => Floor::Floor0,
            1 => Floor::Floor1,
            2 => Floor::Floor2,
            _ => Floor::Floor3,
        }
    }

    pub fn index(&self) -> u8 {
        match *self {
            Floor::Floor0 => 0,
            Floor::Floor1 => 1,
            Floor::Floor2 => 2,
            Floor::Floor3 => 3,
        }
    }

    pub fn position(&self) -> Position {
        Position(self.index() * FLOOR_HEIGHT)
    }
}

/// Fine-grained vertical coordinate, 4 units per floor. A floor can only
/// be derived from a position sitting on an exact floor boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position(u8);

impl Position {
    pub const BOTTOM: Position = Position(0);
    pub const TOP: Position = Position(3 * FLOOR_HEIGHT);

    pub fn units(&self) -> u8 {
        self.0
    }

    pub fn is_floor_boundary(&self) -> bool {
        self.0 % FLOOR_HEIGHT == 0
    }

    pub fn floor(&self) -> Option<Floor> {
        if self.is_floor_boundary() {
            Floor::from_index(self.0 / FLOOR_HEIGHT)
        } else {
            None
        }
    }

    pub fn up(self) -> Position {
        Position(self.0.saturating_add(1).min(Self::TOP.0))
    }

    pub fn down(self) -> Position {
        Position(self.0.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Stationary,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match *self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Stationary => "Stationary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevatorState {
    pub position: Position,
    pub destination: Floor,
    pub current_floor: Floor,
    pub direction: Direction,
    pub speed: u32,
}

impl ElevatorState {
    pub fn new(speed: u32) -> ElevatorState {
        ElevatorState {
            position: Position::BOTTOM,
            destination: Floor::Floor0,
            current_floor: Floor::Floor0,
            direction: Direction::Stationary,
            speed,
        }
    }

    /// Idle means parked on the destination floor boundary.
    pub fn is_idle(&self) -> bool {
        self.position == self.destination.position()
    }

    /// Sets a new destination and refreshes the travel direction in the
    /// same step, so `direction == Stationary` stays equivalent to
    /// `position == destination`.
    pub fn retarget(&mut self, destination: Floor) {
        self.destination = destination;
        self.update_direction();
    }

    /// Moves one unit toward the destination. Returns whether the car
    /// actually moved.
    pub fn step_toward_destination(&mut self) -> bool {
        match self.destination.position().cmp(&self.position) {
            Ordering::Greater => {
                self.position = self.position.up();
                true
            }
            Ordering::Less => {
                self.position = self.position.down();
                true
            }
            Ordering::Equal => false,
        }
    }

    pub fn update_direction(&mut self) {
        self.direction = match self.destination.position().cmp(&self.position) {
            Ordering::Greater => Direction::Up,
            Ordering::Less => Direction::Down,
            Ordering::Equal => Direction::Stationary,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelCounters {
    pub floors_with_passenger: u32,
    pub floors_without_passenger: u32,
}

impl TravelCounters {
    pub fn new() -> TravelCounters {
        TravelCounters {
            floors_with_passenger: 0,
            floors_without_passenger: 0,
        }
    }
}

/***************************************/
/*       Channel message types         */
/***************************************/

/// Call buttons on the front panel, one per floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Button0,
    Button1,
    Button2,
    Button3,
}

impl Button {
    pub fn floor(&self) -> Floor {
        match *self {
            Button::Button0 => Floor::Floor0,
            Button::Button1 => Floor::Floor1,
            Button::Button2 => Floor::Floor2,
            Button::Button3 => Floor::Floor3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Empty,
    Floor,
    Elevator,
    Passenger(Floor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCommand {
    pub col: u8,
    pub row: u8,
    pub sprite: SpriteKind,
}

/// The two multiplexed faces of the segment display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFace {
    Direction,
    Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentCommand {
    pub face: DisplayFace,
    pub pattern: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioCommand {
    pub frequency: u16,
    pub duration: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Matrix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub floor: u8,
    pub direction: Direction,
    pub floors_with_passenger: u32,
    pub floors_without_passenger: u32,
}
