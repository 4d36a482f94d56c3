pub mod macros;
pub mod structs;

pub use structs::AudioCommand;
pub use structs::Button;
pub use structs::Direction;
pub use structs::DisplayFace;
pub use structs::ElevatorState;
pub use structs::Floor;
pub use structs::PixelCommand;
pub use structs::Position;
pub use structs::Screen;
pub use structs::SegmentCommand;
pub use structs::SpriteKind;
pub use structs::StatusReport;
pub use structs::TravelCounters;
