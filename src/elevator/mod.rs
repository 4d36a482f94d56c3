pub mod animation;
pub mod fsm;
pub mod hardware;
pub mod input;
pub mod passenger;
pub mod reporter;

pub mod animation_tests;
pub mod input_tests;
pub mod passenger_tests;

pub use fsm::ElevatorFSM;
pub use hardware::ElevatorDriver;
