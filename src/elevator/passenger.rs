/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::Floor;

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    PickedUp { destination: Floor },
    DroppedOff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Onboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Passenger {
    origin: Floor,
    destination: Floor,
    phase: Phase,
}

/***************************************/
/*             Public API              */
/***************************************/

/// Tracks the single waiting/traveling passenger slot. The slot holds at
/// most one passenger at a time; waiting and onboard are mutually
/// exclusive phases of the same slot.
pub struct PassengerManager {
    slot: Option<Passenger>,
}

impl PassengerManager {
    pub fn new() -> PassengerManager {
        PassengerManager { slot: None }
    }

    /// Accepts a new pickup request only when the slot is free, the trip
    /// is non-trivial and the elevator is idle. Invalid requests are
    /// no-ops, reported through the returned outcome.
    pub fn request_pickup(
        &mut self,
        origin: Floor,
        destination: Floor,
        elevator_idle: bool,
    ) -> RequestOutcome {
        if self.slot.is_some() || origin == destination || !elevator_idle {
            return RequestOutcome::Rejected;
        }

        self.slot = Some(Passenger {
            origin,
            destination,
            phase: Phase::Waiting,
        });
        RequestOutcome::Accepted
    }

    /// Boundary-crossing hook. At most one transition fires per crossing:
    /// a waiting passenger boards at their origin floor, an onboard
    /// passenger leaves (freeing the slot) at their destination floor.
    pub fn on_boundary_crossed(&mut self, floor: Floor) -> Option<Transition> {
        match self.slot.as_mut() {
            Some(passenger) if passenger.phase == Phase::Waiting && passenger.origin == floor => {
                passenger.phase = Phase::Onboard;
                Some(Transition::PickedUp {
                    destination: passenger.destination,
                })
            }
            Some(passenger)
                if passenger.phase == Phase::Onboard && passenger.destination == floor =>
            {
                self.slot = None;
                Some(Transition::DroppedOff)
            }
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.slot.is_some()
    }

    pub fn is_waiting(&self) -> bool {
        matches!(
            self.slot,
            Some(Passenger {
                phase: Phase::Waiting,
                ..
            })
        )
    }

    pub fn is_onboard(&self) -> bool {
        matches!(
            self.slot,
            Some(Passenger {
                phase: Phase::Onboard,
                ..
            })
        )
    }
}
