/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ElevatorState, StatusReport, TravelCounters};

/// Renders the status readout only when some state mutation marked it
/// dirty, never on unchanged loop iterations.
pub struct StatusReporter {
    dirty: bool,
}

impl StatusReporter {
    pub fn new() -> StatusReporter {
        StatusReporter { dirty: true }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn service(
        &mut self,
        state: &ElevatorState,
        counters: &TravelCounters,
        status_tx: &cbc::Sender<StatusReport>,
    ) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;

        let _ = status_tx.send(StatusReport {
            floor: state.current_floor.index(),
            direction: state.direction,
            floors_with_passenger: counters.floors_with_passenger,
            floors_without_passenger: counters.floors_without_passenger,
        });
        true
    }
}
