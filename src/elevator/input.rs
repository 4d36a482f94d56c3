/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Button, Floor};

/***************************************/
/*             Public API              */
/***************************************/

/// Merges one optional button press and one optional serial character per
/// loop iteration into a floor-selection intent, and latches the two
/// destination switch lines.
pub struct InputRouter {
    switch_lines: u8,
}

impl InputRouter {
    pub fn new() -> InputRouter {
        InputRouter { switch_lines: 0 }
    }

    pub fn set_switch_lines(&mut self, lines: u8) {
        self.switch_lines = lines & 0b11;
    }

    /// The requested destination, read at the moment a pickup request is
    /// formed.
    pub fn destination_intent(&self) -> Floor {
        Floor::from_switches(self.switch_lines)
    }

    /// The button branch is checked first; a serial character is only
    /// considered when no button fired this iteration. Characters other
    /// than '0'..'3' are ignored.
    pub fn route(&self, button: Option<Button>, serial: Option<char>) -> Option<Floor> {
        if let Some(button) = button {
            return Some(button.floor());
        }

        match serial {
            Some('0') => Some(Floor::Floor0),
            Some('1') => Some(Floor::Floor1),
            Some('2') => Some(Floor::Floor2),
            Some('3') => Some(Floor::Floor3),
            _ => None,
        }
    }
}
