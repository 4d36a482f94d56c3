/*
 * Unit tests for the input router
 *
 * The unit tests follow the Arrange, Act, Assert pattern.
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod input_tests {
    use crate::elevator::input::InputRouter;
    use crate::shared::{Button, Floor};

    #[test]
    fn test_button_takes_precedence_over_serial() {
        // Arrange
        let router = InputRouter::new();

        // Act
        let intent = router.route(Some(Button::Button1), Some('3'));

        // Assert
        assert_eq!(intent, Some(Floor::Floor1));
    }

    #[test]
    fn test_serial_used_when_no_button_fired() {
        // Arrange
        let router = InputRouter::new();

        // Act + Assert
        assert_eq!(router.route(None, Some('2')), Some(Floor::Floor2));
        assert_eq!(router.route(None, None), None);
    }

    #[test]
    fn test_out_of_range_serial_characters_ignored() {
        // Arrange
        let router = InputRouter::new();

        // Act + Assert
        assert_eq!(router.route(None, Some('9')), None);
        assert_eq!(router.route(None, Some('s')), None);
        assert_eq!(router.route(None, Some('x')), None);
    }

    #[test]
    fn test_switch_lines_decode_to_destination() {
        // Arrange
        let mut router = InputRouter::new();

        // Assert: both lines low by default
        assert_eq!(router.destination_intent(), Floor::Floor0);

        // Act + Assert
        router.set_switch_lines(2);
        assert_eq!(router.destination_intent(), Floor::Floor2);

        // Only the two switch lines are read
        router.set_switch_lines(0b111);
        assert_eq!(router.destination_intent(), Floor::Floor3);
    }
}
