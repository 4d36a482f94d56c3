/*
 * Unit tests for the door animation and display multiplexer
 *
 * The unit tests follow the Arrange, Act, Assert pattern. Both timers
 * are pure functions of the clock values passed in.
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod animation_tests {
    use crate::elevator::animation::{
        DisplayMultiplexer, DoorAnimation, DOOR_CLOSED, DOOR_CLOSING, DOOR_OPEN,
    };
    use crate::shared::structs::{SEG_DASH, SEG_DIGITS, SEG_DOT, SEG_DOWN, SEG_UP};
    use crate::shared::{DisplayFace, ElevatorState, Floor};

    #[test]
    fn test_door_animation_starts_disarmed_and_closed() {
        // Arrange
        let mut animation = DoorAnimation::new(400);

        // Assert
        assert!(!animation.is_armed());
        assert_eq!(animation.pattern(), DOOR_CLOSED);
        assert_eq!(animation.service(1000), None);
    }

    #[test]
    fn test_door_animation_phase_sequence() {
        // Arrange
        let mut animation = DoorAnimation::new(400);

        // Act
        animation.arm(1000);

        // Assert: closed for [t0, t0+400), open for [t0+400, t0+800),
        // closing for [t0+800, t0+1200), closed and disarmed after
        assert_eq!(animation.service(1000), None);
        assert_eq!(animation.pattern(), DOOR_CLOSED);
        assert_eq!(animation.service(1399), None);
        assert_eq!(animation.service(1400), Some(DOOR_OPEN));
        assert_eq!(animation.service(1799), None);
        assert_eq!(animation.service(1800), Some(DOOR_CLOSING));
        assert_eq!(animation.service(2199), None);
        assert_eq!(animation.service(2200), Some(DOOR_CLOSED));
        assert!(!animation.is_armed());
        assert_eq!(animation.service(2300), None);
    }

    #[test]
    fn test_door_animation_rearm_restarts_sequence() {
        // Arrange
        let mut animation = DoorAnimation::new(400);
        animation.arm(0);
        assert_eq!(animation.service(400), Some(DOOR_OPEN));

        // Act: re-arming overwrites the start time
        animation.arm(500);

        // Assert
        assert_eq!(animation.service(500), Some(DOOR_CLOSED));
        assert_eq!(animation.service(900), Some(DOOR_OPEN));
        assert!(animation.is_armed());
    }

    #[test]
    fn test_multiplexer_alternates_once_per_millisecond() {
        // Arrange
        let mut multiplexer = DisplayMultiplexer::new();
        let state = ElevatorState::new(200);

        // Act + Assert: a new millisecond toggles the face, the same
        // millisecond does not
        let first = multiplexer.service(0, &state).unwrap();
        assert_eq!(first.face, DisplayFace::Direction);
        assert_eq!(multiplexer.service(0, &state), None);
        let second = multiplexer.service(1, &state).unwrap();
        assert_eq!(second.face, DisplayFace::Level);
        let third = multiplexer.service(2, &state).unwrap();
        assert_eq!(third.face, DisplayFace::Direction);
    }

    #[test]
    fn test_multiplexer_level_face_shows_floor_digit() {
        // Arrange
        let mut multiplexer = DisplayMultiplexer::new();
        let state = ElevatorState::new(200);

        // Act: second service lands on the level face
        multiplexer.service(0, &state);
        let command = multiplexer.service(1, &state).unwrap();

        // Assert: parked on a boundary, digit without the dot
        assert_eq!(command.pattern, SEG_DIGITS[0]);
    }

    #[test]
    fn test_multiplexer_dot_lit_between_floors() {
        // Arrange: one step up from floor 0
        let mut multiplexer = DisplayMultiplexer::new();
        let mut state = ElevatorState::new(200);
        state.retarget(Floor::Floor1);
        state.step_toward_destination();

        // Act
        multiplexer.service(0, &state);
        let command = multiplexer.service(1, &state).unwrap();

        // Assert: still reporting floor 0, with the dot lit
        assert_eq!(command.pattern, SEG_DIGITS[0] | SEG_DOT);
    }

    #[test]
    fn test_multiplexer_direction_patterns() {
        // Arrange
        let mut multiplexer = DisplayMultiplexer::new();
        let mut state = ElevatorState::new(200);

        // Act + Assert: stationary shows the dash
        let command = multiplexer.service(0, &state).unwrap();
        assert_eq!(command.face, DisplayFace::Direction);
        assert_eq!(command.pattern, SEG_DASH);

        // Act + Assert: heading up
        state.retarget(Floor::Floor3);
        multiplexer.service(1, &state);
        let command = multiplexer.service(2, &state).unwrap();
        assert_eq!(command.pattern, SEG_UP);

        // Act + Assert: heading down from the top
        while state.step_toward_destination() {}
        state.retarget(Floor::Floor0);
        multiplexer.service(3, &state);
        let command = multiplexer.service(4, &state).unwrap();
        assert_eq!(command.pattern, SEG_DOWN);
    }
}
