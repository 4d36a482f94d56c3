/*
 * Unit tests for the passenger lifecycle manager
 *
 * The unit tests follow the Arrange, Act, Assert pattern.
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod passenger_tests {
    use crate::elevator::passenger::{PassengerManager, RequestOutcome, Transition};
    use crate::shared::Floor;

    #[test]
    fn test_request_accepted_when_slot_free_and_idle() {
        // Arrange
        let mut manager = PassengerManager::new();

        // Act
        let outcome = manager.request_pickup(Floor::Floor1, Floor::Floor3, true);

        // Assert
        assert_eq!(outcome, RequestOutcome::Accepted);
        assert!(manager.is_waiting());
        assert!(!manager.is_onboard());
    }

    #[test]
    fn test_request_rejected_when_slot_occupied() {
        // Arrange
        let mut manager = PassengerManager::new();
        manager.request_pickup(Floor::Floor1, Floor::Floor3, true);

        // Act
        let outcome = manager.request_pickup(Floor::Floor2, Floor::Floor0, true);

        // Assert
        assert_eq!(outcome, RequestOutcome::Rejected);
    }

    #[test]
    fn test_request_rejected_when_origin_equals_destination() {
        // Arrange
        let mut manager = PassengerManager::new();

        // Act
        let outcome = manager.request_pickup(Floor::Floor1, Floor::Floor1, true);

        // Assert
        assert_eq!(outcome, RequestOutcome::Rejected);
        assert!(!manager.is_active());
    }

    #[test]
    fn test_request_rejected_when_elevator_not_idle() {
        // Arrange
        let mut manager = PassengerManager::new();

        // Act
        let outcome = manager.request_pickup(Floor::Floor1, Floor::Floor3, false);

        // Assert
        assert_eq!(outcome, RequestOutcome::Rejected);
        assert!(!manager.is_active());
    }

    #[test]
    fn test_pickup_and_dropoff_transitions() {
        // Arrange: passenger waiting at floor 2, going down to floor 0
        let mut manager = PassengerManager::new();
        manager.request_pickup(Floor::Floor2, Floor::Floor0, true);

        // Act + Assert: passing floor 1 does nothing
        assert_eq!(manager.on_boundary_crossed(Floor::Floor1), None);
        assert!(manager.is_waiting());

        // Act + Assert: reaching the origin boards the passenger
        assert_eq!(
            manager.on_boundary_crossed(Floor::Floor2),
            Some(Transition::PickedUp {
                destination: Floor::Floor0
            })
        );
        assert!(manager.is_onboard());

        // Act + Assert: crossing the origin again while onboard is a no-op
        assert_eq!(manager.on_boundary_crossed(Floor::Floor2), None);

        // Act + Assert: reaching the destination frees the slot
        assert_eq!(
            manager.on_boundary_crossed(Floor::Floor0),
            Some(Transition::DroppedOff)
        );
        assert!(!manager.is_active());
        assert_eq!(manager.on_boundary_crossed(Floor::Floor0), None);
    }
}
