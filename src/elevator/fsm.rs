/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use std::time::{Duration, Instant};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorConfig;
use crate::elevator::animation::{DisplayMultiplexer, DoorAnimation};
use crate::elevator::input::InputRouter;
use crate::elevator::passenger::{PassengerManager, RequestOutcome, Transition};
use crate::elevator::reporter::StatusReporter;
use crate::shared::structs::{FLOOR_HEIGHT, MATRIX_WIDTH};
use crate::shared::{
    AudioCommand, Button, ElevatorState, Floor, PixelCommand, Position, Screen, SegmentCommand,
    SpriteKind, StatusReport, TravelCounters,
};

/**
 * Runs the elevator emulation logic.
 *
 * The `ElevatorFSM` owns the polling loop: it advances the car one
 * position unit at a time when the movement interval elapses, runs the
 * passenger lifecycle hooks on every floor-boundary crossing, services
 * the door-indicator and segment-display animations off the same clock,
 * and routes button/serial/switch input into pickup requests. It talks
 * to the hardware frontend thread exclusively through channels.
 *
 * # Fields
 * - `hw_button_rx`:      Receives call button presses.
 * - `hw_serial_rx`:      Receives single serial characters.
 * - `hw_speed_rx`:       Receives speed line level changes (fast/slow).
 * - `hw_switches_rx`:    Receives destination switch line changes.
 * - `hw_screen_tx`:      Selects the frontend screen (splash/matrix).
 * - `hw_pixel_tx`:       Writes LED matrix pixels.
 * - `hw_segment_tx`:     Writes segment display faces.
 * - `hw_indicator_tx`:   Writes the door indicator LED bitmask.
 * - `hw_status_tx`:      Publishes the status readout.
 * - `hw_audio_tx`:       Sounds the buzzer.
 * - `terminate_rx`:      Stops the loop.
 * - `state`:             Position, destination, direction and speed.
 * - `counters`:          Floors traveled with/without a passenger.
 * - `passenger`:         The single waiting/traveling passenger slot.
 * - `door_animation`:    Four-phase door indicator sequence.
 * - `multiplexer`:       Segment display face alternation.
 * - `reporter`:          Dirty-flag gated status rendering.
 * - `router`:            Button/serial merge and switch latch.
 */

const ELEVATOR_COLS: [u8; 2] = [1, 2];
const ELEVATOR_SPRITE_HEIGHT: u8 = 3;
const PASSENGER_MARKER_COL: u8 = 5;

pub struct ElevatorFSM {
    // Hardware channels
    hw_button_rx: cbc::Receiver<Button>,
    hw_serial_rx: cbc::Receiver<char>,
    hw_speed_rx: cbc::Receiver<bool>,
    hw_switches_rx: cbc::Receiver<u8>,
    hw_screen_tx: cbc::Sender<Screen>,
    hw_pixel_tx: cbc::Sender<PixelCommand>,
    hw_segment_tx: cbc::Sender<SegmentCommand>,
    hw_indicator_tx: cbc::Sender<u8>,
    hw_status_tx: cbc::Sender<StatusReport>,
    hw_audio_tx: cbc::Sender<AudioCommand>,
    terminate_rx: cbc::Receiver<()>,

    // Private fields
    state: ElevatorState,
    counters: TravelCounters,
    passenger: PassengerManager,
    door_animation: DoorAnimation,
    multiplexer: DisplayMultiplexer,
    reporter: StatusReporter,
    router: InputRouter,
    last_move_time: u32,
    last_drawn_position: Option<Position>,
    fast_speed_time: u32,
    slow_speed_time: u32,
    loop_sleep_time: u64,
}

impl ElevatorFSM {
    pub fn new(
        config: &ElevatorConfig,
        hw_button_rx: cbc::Receiver<Button>,
        hw_serial_rx: cbc::Receiver<char>,
        hw_speed_rx: cbc::Receiver<bool>,
        hw_switches_rx: cbc::Receiver<u8>,
        hw_screen_tx: cbc::Sender<Screen>,
        hw_pixel_tx: cbc::Sender<PixelCommand>,
        hw_segment_tx: cbc::Sender<SegmentCommand>,
        hw_indicator_tx: cbc::Sender<u8>,
        hw_status_tx: cbc::Sender<StatusReport>,
        hw_audio_tx: cbc::Sender<AudioCommand>,
        terminate_rx: cbc::Receiver<()>,
    ) -> ElevatorFSM {
        ElevatorFSM {
            hw_button_rx,
            hw_serial_rx,
            hw_speed_rx,
            hw_switches_rx,
            hw_screen_tx,
            hw_pixel_tx,
            hw_segment_tx,
            hw_indicator_tx,
            hw_status_tx,
            hw_audio_tx,
            terminate_rx,
            state: ElevatorState::new(config.default_speed_time),
            counters: TravelCounters::new(),
            passenger: PassengerManager::new(),
            door_animation: DoorAnimation::new(config.door_phase_time),
            multiplexer: DisplayMultiplexer::new(),
            reporter: StatusReporter::new(),
            router: InputRouter::new(),
            last_move_time: 0,
            last_drawn_position: None,
            fast_speed_time: config.fast_speed_time,
            slow_speed_time: config.slow_speed_time,
            loop_sleep_time: config.loop_sleep_time,
        }
    }

    pub fn run(mut self) {
        let epoch = Instant::now();

        if !self.run_start_screen(&epoch) {
            return;
        }

        // Switch the frontend to the matrix screen and draw the scene
        let _ = self.hw_screen_tx.send(Screen::Matrix);
        self.draw_floors();
        self.draw_elevator();
        self.reporter.mark_dirty();
        self.last_move_time = now_ms(&epoch);

        info!("elevator emulation started");

        // Main loop
        loop {
            let now = now_ms(&epoch);

            if self.terminate_rx.try_recv().is_ok() {
                info!("elevator emulation stopped");
                break;
            }

            // Fixed iteration order: display multiplex, door animation,
            // movement tick, input handling, status report
            if let Some(command) = self.multiplexer.service(now, &self.state) {
                let _ = self.hw_segment_tx.send(command);
            }
            if let Some(pattern) = self.door_animation.service(now) {
                let _ = self.hw_indicator_tx.send(pattern);
            }
            self.tick(now);
            self.handle_inputs();
            self.reporter
                .service(&self.state, &self.counters, &self.hw_status_tx);

            std::thread::sleep(Duration::from_millis(self.loop_sleep_time));
        }
    }

    /// Waits on the splash screen until a call button or an 's' serial
    /// character arrives, looping the door sequence on the indicator
    /// LEDs meanwhile. Returns false when terminated instead.
    fn run_start_screen(&mut self, epoch: &Instant) -> bool {
        self.door_animation.arm(now_ms(epoch));

        loop {
            let now = now_ms(epoch);

            if self.terminate_rx.try_recv().is_ok() {
                return false;
            }

            if !self.door_animation.is_armed() {
                self.door_animation.arm(now);
            }
            if let Some(pattern) = self.door_animation.service(now) {
                let _ = self.hw_indicator_tx.send(pattern);
            }

            if self.hw_button_rx.try_recv().is_ok() {
                break;
            }
            if let Ok(c) = self.hw_serial_rx.try_recv() {
                if c == 's' || c == 'S' {
                    break;
                }
            }

            std::thread::sleep(Duration::from_millis(self.loop_sleep_time));
        }

        // Discard input that queued up while the splash screen was shown
        while self.hw_button_rx.try_recv().is_ok() {}
        while self.hw_serial_rx.try_recv().is_ok() {}
        true
    }

    /// Movement tick. The interval check fires every `speed` ms whether
    /// or not the car moves; `last_move_time` is reset on every firing so
    /// an idle stretch never causes catch-up steps.
    pub fn tick(&mut self, now: u32) {
        if now.wrapping_sub(self.last_move_time) <= self.state.speed {
            return;
        }
        self.last_move_time = now;

        let moved = self.state.step_toward_destination();
        if moved {
            self.draw_elevator();
            if let Some(floor) = self.state.position.floor() {
                self.state.current_floor = floor;
                self.handle_boundary_crossing(floor, now);
            }
        }

        let previous_direction = self.state.direction;
        self.state.update_direction();
        if moved || self.state.direction != previous_direction {
            self.reporter.mark_dirty();
        }
    }

    /// Lifecycle hook runs first; the crossing is then counted against
    /// the slot's phase as it stands after the hook.
    fn handle_boundary_crossing(&mut self, floor: Floor, now: u32) {
        match self.passenger.on_boundary_crossed(floor) {
            Some(Transition::PickedUp { destination }) => {
                self.state.retarget(destination);
                self.clear_passenger_marker(floor);
                self.door_animation.arm(now);
                let _ = self.hw_audio_tx.send(AudioCommand {
                    frequency: 1320,
                    duration: 120,
                });
                info!(
                    "passenger picked up at floor {}, heading to floor {}",
                    floor.index(),
                    destination.index()
                );
            }
            Some(Transition::DroppedOff) => {
                self.door_animation.arm(now);
                let _ = self.hw_audio_tx.send(AudioCommand {
                    frequency: 660,
                    duration: 120,
                });
                info!("passenger dropped off at floor {}", floor.index());
            }
            None => {}
        }

        if self.passenger.is_onboard() {
            self.counters.floors_with_passenger += 1;
        } else {
            self.counters.floors_without_passenger += 1;
        }
    }

    /// Drains the input channels for this iteration. The speed line is
    /// re-read every iteration, decoupled from movement.
    pub fn handle_inputs(&mut self) {
        while let Ok(fast) = self.hw_speed_rx.try_recv() {
            self.state.speed = if fast {
                self.fast_speed_time
            } else {
                self.slow_speed_time
            };
        }
        while let Ok(lines) = self.hw_switches_rx.try_recv() {
            self.router.set_switch_lines(lines);
        }

        let button = self.hw_button_rx.try_recv().ok();
        let serial = self.hw_serial_rx.try_recv().ok();
        if let Some(origin) = self.router.route(button, serial) {
            let destination = self.router.destination_intent();
            self.request_pickup(origin, destination);
        }
    }

    pub fn request_pickup(&mut self, origin: Floor, destination: Floor) {
        match self
            .passenger
            .request_pickup(origin, destination, self.state.is_idle())
        {
            RequestOutcome::Accepted => {
                self.state.retarget(origin);
                self.draw_passenger_marker(origin, destination);
                let _ = self.hw_audio_tx.send(AudioCommand {
                    frequency: 880,
                    duration: 60,
                });
                self.reporter.mark_dirty();
                debug!(
                    "pickup request accepted: origin {} destination {}",
                    origin.index(),
                    destination.index()
                );
            }
            RequestOutcome::Rejected => {
                debug!(
                    "pickup request rejected: origin {} destination {}",
                    origin.index(),
                    destination.index()
                );
            }
        }
    }

    /***************************************/
    /*           Matrix drawing            */
    /***************************************/

    fn draw_floors(&mut self) {
        for col in 0..MATRIX_WIDTH {
            for floor_index in 0..4 {
                self.set_pixel(col, floor_index * FLOOR_HEIGHT, SpriteKind::Floor);
            }
        }
    }

    /// Redraws the car sprite at the current position, clearing the one
    /// row it vacated. The previously drawn position is an explicit field
    /// rather than hidden function-local state.
    fn draw_elevator(&mut self) {
        let position = self.state.position;

        if let Some(old) = self.last_drawn_position {
            let vacated = if old > position {
                Some(old.units() + ELEVATOR_SPRITE_HEIGHT)
            } else if old < position {
                Some(old.units() + 1)
            } else {
                None
            };
            if let Some(row) = vacated {
                // Floor strips are never painted over
                if row % FLOOR_HEIGHT != 0 {
                    for col in ELEVATOR_COLS {
                        self.set_pixel(col, row, SpriteKind::Empty);
                    }
                }
            }
        }
        self.last_drawn_position = Some(position);

        for i in 1..=ELEVATOR_SPRITE_HEIGHT {
            let row = position.units() + i;
            if row % FLOOR_HEIGHT != 0 {
                for col in ELEVATOR_COLS {
                    self.set_pixel(col, row, SpriteKind::Elevator);
                }
            }
        }
    }

    fn draw_passenger_marker(&mut self, origin: Floor, destination: Floor) {
        self.set_pixel(
            PASSENGER_MARKER_COL,
            origin.position().units() + 1,
            SpriteKind::Passenger(destination),
        );
    }

    fn clear_passenger_marker(&mut self, origin: Floor) {
        self.set_pixel(
            PASSENGER_MARKER_COL,
            origin.position().units() + 1,
            SpriteKind::Empty,
        );
    }

    fn set_pixel(&mut self, col: u8, row: u8, sprite: SpriteKind) {
        let _ = self.hw_pixel_tx.send(PixelCommand { col, row, sprite });
    }
}

fn now_ms(epoch: &Instant) -> u32 {
    epoch.elapsed().as_millis() as u32
}

/***************************************/
/*           Test accessors            */
/***************************************/
#[cfg(test)]
impl ElevatorFSM {
    pub fn test_state(&self) -> &ElevatorState {
        &self.state
    }

    pub fn test_counters(&self) -> &TravelCounters {
        &self.counters
    }

    pub fn test_passenger(&self) -> &PassengerManager {
        &self.passenger
    }

    pub fn test_service_reporter(&mut self) -> bool {
        let status_tx = self.hw_status_tx.clone();
        self.reporter
            .service(&self.state, &self.counters, &status_tx)
    }
}
