/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{debug, error};
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::HardwareConfig;
use crate::elevator::animation::DOOR_CLOSED;
use crate::shared::structs::{
    MATRIX_HEIGHT, MATRIX_WIDTH, SEG_DASH, SEG_DIGITS, SEG_DOT, SEG_DOWN, SEG_UP,
};
use crate::shared::{
    AudioCommand, Button, DisplayFace, PixelCommand, Screen, SegmentCommand, SpriteKind,
    StatusReport,
};

/**
 * # Elevator front panel
 * Terminal stand-in for the emulator's IO board.
 *
 * The driver owns the terminal: it renders the LED matrix, the two
 * segment display faces, the door indicator LEDs and the status readout,
 * and turns keyboard input into the button, serial, speed-line and
 * destination-switch events the controller consumes. It communicates
 * with the controller thread over crossbeam channels only.
 *
 * # Fields
 * - `poll_period`:       Channel wait per loop iteration, in ms.
 * - `screen`:            Currently displayed screen (splash or matrix).
 * - `grid`:              Shadow copy of the LED matrix contents.
 * - `segments`:          Last pattern written to each display face.
 * - `indicators`:        Last door indicator bitmask.
 * - `status`:            Last published status readout.
 * - `speed_line`:        Level of the emulated speed input line.
 * - `switch_lines`:      Levels of the two destination switch lines.
 * - `hw_button_tx`:      Sends call button presses.
 * - `hw_serial_tx`:      Sends serial characters.
 * - `hw_speed_tx`:       Sends speed line changes.
 * - `hw_switches_tx`:    Sends destination switch changes.
 * - `hw_screen_rx`:      Receives screen switch commands.
 * - `hw_pixel_rx`:       Receives LED matrix writes.
 * - `hw_segment_rx`:     Receives segment display writes.
 * - `hw_indicator_rx`:   Receives door indicator writes.
 * - `hw_status_rx`:      Receives status readout updates.
 * - `hw_audio_rx`:       Receives buzzer commands.
 * - `terminate_tx`:      Notifies the controller when the user quits.
 */

const MATRIX_ORIGIN_X: u16 = 3;
const MATRIX_ORIGIN_Y: u16 = 2;
const PANEL_X: u16 = 26;

enum Event {
    ScreenChanged(Screen),
    PixelWritten(PixelCommand),
    SegmentWritten(SegmentCommand),
    IndicatorsWritten(u8),
    StatusPublished(StatusReport),
    BeepRequested(AudioCommand),
    NoEvent,
}

pub struct ElevatorDriver {
    stdout: Stdout,
    poll_period: u64,
    screen: Screen,
    grid: [[SpriteKind; MATRIX_WIDTH as usize]; MATRIX_HEIGHT as usize],
    segments: [u8; 2],
    indicators: u8,
    status: Option<StatusReport>,
    speed_line: bool,
    switch_lines: u8,
    hw_button_tx: cbc::Sender<Button>,
    hw_serial_tx: cbc::Sender<char>,
    hw_speed_tx: cbc::Sender<bool>,
    hw_switches_tx: cbc::Sender<u8>,
    hw_screen_rx: cbc::Receiver<Screen>,
    hw_pixel_rx: cbc::Receiver<PixelCommand>,
    hw_segment_rx: cbc::Receiver<SegmentCommand>,
    hw_indicator_rx: cbc::Receiver<u8>,
    hw_status_rx: cbc::Receiver<StatusReport>,
    hw_audio_rx: cbc::Receiver<AudioCommand>,
    terminate_tx: cbc::Sender<()>,
}

impl ElevatorDriver {
    pub fn new(
        config: &HardwareConfig,
        hw_button_tx: cbc::Sender<Button>,
        hw_serial_tx: cbc::Sender<char>,
        hw_speed_tx: cbc::Sender<bool>,
        hw_switches_tx: cbc::Sender<u8>,
        hw_screen_rx: cbc::Receiver<Screen>,
        hw_pixel_rx: cbc::Receiver<PixelCommand>,
        hw_segment_rx: cbc::Receiver<SegmentCommand>,
        hw_indicator_rx: cbc::Receiver<u8>,
        hw_status_rx: cbc::Receiver<StatusReport>,
        hw_audio_rx: cbc::Receiver<AudioCommand>,
        terminate_tx: cbc::Sender<()>,
    ) -> ElevatorDriver {
        ElevatorDriver {
            stdout: stdout(),
            poll_period: config.poll_period,
            screen: Screen::Splash,
            grid: [[SpriteKind::Empty; MATRIX_WIDTH as usize]; MATRIX_HEIGHT as usize],
            segments: [SEG_DASH, SEG_DIGITS[0]],
            indicators: DOOR_CLOSED,
            status: None,
            speed_line: false,
            switch_lines: 0,
            hw_button_tx,
            hw_serial_tx,
            hw_speed_tx,
            hw_switches_tx,
            hw_screen_rx,
            hw_pixel_rx,
            hw_segment_rx,
            hw_indicator_rx,
            hw_status_rx,
            hw_audio_rx,
            terminate_tx,
        }
    }

    pub fn run(mut self) {
        if let Err(e) = self.main_loop() {
            error!("front panel error: {}", e);
            let _ = self.terminate_tx.send(());
        }
        if let Err(e) = self.restore_terminal() {
            error!("failed to restore terminal: {}", e);
        }
    }

    fn main_loop(&mut self) -> crossterm::Result<()> {
        enable_raw_mode()?;
        execute!(self.stdout, EnterAlternateScreen, Hide)?;
        self.draw_splash()?;

        loop {
            while event::poll(Duration::from_millis(0))? {
                if let TermEvent::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if self.handle_key(key)? {
                        return Ok(());
                    }
                }
            }

            let event = self.wait_for_event();
            self.handle_event(event)?;
        }
    }

    fn wait_for_event(&self) -> Event {
        cbc::select! {
            recv(self.hw_screen_rx) -> msg => {
                msg.map(Event::ScreenChanged).unwrap_or(Event::NoEvent)
            }
            recv(self.hw_pixel_rx) -> msg => {
                msg.map(Event::PixelWritten).unwrap_or(Event::NoEvent)
            }
            recv(self.hw_segment_rx) -> msg => {
                msg.map(Event::SegmentWritten).unwrap_or(Event::NoEvent)
            }
            recv(self.hw_indicator_rx) -> msg => {
                msg.map(Event::IndicatorsWritten).unwrap_or(Event::NoEvent)
            }
            recv(self.hw_status_rx) -> msg => {
                msg.map(Event::StatusPublished).unwrap_or(Event::NoEvent)
            }
            recv(self.hw_audio_rx) -> msg => {
                msg.map(Event::BeepRequested).unwrap_or(Event::NoEvent)
            }
            default(Duration::from_millis(self.poll_period)) => Event::NoEvent,
        }
    }

    fn handle_event(&mut self, event: Event) -> crossterm::Result<()> {
        match event {
            Event::ScreenChanged(screen) => {
                self.screen = screen;
                match screen {
                    Screen::Splash => self.draw_splash()?,
                    Screen::Matrix => self.draw_matrix_frame()?,
                }
            }
            Event::PixelWritten(command) => {
                let col = command.col.min(MATRIX_WIDTH - 1) as usize;
                let row = command.row.min(MATRIX_HEIGHT - 1) as usize;
                self.grid[row][col] = command.sprite;
                if self.screen == Screen::Matrix {
                    self.draw_cell(col as u8, row as u8)?;
                    self.stdout.flush()?;
                }
            }
            Event::SegmentWritten(command) => {
                let face = match command.face {
                    DisplayFace::Direction => 0,
                    DisplayFace::Level => 1,
                };
                if self.segments[face] != command.pattern {
                    self.segments[face] = command.pattern;
                    if self.screen == Screen::Matrix {
                        self.draw_segments()?;
                        self.stdout.flush()?;
                    }
                }
            }
            Event::IndicatorsWritten(pattern) => {
                // Drawn on both screens; the splash runs the door
                // sequence as an attract effect
                self.indicators = pattern;
                self.draw_indicators()?;
                self.stdout.flush()?;
            }
            Event::StatusPublished(report) => {
                self.status = Some(report);
                if self.screen == Screen::Matrix {
                    self.draw_status()?;
                    self.stdout.flush()?;
                }
            }
            Event::BeepRequested(command) => {
                debug!(
                    "beep: {} Hz for {} ms",
                    command.frequency, command.duration
                );
                // The terminal bell has no pitch or duration control
                queue!(self.stdout, Print("\u{0007}"))?;
                self.stdout.flush()?;
            }
            Event::NoEvent => {}
        }
        Ok(())
    }

    /// Returns true when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> crossterm::Result<bool> {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            let _ = self.terminate_tx.send(());
            return Ok(true);
        }

        if let KeyCode::Char(c) = key.code {
            match c {
                '0' | '1' | '2' | '3' | 's' | 'S' => {
                    let _ = self.hw_serial_tx.send(c);
                }
                'z' => {
                    let _ = self.hw_button_tx.send(Button::Button0);
                }
                'x' => {
                    let _ = self.hw_button_tx.send(Button::Button1);
                }
                'c' => {
                    let _ = self.hw_button_tx.send(Button::Button2);
                }
                'v' => {
                    let _ = self.hw_button_tx.send(Button::Button3);
                }
                't' => {
                    self.speed_line = !self.speed_line;
                    let _ = self.hw_speed_tx.send(self.speed_line);
                    if self.screen == Screen::Matrix {
                        self.draw_input_lines()?;
                        self.stdout.flush()?;
                    }
                }
                'u' | 'i' | 'o' | 'p' => {
                    self.switch_lines = match c {
                        'u' => 0,
                        'i' => 1,
                        'o' => 2,
                        _ => 3,
                    };
                    let _ = self.hw_switches_tx.send(self.switch_lines);
                    if self.screen == Screen::Matrix {
                        self.draw_input_lines()?;
                        self.stdout.flush()?;
                    }
                }
                _ => {}
            }
        }
        Ok(false)
    }

    /***************************************/
    /*         Terminal rendering          */
    /***************************************/

    fn restore_terminal(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        Ok(())
    }

    fn draw_splash(&mut self) -> crossterm::Result<()> {
        queue!(
            self.stdout,
            Clear(ClearType::All),
            MoveTo(10, 3),
            Print("ELEVATOR EMULATOR"),
            MoveTo(10, 5),
            Print("Four floors, one passenger at a time"),
            MoveTo(10, 8),
            Print("z/x/c/v   call buttons for floors 0-3"),
            MoveTo(10, 9),
            Print("0-3       serial floor request"),
            MoveTo(10, 10),
            Print("u/i/o/p   destination switches (floor 0-3)"),
            MoveTo(10, 11),
            Print("t         toggle the speed line (fast/slow)"),
            MoveTo(10, 12),
            Print("esc       quit"),
            MoveTo(10, 15),
            Print("Press any call button or 's' to start"),
        )?;
        self.stdout.flush()?;
        Ok(())
    }

    fn draw_matrix_frame(&mut self) -> crossterm::Result<()> {
        queue!(self.stdout, Clear(ClearType::All), MoveTo(2, 0), Print("ELEVATOR EMULATOR"))?;

        // Border around the LED matrix
        let right = MATRIX_ORIGIN_X + 2 * MATRIX_WIDTH as u16;
        let bottom = MATRIX_ORIGIN_Y + MATRIX_HEIGHT as u16;
        queue!(self.stdout, MoveTo(MATRIX_ORIGIN_X - 1, MATRIX_ORIGIN_Y - 1), Print("+"))?;
        queue!(self.stdout, MoveTo(right, MATRIX_ORIGIN_Y - 1), Print("+"))?;
        queue!(self.stdout, MoveTo(MATRIX_ORIGIN_X - 1, bottom), Print("+"))?;
        queue!(self.stdout, MoveTo(right, bottom), Print("+"))?;
        for x in 0..(2 * MATRIX_WIDTH as u16) {
            queue!(self.stdout, MoveTo(MATRIX_ORIGIN_X + x, MATRIX_ORIGIN_Y - 1), Print("-"))?;
            queue!(self.stdout, MoveTo(MATRIX_ORIGIN_X + x, bottom), Print("-"))?;
        }
        for y in 0..(MATRIX_HEIGHT as u16) {
            queue!(self.stdout, MoveTo(MATRIX_ORIGIN_X - 1, MATRIX_ORIGIN_Y + y), Print("|"))?;
            queue!(self.stdout, MoveTo(right, MATRIX_ORIGIN_Y + y), Print("|"))?;
        }

        for row in 0..MATRIX_HEIGHT {
            for col in 0..MATRIX_WIDTH {
                self.draw_cell(col, row)?;
            }
        }

        self.draw_status()?;
        self.draw_indicators()?;
        self.draw_segments()?;
        self.draw_input_lines()?;

        queue!(
            self.stdout,
            MoveTo(2, MATRIX_ORIGIN_Y + MATRIX_HEIGHT as u16 + 2),
            Print("z/x/c/v buttons | 0-3 serial | u/i/o/p switches | t speed | esc quit"),
        )?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Matrix row 0 is the bottom of the shaft, terminal row 0 the top.
    fn draw_cell(&mut self, col: u8, row: u8) -> crossterm::Result<()> {
        let x = MATRIX_ORIGIN_X + 2 * col as u16;
        let y = MATRIX_ORIGIN_Y + (MATRIX_HEIGHT - 1 - row) as u16;
        let (color, glyph) = match self.grid[row as usize][col as usize] {
            SpriteKind::Empty => (Color::DarkGrey, "··"),
            SpriteKind::Floor => (Color::DarkYellow, "██"),
            SpriteKind::Elevator => (Color::Green, "██"),
            SpriteKind::Passenger(destination) => {
                let color = match destination.index() {
                    0 => Color::Red,
                    1 => Color::Blue,
                    2 => Color::Magenta,
                    _ => Color::Cyan,
                };
                (color, "██")
            }
        };
        queue!(
            self.stdout,
            MoveTo(x, y),
            SetForegroundColor(color),
            Print(glyph),
            ResetColor
        )?;
        Ok(())
    }

    fn draw_status(&mut self) -> crossterm::Result<()> {
        let (floor, direction, with, without) = match self.status {
            Some(report) => (
                report.floor.to_string(),
                report.direction.label(),
                report.floors_with_passenger.to_string(),
                report.floors_without_passenger.to_string(),
            ),
            None => ("-".to_string(), "-", "-".to_string(), "-".to_string()),
        };
        queue!(
            self.stdout,
            MoveTo(PANEL_X, 2),
            Clear(ClearType::UntilNewLine),
            Print(format!("Current Level: {}", floor)),
            MoveTo(PANEL_X, 3),
            Clear(ClearType::UntilNewLine),
            Print(format!("Direction: {}", direction)),
            MoveTo(PANEL_X, 4),
            Clear(ClearType::UntilNewLine),
            Print(format!("Floors traveled with passenger: {}", with)),
            MoveTo(PANEL_X, 5),
            Clear(ClearType::UntilNewLine),
            Print(format!("Floors traveled without passenger: {}", without)),
        )?;
        Ok(())
    }

    fn draw_indicators(&mut self) -> crossterm::Result<()> {
        let mut leds = String::from("Door LEDs: ");
        for bit in (0..4).rev() {
            leds.push(if self.indicators & (1 << bit) != 0 { '#' } else { '.' });
            leds.push(' ');
        }
        queue!(
            self.stdout,
            MoveTo(PANEL_X, 7),
            Clear(ClearType::UntilNewLine),
            Print(leds)
        )?;
        Ok(())
    }

    fn draw_segments(&mut self) -> crossterm::Result<()> {
        let direction = render_segment(self.segments[0]);
        let level = render_segment(self.segments[1]);
        queue!(
            self.stdout,
            MoveTo(PANEL_X, 8),
            Clear(ClearType::UntilNewLine),
            Print(format!("Display: [{}] [{}]", direction, level)),
        )?;
        Ok(())
    }

    fn draw_input_lines(&mut self) -> crossterm::Result<()> {
        let speed = if self.speed_line { "fast" } else { "slow" };
        queue!(
            self.stdout,
            MoveTo(PANEL_X, 10),
            Clear(ClearType::UntilNewLine),
            Print(format!(
                "Speed line: {}   Destination switches: {}",
                speed, self.switch_lines
            )),
        )?;
        Ok(())
    }
}

/// Decodes a segment pattern back into the character it renders as.
fn render_segment(pattern: u8) -> String {
    let glyph = match pattern & !SEG_DOT {
        p if p == SEG_DIGITS[0] => '0',
        p if p == SEG_DIGITS[1] => '1',
        p if p == SEG_DIGITS[2] => '2',
        p if p == SEG_DIGITS[3] => '3',
        p if p == SEG_UP => '^',
        p if p == SEG_DOWN => 'v',
        p if p == SEG_DASH => '-',
        0 => ' ',
        _ => '?',
    };
    if pattern & SEG_DOT != 0 {
        format!("{}.", glyph)
    } else {
        format!("{} ", glyph)
    }
}
