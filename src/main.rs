/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::info;
use std::thread::Builder;

/* Custom libraries */
use elevator::ElevatorDriver;
use elevator::ElevatorFSM;
use shared::{
    AudioCommand, Button, PixelCommand, Screen, SegmentCommand, StatusReport,
};

/* Modules */
mod config;
mod elevator;
mod shared;

/* Main */
fn main() {
    env_logger::init();

    let matches = Command::new("elevator-emulator")
        .about("Four-floor elevator emulator with a terminal front panel")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the configuration file"),
        )
        .get_matches();
    let config_path = matches.value_of("config").unwrap_or("config.toml");

    // Load the configuration
    let config = unwrap_or_exit!(config::load_config(config_path));

    // Input channels
    let (hw_button_tx, hw_button_rx) = cbc::unbounded::<Button>();
    let (hw_serial_tx, hw_serial_rx) = cbc::unbounded::<char>();
    let (hw_speed_tx, hw_speed_rx) = cbc::unbounded::<bool>();
    let (hw_switches_tx, hw_switches_rx) = cbc::unbounded::<u8>();

    // Output channels
    let (hw_screen_tx, hw_screen_rx) = cbc::unbounded::<Screen>();
    let (hw_pixel_tx, hw_pixel_rx) = cbc::unbounded::<PixelCommand>();
    let (hw_segment_tx, hw_segment_rx) = cbc::unbounded::<SegmentCommand>();
    let (hw_indicator_tx, hw_indicator_rx) = cbc::unbounded::<u8>();
    let (hw_status_tx, hw_status_rx) = cbc::unbounded::<StatusReport>();
    let (hw_audio_tx, hw_audio_rx) = cbc::unbounded::<AudioCommand>();

    // Control channels
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Start the front panel
    let driver = ElevatorDriver::new(
        &config.hardware,
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
    );

    let driver_thread = Builder::new().name("front_panel".into());
    let driver_handle = unwrap_or_exit!(driver_thread.spawn(move || driver.run()));

    // Run the controller on the main thread
    let controller = ElevatorFSM::new(
        &config.elevator,
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
    );
    controller.run();

    // Let the front panel restore the terminal before exiting
    let _ = driver_handle.join();
    info!("elevator-emulator exited");
}
