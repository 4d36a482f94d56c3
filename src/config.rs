/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::error::Error;
use std::fs;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone)]
pub struct Config {
    pub elevator: ElevatorConfig,
    pub hardware: HardwareConfig,
}

#[derive(Deserialize, Clone)]
pub struct ElevatorConfig {
    pub default_speed_time: u32,
    pub fast_speed_time: u32,
    pub slow_speed_time: u32,
    pub door_phase_time: u32,
    pub loop_sleep_time: u64,
}

#[derive(Deserialize, Clone)]
pub struct HardwareConfig {
    pub poll_period: u64,
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &str) -> Result<Config, Box<dyn Error>> {
    let config_str = fs::read_to_string(path)?;
    let config = toml::from_str(&config_str)?;
    Ok(config)
}
