//! Planner configuration from environment.

use relief_core::FleetParams;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    /// Fleet defaults used when neither the scenario nor the command line
    /// override a parameter.
    pub fleet: FleetParams,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = FleetParams::default();
        Self {
            fleet: FleetParams {
                speed: parse_or(lookup("RELIEF_SPEED"), defaults.speed),
                takeoff_time_s: parse_or(lookup("RELIEF_TAKEOFF_S"), defaults.takeoff_time_s),
                landing_time_s: parse_or(lookup("RELIEF_LANDING_S"), defaults.landing_time_s),
                max_flight_time_s: parse_or(
                    lookup("RELIEF_MAX_FLIGHT_S"),
                    defaults.max_flight_time_s,
                ),
                capacity: parse_or(lookup("RELIEF_CAPACITY"), defaults.capacity),
                vehicle_count: parse_or(lookup("RELIEF_VEHICLES"), defaults.vehicle_count),
            },
            log_json: lookup("RELIEF_LOG_JSON")
                .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
