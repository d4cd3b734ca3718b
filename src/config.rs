//! Application configuration loaded from environment variables.

use std::env;

use crate::models::Coordinates;
use crate::services::DEFAULT_ZOOM_LEVEL;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// File backing the workout store
    pub data_path: String,
    /// Map zoom used when loading the map and focusing a workout
    pub map_zoom_level: u8,
    /// Position used as the geolocation result at startup
    pub home_location: Option<Coordinates>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_path: "data/workouts.json".to_string(),
            map_zoom_level: DEFAULT_ZOOM_LEVEL,
            home_location: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let home_location = match (env::var("HOME_LATITUDE"), env::var("HOME_LONGITUDE")) {
            (Ok(lat), Ok(lng)) => Some(Coordinates::new(
                parse_var("HOME_LATITUDE", &lat)?,
                parse_var("HOME_LONGITUDE", &lng)?,
            )),
            (Err(_), Err(_)) => None,
            (Ok(_), Err(_)) => return Err(ConfigError::Missing("HOME_LONGITUDE")),
            (Err(_), Ok(_)) => return Err(ConfigError::Missing("HOME_LATITUDE")),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_path: env::var("TRACKER_DATA_PATH")
                .unwrap_or_else(|_| "data/workouts.json".to_string()),
            map_zoom_level: match env::var("MAP_ZOOM_LEVEL") {
                Ok(v) => parse_var("MAP_ZOOM_LEVEL", &v)?,
                Err(_) => DEFAULT_ZOOM_LEVEL,
            },
            home_location,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("HOME_LATITUDE", "51.5");
        env::set_var("HOME_LONGITUDE", "-0.12");
        env::set_var("MAP_ZOOM_LEVEL", "15");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.home_location, Some(Coordinates::new(51.5, -0.12)));
        assert_eq!(config.map_zoom_level, 15);
        assert_eq!(config.port, 8080);

        env::remove_var("HOME_LATITUDE");
        env::remove_var("HOME_LONGITUDE");
        env::remove_var("MAP_ZOOM_LEVEL");
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        let err = parse_var::<u8>("MAP_ZOOM_LEVEL", "very").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "MAP_ZOOM_LEVEL", .. }));
    }
}
