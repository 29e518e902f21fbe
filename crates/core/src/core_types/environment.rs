//! Per-step environment parameters
//!
//! Weather and ignition settings are not stored in the grid. The driver passes
//! a fresh [`Environment`] to every `step()` call.
//!
//! # Units
//!
//! - `humidity` is relative humidity in **percent** (0-100). Callers holding a
//!   fraction should use [`Environment::with_humidity_fraction`].
//! - `wind` is a velocity vector whose components are `speed·cos(θ)` and
//!   `speed·sin(θ)`. It is deliberately not normalized: stronger wind skews
//!   ignition pressure further.
//! - `temperature` is in °C; 20 °C is neutral.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Wind velocity in grid space (x to the right, y downward)
pub type Wind = Vector2<f64>;

/// Default ignition probability coefficient per burning neighbor.
pub const DEFAULT_IGNITION_PROBABILITY: f64 = 0.2;

/// Default relative humidity (%).
pub const DEFAULT_HUMIDITY: f64 = 40.0;

/// Temperature at which the temperature factor is exactly 1 (°C).
pub const REFERENCE_TEMPERATURE: f64 = 20.0;

/// Environment parameters for one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Ignition probability coefficient in [0, 1]
    pub ignition_probability: f64,
    /// Relative humidity (%), 0-100
    pub humidity: f64,
    /// Wind vector, speed-scaled
    pub wind: Wind,
    /// Air temperature (°C)
    pub temperature: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            ignition_probability: DEFAULT_IGNITION_PROBABILITY,
            humidity: DEFAULT_HUMIDITY,
            wind: Wind::zeros(),
            temperature: REFERENCE_TEMPERATURE,
        }
    }
}

impl Environment {
    /// Create an environment from explicit values
    #[must_use]
    pub fn new(ignition_probability: f64, humidity: f64, wind: Wind, temperature: f64) -> Self {
        Self {
            ignition_probability,
            humidity,
            wind,
            temperature,
        }
    }

    /// Build a wind vector from speed and direction
    ///
    /// # Arguments
    ///
    /// * `speed` - Wind speed in the caller's unit (km/h from weather feeds)
    /// * `direction_degrees` - Direction angle in degrees
    #[must_use]
    pub fn wind_from(speed: f64, direction_degrees: f64) -> Wind {
        let theta = direction_degrees.to_radians();
        Wind::new(speed * theta.cos(), speed * theta.sin())
    }

    /// Replace the ignition probability coefficient
    pub fn with_ignition_probability(mut self, probability: f64) -> Self {
        self.ignition_probability = probability;
        self
    }

    /// Replace the humidity, given in percent
    pub fn with_humidity(mut self, percent: f64) -> Self {
        self.humidity = percent;
        self
    }

    /// Replace the humidity, given as a fraction in [0, 1]
    pub fn with_humidity_fraction(mut self, fraction: f64) -> Self {
        self.humidity = fraction * 100.0;
        self
    }

    /// Replace the wind vector
    pub fn with_wind(mut self, wind: Wind) -> Self {
        self.wind = wind;
        self
    }

    /// Replace the temperature (°C)
    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = celsius;
        self
    }

    /// Check that every parameter is finite and in range
    ///
    /// The simulation itself treats the environment as opaque; this is for
    /// drivers that accept user or file input.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), EnvironmentError> {
        if !(0.0..=1.0).contains(&self.ignition_probability) {
            return Err(EnvironmentError::ProbabilityOutOfRange(
                self.ignition_probability,
            ));
        }
        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(EnvironmentError::HumidityOutOfRange(self.humidity));
        }
        if !self.wind.x.is_finite() || !self.wind.y.is_finite() {
            return Err(EnvironmentError::NonFinite("wind"));
        }
        if !self.temperature.is_finite() {
            return Err(EnvironmentError::NonFinite("temperature"));
        }
        Ok(())
    }
}

/// Invalid environment parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvironmentError {
    /// Ignition probability outside [0, 1] (or NaN)
    ProbabilityOutOfRange(f64),
    /// Humidity outside [0, 100] percent (or NaN)
    HumidityOutOfRange(f64),
    /// Named parameter is NaN or infinite
    NonFinite(&'static str),
}

impl std::fmt::Display for EnvironmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvironmentError::ProbabilityOutOfRange(p) => {
                write!(f, "Ignition probability must be in [0, 1], got {p}")
            }
            EnvironmentError::HumidityOutOfRange(h) => {
                write!(f, "Humidity must be a percentage in [0, 100], got {h}")
            }
            EnvironmentError::NonFinite(name) => write!(f, "Parameter '{name}' must be finite"),
        }
    }
}

impl std::error::Error for EnvironmentError {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let env = Environment::default();
        assert_eq!(env.ignition_probability, 0.2);
        assert_eq!(env.humidity, 40.0);
        assert_eq!(env.wind, Wind::zeros());
        assert_eq!(env.temperature, 20.0);
        assert!(env.validate().is_ok());
    }

    #[test]
    fn test_wind_from_speed_and_direction() {
        let east = Environment::wind_from(10.0, 0.0);
        assert_relative_eq!(east.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(east.y, 0.0, epsilon = 1e-12);

        let south = Environment::wind_from(5.0, 90.0);
        assert_relative_eq!(south.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(south.y, 5.0, epsilon = 1e-12);

        // Not normalized
        assert_relative_eq!(Environment::wind_from(7.0, 33.0).norm(), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_humidity_fraction_converts_to_percent() {
        let env = Environment::default().with_humidity_fraction(0.35);
        assert_relative_eq!(env.humidity, 35.0, epsilon = 1e-12);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let env = Environment::default().with_ignition_probability(1.5);
        assert_eq!(
            env.validate(),
            Err(EnvironmentError::ProbabilityOutOfRange(1.5))
        );

        let env = Environment::default().with_humidity(-5.0);
        assert!(matches!(
            env.validate(),
            Err(EnvironmentError::HumidityOutOfRange(_))
        ));

        let env = Environment::default().with_temperature(f64::NAN);
        assert_eq!(
            env.validate(),
            Err(EnvironmentError::NonFinite("temperature"))
        );

        let env = Environment::default().with_wind(Wind::new(f64::INFINITY, 0.0));
        assert_eq!(env.validate(), Err(EnvironmentError::NonFinite("wind")));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let env: Environment = serde_json::from_str(r#"{"humidity": 12.5}"#).unwrap();
        assert_eq!(env.humidity, 12.5);
        assert_eq!(env.ignition_probability, DEFAULT_IGNITION_PROBABILITY);
        assert_eq!(env.temperature, REFERENCE_TEMPERATURE);
    }
}
