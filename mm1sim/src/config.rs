//! Loading and validating simulation parameters.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Queue capacity used when none is configured.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

/// Simulation configuration, typically loaded from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Mean time between consecutive arrivals.
    pub mean_interarrival: f64,
    /// Mean service time.
    pub mean_service: f64,
    /// The simulation ends once this many customers have completed their delays in queue.
    pub num_delays_required: usize,
    /// Maximum number of customers waiting in queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Random seed. If missing, the generator is seeded from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Config {
    /// Constructs a configuration with the default queue capacity and no seed.
    #[must_use]
    pub fn new(mean_interarrival: f64, mean_service: f64, num_delays_required: usize) -> Self {
        Self {
            mean_interarrival,
            mean_service,
            num_delays_required,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            seed: None,
        }
    }

    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the queue capacity.
    #[must_use]
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    /// Loads config in the plain input format: a single line with the mean interarrival time,
    /// the mean service time, and the number of delays required, separated by whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// # use mm1sim::Config;
    /// # fn main() -> mm1sim::Result<()> {
    /// let config = Config::from_input(std::io::Cursor::new("1.0 0.5 1000\n"))?;
    /// assert_eq!(config.mean_interarrival, 1.0);
    /// assert_eq!(config.mean_service, 0.5);
    /// assert_eq!(config.num_delays_required, 1000);
    /// assert_eq!(config.queue_capacity, 100);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the line cannot be parsed, and
    /// [`Error::InvalidConfiguration`] if the values are out of range.
    pub fn from_input<R: Read>(mut reader: R) -> Result<Self> {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .map_err(|err| Error::MalformedInput(err.to_string()))?;
        let line = input
            .lines()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| Error::MalformedInput(String::from("input is empty")))?;
        let values = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| Error::MalformedInput(format!("not a number: `{}`", token)))
            })
            .collect::<Result<Vec<f64>>>()?;
        let (mean_interarrival, mean_service, num_delays_required) = match values.as_slice() {
            [a, s, n] => (*a, *s, *n),
            _ => {
                return Err(Error::MalformedInput(format!(
                    "expected 3 values but found {}",
                    values.len()
                )))
            }
        };
        let config = Self::new(
            mean_interarrival,
            mean_service,
            parse_count(num_delays_required)?,
        );
        config.validate()?;
        Ok(config)
    }

    /// Loads config from JSON.
    ///
    /// # Example
    ///
    /// ```
    /// # use mm1sim::Config;
    /// # fn main() -> mm1sim::Result<()> {
    /// let input = r#"{
    ///     "mean_interarrival": 1.0,
    ///     "mean_service": 0.5,
    ///     "num_delays_required": 1000,
    ///     "seed": 17
    /// }"#;
    /// let config = Config::from_json(std::io::Cursor::new(input))?;
    /// assert_eq!(config.num_delays_required, 1000);
    /// assert_eq!(config.queue_capacity, 100);
    /// assert_eq!(config.seed, Some(17));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the JSON is invalid, and
    /// [`Error::InvalidConfiguration`] if the values are out of range.
    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(reader)
            .map_err(|err| Error::MalformedInput(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that all parameters describe a valid simulation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when either mean is not a positive finite number,
    /// or when the number of delays required or the queue capacity is zero.
    pub fn validate(&self) -> Result<()> {
        check_mean("mean interarrival time", self.mean_interarrival)?;
        check_mean("mean service time", self.mean_service)?;
        if self.num_delays_required == 0 {
            return Err(Error::InvalidConfiguration(String::from(
                "number of delays required must be positive",
            )));
        }
        if self.queue_capacity == 0 {
            return Err(Error::InvalidConfiguration(String::from(
                "queue capacity must be positive",
            )));
        }
        Ok(())
    }
}

fn check_mean(name: &str, mean: f64) -> Result<()> {
    if mean.is_finite() && mean > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration(format!(
            "{} must be a positive number but is {}",
            name, mean
        )))
    }
}

/// The input format allows the count to be written as a float, e.g., `1000.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count(value: f64) -> Result<usize> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(Error::MalformedInput(format!(
            "number of delays required must be an integer but is {}",
            value
        )));
    }
    if value < 1.0 {
        return Err(Error::InvalidConfiguration(format!(
            "number of delays required must be positive but is {}",
            value
        )));
    }
    Ok(value as usize)
}
