use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{Config, TimeAverages};

/// Format in which the report is written.
#[derive(
    Debug, PartialEq, Eq, Clone, Copy, strum::EnumString, strum::ToString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// A single JSON object.
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Text
    }
}

/// Final measures of a finished simulation run.
///
/// Averages whose denominator is zero are `None`, and are printed as `undefined`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    mean_interarrival: f64,
    mean_service: f64,
    customers_delayed: usize,
    average_delay: Option<f64>,
    average_num_in_queue: Option<f64>,
    server_utilization: Option<f64>,
    end_time: f64,
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

impl Report {
    /// Computes the report from the configuration and the counters at time `end_time`.
    #[must_use]
    pub fn new(config: &Config, statistics: &TimeAverages, end_time: f64) -> Self {
        Self {
            mean_interarrival: config.mean_interarrival,
            mean_service: config.mean_service,
            customers_delayed: statistics.customers_delayed(),
            average_delay: ratio(
                statistics.total_of_delays(),
                statistics.customers_delayed() as f64,
            ),
            average_num_in_queue: ratio(statistics.area_num_in_queue(), end_time),
            server_utilization: ratio(statistics.area_server_status(), end_time),
            end_time,
        }
    }

    /// Configured mean interarrival time.
    #[must_use]
    pub fn mean_interarrival(&self) -> f64 {
        self.mean_interarrival
    }

    /// Configured mean service time.
    #[must_use]
    pub fn mean_service(&self) -> f64 {
        self.mean_service
    }

    /// Number of customers who completed their delays.
    #[must_use]
    pub fn customers_delayed(&self) -> usize {
        self.customers_delayed
    }

    /// Average delay in queue.
    #[must_use]
    pub fn average_delay(&self) -> Option<f64> {
        self.average_delay
    }

    /// Time-average number of customers in queue.
    #[must_use]
    pub fn average_num_in_queue(&self) -> Option<f64> {
        self.average_num_in_queue
    }

    /// Fraction of time the server was busy.
    #[must_use]
    pub fn server_utilization(&self) -> Option<f64> {
        self.server_utilization
    }

    /// Simulation time at which the run ended.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Writes the report in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write<W: Write>(&self, format: OutputFormat, mut writer: W) -> std::io::Result<()> {
        match format {
            OutputFormat::Text => write!(writer, "{}", self),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, self)?;
                writeln!(writer)
            }
        }
    }
}

struct Measure(Option<f64>);

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.3}", value),
            None => write!(f, "undefined"),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Single-server queueing system")?;
        writeln!(f)?;
        writeln!(
            f,
            "Mean interarrival time: {:.3} minutes",
            self.mean_interarrival
        )?;
        writeln!(f, "Mean service time: {:.3} minutes", self.mean_service)?;
        writeln!(f, "Total number of customers: {}", self.customers_delayed)?;
        writeln!(f)?;
        let delay = Measure(self.average_delay);
        match self.average_delay {
            Some(_) => writeln!(f, "Average delay in queue: {} minutes", delay)?,
            None => writeln!(f, "Average delay in queue: {}", delay)?,
        }
        writeln!(
            f,
            "Average number in queue: {}",
            Measure(self.average_num_in_queue)
        )?;
        writeln!(
            f,
            "Server utilization: {}",
            Measure(self.server_utilization)
        )?;
        writeln!(f, "Time simulation ended: {:.3} minutes", self.end_time)
    }
}
