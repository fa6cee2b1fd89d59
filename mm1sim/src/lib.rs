//! Single-server queueing simulation.
//!
//! Customers arrive at a single server and wait in a first-come-first-served queue when the
//! server is busy. The simulation advances its clock from one event to the next (next-event time
//! advance) and accumulates time-weighted statistics, from which it estimates the average delay
//! in queue, the average number in queue, and the server utilization.
//!
//! # Examples
//!
//! ```
//! # use mm1sim::{Config, Simulation};
//! # fn main() -> mm1sim::Result<()> {
//! let config = Config::new(1.0, 0.5, 1000).with_seed(17);
//! let report = Simulation::seeded(&config)?.run()?;
//! assert_eq!(report.customers_delayed(), 1000);
//! assert!(report.server_utilization().unwrap() < 1.0);
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::default_trait_access,
    clippy::cast_precision_loss
)]
#![deny(unsafe_code)]

mod config;
mod queue;
mod report;
mod scheduler;
mod simulation;
mod state;
mod statistics;
mod variate;

pub use config::{Config, DEFAULT_QUEUE_CAPACITY};
pub use queue::Queue;
pub use report::{OutputFormat, Report};
pub use scheduler::{EventKind, FutureEventList};
pub use simulation::{Phase, Simulation, Step};
pub use state::{ServerStatus, SystemState};
pub use statistics::TimeAverages;
pub use variate::{SeededSource, VariateSource, Variates};

/// Error type encompassing all simulation errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A customer arrived to a full queue.
    #[error("Overflow of the queue (capacity {capacity}) at time {time}")]
    QueueOverflow {
        /// Simulation time of the offending arrival.
        time: f64,
        /// Configured queue capacity.
        capacity: usize,
    },
    /// No event was scheduled while customers still had to be served.
    #[error("Event list empty at time {time}")]
    EmptyEventList {
        /// Simulation time at which the event list was found empty.
        time: f64,
    },
    /// Configuration rejected before the simulation started.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Input could not be parsed into a configuration.
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// Result alias using [`Error`](enum.Error.html).
pub type Result<T> = std::result::Result<T, Error>;
