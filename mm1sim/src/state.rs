use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Queue, TimeAverages};

/// Status of the single server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    /// No customer in service.
    Idle,
    /// Serving a customer.
    Busy,
}

impl ServerStatus {
    /// Value of the status as an indicator function: 1 when busy, 0 when idle.
    #[must_use]
    pub fn indicator(self) -> f64 {
        match self {
            Self::Idle => 0.0,
            Self::Busy => 1.0,
        }
    }
}

impl Default for ServerStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Busy => write!(f, "busy"),
        }
    }
}

/// State of the queueing system: the clock, the server, the waiting customers, and counters.
///
/// The queue stores the arrival time of each waiting customer, front being the customer who has
/// been waiting the longest.
#[derive(Debug, Clone)]
pub struct SystemState {
    pub(crate) clock: f64,
    pub(crate) server: ServerStatus,
    pub(crate) queue: Queue<f64>,
    pub(crate) statistics: TimeAverages,
}

impl SystemState {
    /// Initial state: clock at zero, idle server, empty queue of the given capacity.
    #[must_use]
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            clock: 0.0,
            server: ServerStatus::Idle,
            queue: Queue::bounded(queue_capacity),
            statistics: TimeAverages::default(),
        }
    }

    /// Current simulation time.
    #[must_use]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Current server status.
    #[must_use]
    pub fn server(&self) -> ServerStatus {
        self.server
    }

    /// Number of customers waiting in queue, excluding the one in service.
    #[must_use]
    pub fn num_in_queue(&self) -> usize {
        self.queue.len()
    }

    /// Waiting customers' arrival times, longest waiting first.
    #[must_use]
    pub fn queue(&self) -> &Queue<f64> {
        &self.queue
    }

    /// Statistical counters accumulated so far.
    #[must_use]
    pub fn statistics(&self) -> &TimeAverages {
        &self.statistics
    }
}
