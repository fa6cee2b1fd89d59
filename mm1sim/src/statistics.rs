use serde::{Deserialize, Serialize};

use crate::ServerStatus;

/// Statistical counters of a run.
///
/// The two areas are time integrals of the number in queue and of the server status indicator.
/// They are brought up to date at every event, before the event changes the state, so that each
/// interval between events is weighted by the state that held during it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeAverages {
    customers_delayed: usize,
    total_of_delays: f64,
    area_num_in_queue: f64,
    area_server_status: f64,
    time_last_event: f64,
}

impl TimeAverages {
    /// Integrates the given state over the time elapsed since the last event, and moves the last
    /// event time to `now`. Returns the elapsed interval.
    pub fn update(&mut self, now: f64, num_in_queue: usize, server: ServerStatus) -> f64 {
        let elapsed = now - self.time_last_event;
        self.time_last_event = now;
        self.advance(num_in_queue, server, elapsed);
        elapsed
    }

    /// Adds `num_in_queue * elapsed` and `server * elapsed` to the respective areas.
    pub fn advance(&mut self, num_in_queue: usize, server: ServerStatus, elapsed: f64) {
        self.area_num_in_queue += num_in_queue as f64 * elapsed;
        self.area_server_status += server.indicator() * elapsed;
    }

    /// Counts one more customer whose delay in queue is over.
    pub fn record_delay(&mut self, delay: f64) {
        self.total_of_delays += delay;
        self.customers_delayed += 1;
    }

    /// Number of customers who have completed their delays.
    #[must_use]
    pub fn customers_delayed(&self) -> usize {
        self.customers_delayed
    }

    /// Sum of all recorded delays.
    #[must_use]
    pub fn total_of_delays(&self) -> f64 {
        self.total_of_delays
    }

    /// Area under the number-in-queue function.
    #[must_use]
    pub fn area_num_in_queue(&self) -> f64 {
        self.area_num_in_queue
    }

    /// Area under the server-status function, i.e., the total busy time.
    #[must_use]
    pub fn area_server_status(&self) -> f64 {
        self.area_server_status
    }

    /// Time of the most recent event.
    #[must_use]
    pub fn time_last_event(&self) -> f64 {
        self.time_last_event
    }
}
