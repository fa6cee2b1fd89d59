//! Event handlers and the main simulation loop.

use crate::{
    Config, Error, EventKind, FutureEventList, Report, Result, SeededSource, ServerStatus,
    SystemState, VariateSource, Variates,
};

/// Phase of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// State is initialized and the first arrival scheduled, but no event has happened yet.
    Initializing,
    /// Events are being processed.
    Running,
    /// The required number of customers have been delayed; the state is final.
    Terminating,
}

/// Record of a single processed event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Kind of the processed event.
    pub kind: EventKind,
    /// Time at which it occurred.
    pub time: f64,
    /// Time elapsed since the previous event.
    pub elapsed: f64,
    /// Number in queue during the elapsed interval.
    pub num_in_queue_before: usize,
    /// Server status during the elapsed interval.
    pub server_before: ServerStatus,
    /// Number in queue after the event.
    pub num_in_queue: usize,
    /// Server status after the event.
    pub server: ServerStatus,
    /// Delay of the customer who entered service at this event, if any.
    pub delay: Option<f64>,
    /// Number of customers delayed so far, including this event.
    pub customers_delayed: usize,
}

/// Single-server queueing simulation.
///
/// Owns the entire state of a run, so independent instances do not interfere with each other.
/// All random durations are drawn from the variate source `S`, in the order in which the events
/// need them: the next arrival first, then the service time if the service starts.
pub struct Simulation<S: VariateSource> {
    config: Config,
    source: S,
    state: SystemState,
    events: FutureEventList,
    phase: Phase,
}

impl Simulation<SeededSource> {
    /// Creates a simulation drawing exponential variates from a generator seeded with the
    /// configured seed, or from the operating system if no seed is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration does not validate.
    pub fn seeded(config: &Config) -> Result<Self> {
        let source = config.seed.map_or_else(Variates::from_entropy, Variates::seeded);
        Self::new(config.clone(), source)
    }
}

impl<S: VariateSource> Simulation<S> {
    /// Validates the configuration, initializes the state, and schedules the first arrival.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration does not validate.
    pub fn new(config: Config, mut source: S) -> Result<Self> {
        config.validate()?;
        let state = SystemState::new(config.queue_capacity);
        let mut events = FutureEventList::default();
        events.schedule(
            EventKind::Arrival,
            state.clock() + source.exponential(config.mean_interarrival),
        );
        Ok(Self {
            config,
            source,
            state,
            events,
            phase: Phase::Initializing,
        })
    }

    /// Current phase of the run.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current state of the system.
    #[must_use]
    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// Pending events.
    #[must_use]
    pub fn events(&self) -> &FutureEventList {
        &self.events
    }

    /// Simulation configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Processes the next event: advances the clock, updates the time averages with the state
    /// that held until now, and calls the event's handler.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyEventList`] if no event is pending, and [`Error::QueueOverflow`] if
    /// an arriving customer finds the queue full.
    pub fn step(&mut self) -> Result<Step> {
        if self.phase == Phase::Initializing {
            self.phase = Phase::Running;
        }
        let (kind, time) = self.events.next_event().ok_or(Error::EmptyEventList {
            time: self.state.clock,
        })?;
        debug_assert!(time >= self.state.clock, "Clock must not go backwards");
        self.state.clock = time;

        let num_in_queue_before = self.state.num_in_queue();
        let server_before = self.state.server;
        let elapsed = self
            .state
            .statistics
            .update(time, num_in_queue_before, server_before);

        let delay = match kind {
            EventKind::Arrival => self.arrive()?,
            EventKind::Departure => self.depart(),
        };
        log::debug!(
            "[{:.6}] {}: {} in queue, server {}",
            time,
            kind,
            self.state.num_in_queue(),
            self.state.server
        );

        let customers_delayed = self.state.statistics.customers_delayed();
        if customers_delayed >= self.config.num_delays_required {
            self.phase = Phase::Terminating;
        }
        Ok(Step {
            kind,
            time,
            elapsed,
            num_in_queue_before,
            server_before,
            num_in_queue: self.state.num_in_queue(),
            server: self.state.server,
            delay,
            customers_delayed,
        })
    }

    /// Runs until the required number of customers have been delayed and returns the report.
    ///
    /// # Errors
    ///
    /// Fails on the first error returned by [`Simulation::step`]; no report is produced then.
    pub fn run(&mut self) -> Result<Report> {
        self.run_with(|_| {})
    }

    /// Same as [`Simulation::run`] but calls `observer` after every processed event.
    ///
    /// # Errors
    ///
    /// Fails on the first error returned by [`Simulation::step`]; no report is produced then.
    pub fn run_with<F: FnMut(&Step)>(&mut self, mut observer: F) -> Result<Report> {
        log::info!(
            "Simulating until {} customers are delayed (mean interarrival: {}, mean service: {})",
            self.config.num_delays_required,
            self.config.mean_interarrival,
            self.config.mean_service
        );
        while self.phase != Phase::Terminating {
            let step = self.step().map_err(|err| {
                log::error!("Simulation aborted: {}", err);
                err
            })?;
            observer(&step);
        }
        log::info!("Simulation ended at time {}", self.state.clock);
        Ok(self.report())
    }

    /// Report computed from the current state.
    #[must_use]
    pub fn report(&self) -> Report {
        Report::new(&self.config, &self.state.statistics, self.state.clock)
    }

    fn schedule_departure(&mut self) {
        let time = self.state.clock + self.source.exponential(self.config.mean_service);
        log::trace!("Departure scheduled at {}", time);
        self.events.schedule(EventKind::Departure, time);
    }

    /// Returns the delay of the arriving customer if they are served immediately.
    fn arrive(&mut self) -> Result<Option<f64>> {
        let now = self.state.clock;
        let next_arrival = now + self.source.exponential(self.config.mean_interarrival);
        self.events.schedule(EventKind::Arrival, next_arrival);
        match self.state.server {
            ServerStatus::Busy => {
                if self.state.queue.push_back(now).is_err() {
                    return Err(Error::QueueOverflow {
                        time: now,
                        capacity: self.state.queue.capacity(),
                    });
                }
                Ok(None)
            }
            ServerStatus::Idle => {
                self.state.statistics.record_delay(0.0);
                self.state.server = ServerStatus::Busy;
                self.schedule_departure();
                Ok(Some(0.0))
            }
        }
    }

    /// Returns the delay of the customer taken from the queue, if any.
    fn depart(&mut self) -> Option<f64> {
        if let Some(arrival) = self.state.queue.pop_front() {
            let delay = self.state.clock - arrival;
            self.state.statistics.record_delay(delay);
            self.schedule_departure();
            Some(delay)
        } else {
            self.state.server = ServerStatus::Idle;
            self.events.cancel(EventKind::Departure);
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use float_cmp::approx_eq;
    use rand::rngs::mock::StepRng;
    use rstest::rstest;
    use testing::{ConstantDistribution, ScriptedDistribution};

    type ScriptedSimulation = Simulation<Variates<StepRng, ScriptedDistribution>>;

    fn scripted(config: Config, script: Vec<f64>) -> ScriptedSimulation {
        Simulation::new(
            config,
            Variates::new(StepRng::new(0, 1), ScriptedDistribution::new(script)),
        )
        .unwrap()
    }

    #[test]
    fn test_initialization() {
        let sim = scripted(Config::new(1.0, 1.0, 1), vec![2.0]);
        assert_eq!(sim.phase(), Phase::Initializing);
        assert_eq!(sim.state().clock(), 0.0);
        assert_eq!(sim.state().server(), ServerStatus::Idle);
        assert_eq!(sim.state().num_in_queue(), 0);
        assert_eq!(sim.events().time_of(EventKind::Arrival), Some(2.0));
        assert_eq!(sim.events().time_of(EventKind::Departure), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Simulation::new(
            Config::new(1.0, 0.0, 1),
            Variates::new(StepRng::new(0, 1), ConstantDistribution::new(1.0)),
        );
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_arrival_to_idle_server() {
        // Draws: first arrival, next arrival, service.
        let mut sim = scripted(Config::new(1.0, 1.0, 5), vec![1.0, 3.0, 0.5]);
        let step = sim.step().unwrap();
        assert_eq!(sim.phase(), Phase::Running);
        assert_eq!(step.kind, EventKind::Arrival);
        assert_eq!(step.time, 1.0);
        assert_eq!(step.delay, Some(0.0));
        assert_eq!(step.customers_delayed, 1);
        assert_eq!(step.server_before, ServerStatus::Idle);
        assert_eq!(step.server, ServerStatus::Busy);
        assert_eq!(sim.events().time_of(EventKind::Arrival), Some(4.0));
        assert_eq!(sim.events().time_of(EventKind::Departure), Some(1.5));
    }

    #[test]
    fn test_arrival_to_busy_server_joins_queue() {
        // Draws: first arrival, next arrival, service, next arrival.
        let mut sim = scripted(Config::new(1.0, 1.0, 5), vec![1.0, 0.5, 3.0, 10.0]);
        sim.step().unwrap();
        let step = sim.step().unwrap();
        assert_eq!(step.kind, EventKind::Arrival);
        assert_eq!(step.time, 1.5);
        assert_eq!(step.delay, None);
        assert_eq!(step.customers_delayed, 1);
        assert_eq!(step.num_in_queue, 1);
        assert_eq!(sim.state().queue().front(), Some(&1.5));
        assert_eq!(sim.events().time_of(EventKind::Departure), Some(4.0));
    }

    #[test]
    fn test_departure_with_empty_queue() {
        // Draws: first arrival, next arrival, service.
        let mut sim = scripted(Config::new(1.0, 1.0, 5), vec![1.0, 5.0, 1.0]);
        sim.step().unwrap();
        let step = sim.step().unwrap();
        assert_eq!(step.kind, EventKind::Departure);
        assert_eq!(step.time, 2.0);
        assert_eq!(step.delay, None);
        assert_eq!(step.customers_delayed, 1);
        assert_eq!(step.server, ServerStatus::Idle);
        assert_eq!(sim.events().time_of(EventKind::Departure), None);
        assert_eq!(sim.events().time_of(EventKind::Arrival), Some(6.0));
        assert!(approx_eq!(
            f64,
            sim.state().statistics().area_server_status(),
            1.0
        ));
    }

    #[test]
    fn test_second_customer_delay() {
        // First arrival at 1.0, second at 1.5, first departs at 3.0.
        let mut sim = scripted(Config::new(1.0, 1.0, 2), vec![1.0, 0.5, 2.0, 10.0, 1.0]);
        let mut steps = Vec::new();
        let report = sim.run_with(|step| steps.push(*step)).unwrap();
        assert_eq!(steps.len(), 3);
        let departure = steps[2];
        assert_eq!(departure.kind, EventKind::Departure);
        assert_eq!(departure.time, 3.0);
        assert_eq!(departure.delay, Some(3.0 - 1.5));
        assert_eq!(sim.phase(), Phase::Terminating);
        assert_eq!(report.customers_delayed(), 2);
        assert_eq!(report.average_delay(), Some(0.75));
        assert_eq!(report.average_num_in_queue(), Some(0.5));
        assert!(approx_eq!(
            f64,
            report.server_utilization().unwrap(),
            2.0 / 3.0
        ));
        assert_eq!(report.end_time(), 3.0);
        assert_eq!(sim.events().time_of(EventKind::Departure), Some(4.0));
    }

    #[test]
    fn test_queue_shifts_forward() {
        // Arrivals at 1, 2, 3 while the first service lasts until 10; services of 1 afterwards.
        let mut sim = scripted(
            Config::new(1.0, 1.0, 10),
            vec![1.0, 1.0, 9.0, 1.0, 100.0, 1.0, 1.0, 1.0],
        );
        for _ in 0..3 {
            sim.step().unwrap();
        }
        let waiting: Vec<f64> = sim.state().queue().iter().copied().collect();
        assert_eq!(waiting, vec![2.0, 3.0]);
        let step = sim.step().unwrap();
        assert_eq!(step.kind, EventKind::Departure);
        assert_eq!(step.delay, Some(8.0));
        assert_eq!(sim.state().queue().front(), Some(&3.0));
        let step = sim.step().unwrap();
        assert_eq!(step.delay, Some(8.0));
        assert_eq!(step.num_in_queue, 0);
        let step = sim.step().unwrap();
        assert_eq!(step.delay, None);
        assert_eq!(step.server, ServerStatus::Idle);
    }

    #[test]
    fn test_overflow() {
        let mut sim = Simulation::new(
            Config::new(1e-6, 1e6, 4).with_queue_capacity(3),
            Variates::new(StepRng::new(0, 1), ConstantDistribution::new(1.0)),
        )
        .unwrap();
        let error = sim.run().unwrap_err();
        match error {
            Error::QueueOverflow { time, capacity } => {
                assert_eq!(capacity, 3);
                assert!(approx_eq!(f64, time, 5e-6, epsilon = 1e-12));
            }
            err => panic!("unexpected error: {}", err),
        }
        assert_eq!(sim.state().num_in_queue(), 3);
    }

    #[test]
    fn test_empty_event_list() {
        let mut sim = scripted(Config::new(1.0, 1.0, 1), vec![1.0]);
        sim.events.cancel(EventKind::Arrival);
        assert_eq!(sim.step(), Err(Error::EmptyEventList { time: 0.0 }));
    }

    #[rstest(target, case(1), case(5), case(50))]
    fn test_terminates_at_target(target: usize) {
        let mut sim = Simulation::seeded(&Config::new(1.0, 0.9, target).with_seed(3)).unwrap();
        let report = sim.run().unwrap();
        assert_eq!(report.customers_delayed(), target);
        assert_eq!(sim.phase(), Phase::Terminating);
    }
}
