use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of events occurring in the simulation.
///
/// The declaration order is the tie-break order: when two kinds are scheduled at the same time,
/// the one declared first happens first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A customer enters the system.
    Arrival,
    /// A customer finishes service and leaves.
    Departure,
}

impl EventKind {
    /// Number of event kinds.
    pub const COUNT: usize = 2;

    fn index(self) -> usize {
        match self {
            Self::Arrival => 0,
            Self::Departure => 1,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrival => write!(f, "arrival"),
            Self::Departure => write!(f, "departure"),
        }
    }
}

/// Future event list holding the next occurrence time of each event kind.
///
/// There is exactly one slot per kind, so scheduling a kind again replaces its previous time.
/// An empty slot means that no event of that kind is pending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FutureEventList {
    slots: [Option<f64>; EventKind::COUNT],
}

impl FutureEventList {
    /// Schedules `kind` to occur at `time`, replacing any earlier schedule of the same kind.
    pub fn schedule(&mut self, kind: EventKind, time: f64) {
        self.slots[kind.index()] = Some(time);
    }

    /// Removes the pending event of `kind`, if any.
    pub fn cancel(&mut self, kind: EventKind) {
        self.slots[kind.index()] = None;
    }

    /// Returns the time at which `kind` is scheduled, or `None` if it is not.
    #[must_use]
    pub fn time_of(&self, kind: EventKind) -> Option<f64> {
        self.slots[kind.index()]
    }

    /// Returns the earliest pending event and its time, or `None` if nothing is scheduled.
    /// Ties go to the lower event kind.
    #[must_use]
    pub fn next_event(&self) -> Option<(EventKind, f64)> {
        use strum::IntoEnumIterator;
        EventKind::iter()
            .filter_map(|kind| self.time_of(kind).map(|time| (kind, time)))
            .fold(None, |earliest, (kind, time)| match earliest {
                Some((_, earliest_time)) if earliest_time <= time => earliest,
                _ => Some((kind, time)),
            })
    }

    /// Answers whether no event is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty() {
        let events = FutureEventList::default();
        assert!(events.is_empty());
        assert_eq!(events.next_event(), None);
        assert_eq!(events.time_of(EventKind::Arrival), None);
        assert_eq!(events.time_of(EventKind::Departure), None);
    }

    #[test]
    fn test_schedule_overwrites() {
        let mut events = FutureEventList::default();
        events.schedule(EventKind::Arrival, 3.0);
        events.schedule(EventKind::Arrival, 1.0);
        assert_eq!(events.time_of(EventKind::Arrival), Some(1.0));
        assert_eq!(events.next_event(), Some((EventKind::Arrival, 1.0)));
    }

    #[test]
    fn test_earliest_wins() {
        let mut events = FutureEventList::default();
        events.schedule(EventKind::Arrival, 2.0);
        events.schedule(EventKind::Departure, 1.5);
        assert_eq!(events.next_event(), Some((EventKind::Departure, 1.5)));
        events.schedule(EventKind::Departure, 2.5);
        assert_eq!(events.next_event(), Some((EventKind::Arrival, 2.0)));
    }

    #[test]
    fn test_tie_goes_to_arrival() {
        let mut events = FutureEventList::default();
        events.schedule(EventKind::Departure, 1.0);
        events.schedule(EventKind::Arrival, 1.0);
        assert_eq!(events.next_event(), Some((EventKind::Arrival, 1.0)));
    }

    #[test]
    fn test_cancel() {
        let mut events = FutureEventList::default();
        events.schedule(EventKind::Departure, 1.0);
        events.schedule(EventKind::Arrival, 4.0);
        events.cancel(EventKind::Departure);
        assert_eq!(events.time_of(EventKind::Departure), None);
        assert_eq!(events.next_event(), Some((EventKind::Arrival, 4.0)));
        events.cancel(EventKind::Arrival);
        assert!(events.is_empty());
        assert_eq!(events.next_event(), None);
    }

    #[test]
    fn test_kind_order() {
        assert!(EventKind::Arrival < EventKind::Departure);
        assert_eq!(EventKind::Arrival.to_string(), "arrival");
        assert_eq!(EventKind::Departure.to_string(), "departure");
    }
}
