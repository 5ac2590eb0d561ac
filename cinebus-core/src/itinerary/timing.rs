//! Departure/arrival facts around a fixed event window

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the event
    Outbound,
    /// Back home once the event is over
    Return,
}

/// Timing inputs supplied by the showtime collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingContext {
    pub now: NaiveDateTime,
    pub event_start: Option<NaiveDateTime>,
    pub event_end: Option<NaiveDateTime>,
    pub direction: Direction,
}

impl TimingContext {
    pub fn outbound(
        now: NaiveDateTime,
        event_start: NaiveDateTime,
        event_end: NaiveDateTime,
    ) -> Self {
        Self {
            now,
            event_start: Some(event_start),
            event_end: Some(event_end),
            direction: Direction::Outbound,
        }
    }

    pub fn return_trip(now: NaiveDateTime, event_end: NaiveDateTime) -> Self {
        Self {
            now,
            event_start: None,
            event_end: Some(event_end),
            direction: Direction::Return,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingFacts {
    Outbound {
        arrival_if_leaving_now: NaiveDateTime,
        latest_departure: NaiveDateTime,
        event_duration: TimeDelta,
        /// Leaving now gets there strictly before the event starts
        arrives_in_time: bool,
    },
    Return {
        event_end: NaiveDateTime,
        return_arrival: NaiveDateTime,
    },
}

impl TimingFacts {
    /// # Errors
    ///
    /// Returns [`Error::MissingTimingContext`] if a field required by the
    /// requested direction is absent.
    pub fn compute(context: &TimingContext, duration: TimeDelta) -> Result<Self, Error> {
        match context.direction {
            Direction::Outbound => {
                let start = context
                    .event_start
                    .ok_or(Error::MissingTimingContext("event start"))?;
                let end = context
                    .event_end
                    .ok_or(Error::MissingTimingContext("event end"))?;
                let arrival_if_leaving_now = context.now + duration;
                Ok(TimingFacts::Outbound {
                    arrival_if_leaving_now,
                    latest_departure: start - duration,
                    event_duration: end - start,
                    arrives_in_time: arrival_if_leaving_now < start,
                })
            }
            Direction::Return => {
                let end = context
                    .event_end
                    .ok_or(Error::MissingTimingContext("event end"))?;
                Ok(TimingFacts::Return {
                    event_end: end,
                    return_arrival: end + duration,
                })
            }
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            TimingFacts::Outbound {
                arrival_if_leaving_now,
                latest_departure,
                event_duration,
                ..
            } => vec![
                format!(
                    "If you leave now you will arrive at {}",
                    format_clock(arrival_if_leaving_now)
                ),
                format!(
                    "Latest departure to arrive on time: {}",
                    format_clock(latest_departure)
                ),
                format!("The film lasts {}", format_duration(*event_duration)),
            ],
            TimingFacts::Return {
                event_end,
                return_arrival,
            } => vec![
                format!("The film ends at {}", format_clock(event_end)),
                format!(
                    "If you leave when it ends you will be back at {}",
                    format_clock(return_arrival)
                ),
            ],
        }
    }
}

/// Time of day as HH:MM
pub fn format_clock(time: &NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}

/// Duration as hours:minutes, seconds truncated
pub fn format_duration(duration: TimeDelta) -> String {
    let minutes = duration.num_minutes();
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
