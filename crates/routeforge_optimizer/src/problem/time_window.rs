use jiff::{SignedDuration, Timestamp};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: Timestamp,
    end: Timestamp,
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        TimeWindow { start, end }
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Arriving before the window opens is allowed, the vehicle waits.
    pub fn is_satisfied(&self, arrival: Timestamp) -> bool {
        arrival <= self.end
    }

    pub fn has_opened(&self, arrival: Timestamp) -> bool {
        arrival >= self.start
    }

    pub fn waiting_duration(&self, arrival: Timestamp) -> SignedDuration {
        if arrival < self.start {
            self.start.duration_since(arrival)
        } else {
            SignedDuration::ZERO
        }
    }
}

#[derive(Default)]
pub struct TimeWindowBuilder {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl TimeWindowBuilder {
    pub fn with_start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    /// Missing bounds are open: `Timestamp::MIN` and `Timestamp::MAX`.
    pub fn build(self) -> TimeWindow {
        TimeWindow {
            start: self.start.unwrap_or(Timestamp::MIN),
            end: self.end.unwrap_or(Timestamp::MAX),
        }
    }
}
