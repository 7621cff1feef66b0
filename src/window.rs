//! Daily activity window: is "now" inside the configured [start, end) span?
//! Windows may wrap past midnight (19:00 -> 7:00).

use crate::error::AgentError;
use chrono::NaiveTime;

/// A window with start == end is degenerate: both interval branches disagree
/// about it, so it is classified up front instead of falling through the
/// arithmetic. Policy: never active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Daily { start: NaiveTime, end: NaiveTime },
    Never,
}

impl Window {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        if start == end {
            Window::Never
        } else {
            Window::Daily { start, end }
        }
    }

    /// Inclusive start, exclusive end. For wrapping windows (start > end)
    /// the span covers [start, midnight) plus [midnight, end).
    pub fn contains(&self, now: NaiveTime) -> bool {
        match *self {
            Window::Never => false,
            Window::Daily { start, end } => {
                if start < end {
                    start <= now && now < end
                } else {
                    now >= start || now < end
                }
            }
        }
    }
}

/// Parse an `HH:MM` time-of-day from config ("7:00" and "07:00" both accepted).
pub fn parse_time_of_day(field: &'static str, value: &str) -> Result<NaiveTime, AgentError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| AgentError::ConfigTime {
        field,
        value: value.to_string(),
    })
}
