//! Time values accepted by the picker and the lenient text parser behind them.

use chrono::{NaiveTime, Timelike};
use once_cell_regex::regex;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which half of the day the displayed hour belongs to.
///
/// In 24-hour mode this is only a grouping that picks the `0-11` or `12-23`
/// ring; the hour field itself always holds the full value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AmPm {
    #[default]
    Am,
    Pm,
}

impl AmPm {
    /// The opposite bucket.
    pub fn toggled(self) -> Self {
        match self {
            AmPm::Am => AmPm::Pm,
            AmPm::Pm => AmPm::Am,
        }
    }

    /// Lowercase bucket name, `"am"` or `"pm"`.
    pub fn as_str(self) -> &'static str {
        match self {
            AmPm::Am => "am",
            AmPm::Pm => "pm",
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(AmPm::Am),
            'p' => Some(AmPm::Pm),
            _ => None,
        }
    }
}

impl fmt::Display for AmPm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from [`parse_time_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTimeError {
    /// The input was empty or whitespace.
    #[error("empty time string")]
    Empty,
    /// No hour digits were found anywhere in the input.
    #[error("no hour digits in {0:?}")]
    NoDigits(String),
}

/// Hour, minute, and am/pm letter extracted from a time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTime {
    pub hour: u32,
    pub minute: u32,
    pub ampm: AmPm,
}

impl ParsedTime {
    /// The minute as the two-character string written into the minute field.
    pub fn minute_text(&self) -> String {
        format!("{:02}", self.minute)
    }
}

impl FromStr for ParsedTime {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time_str(s)
    }
}

/// Parse free-form time text.
///
/// The first run of one or two digits is the hour. It may be followed by an
/// optional `:`, `-`, or `.` and one or two minute digits, then optional
/// whitespace and an `a`/`p` letter (either case). Anything before the hour
/// or after the letter is ignored. A missing minute is `0` and a missing
/// letter is `am`. No range checks are applied: `"93"` is hour 93.
pub fn parse_time_str(input: &str) -> Result<ParsedTime, ParseTimeError> {
    if input.trim().is_empty() {
        return Err(ParseTimeError::Empty);
    }

    let caps = regex!(r"(?i)([0-9]{1,2})(?:[:.\-]?([0-9]{1,2}))?\s*([ap])?")
        .captures(input)
        .ok_or_else(|| ParseTimeError::NoDigits(input.to_string()))?;
    let number = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };
    let ampm = caps
        .get(3)
        .and_then(|m| m.as_str().chars().next())
        .and_then(AmPm::from_letter)
        .unwrap_or_default();

    Ok(ParsedTime {
        hour: number(1),
        minute: number(2),
        ampm,
    })
}

/// A time handed to [`Clockface::set_time`](crate::Clockface::set_time).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeValue {
    /// The current wall-clock hour and minute.
    Now,
    /// A structured time of day.
    Time(NaiveTime),
    /// Free-form text, see [`parse_time_str`].
    Text(String),
}

impl TimeValue {
    /// Resolve to hour, minute, and am/pm. Never fails: text that does not
    /// parse falls back to the current hour, minute 0, am.
    pub fn resolve(&self, now: NaiveTime) -> ParsedTime {
        match self {
            TimeValue::Now => ParsedTime {
                hour: now.hour(),
                minute: now.minute(),
                ampm: AmPm::Am,
            },
            TimeValue::Time(t) => ParsedTime {
                hour: t.hour(),
                minute: t.minute(),
                ampm: AmPm::Am,
            },
            TimeValue::Text(s) => parse_time_str(s).unwrap_or_else(|err| {
                debug!(%err, "time text did not parse, using current hour");
                ParsedTime {
                    hour: now.hour(),
                    minute: 0,
                    ampm: AmPm::Am,
                }
            }),
        }
    }
}

impl From<NaiveTime> for TimeValue {
    fn from(t: NaiveTime) -> Self {
        TimeValue::Time(t)
    }
}

impl From<&str> for TimeValue {
    fn from(s: &str) -> Self {
        TimeValue::Text(s.to_string())
    }
}

impl From<String> for TimeValue {
    fn from(s: String) -> Self {
        TimeValue::Text(s)
    }
}
