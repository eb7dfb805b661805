//! Weekdays and time windows.
//!
//! Defines the weekly grid a timetable lives on: five teaching days and
//! half-open time windows within a day.
//!
//! # Time Model
//! Times of day are `chrono::NaiveTime` values. They serialize as
//! zero-padded 24-hour `"HH:MM"` strings. Windows are half-open
//! `[start, end)`, so `09:00-11:50` and `11:50-13:00` do not overlap.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TimetableError};

/// A teaching day. Weekends are never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// All teaching days in week order.
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// English day name.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }

    /// Zero-based position in the week (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = TimetableError;

    /// Accepts full or three-letter English names, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|d| {
                let name = d.name().to_ascii_lowercase();
                lower == name || lower == name[..3]
            })
            .ok_or_else(|| TimetableError::invalid_input(format!("unknown teaching day '{s}'")))
    }
}

/// A time interval `[start, end)` within a day.
///
/// Construction guarantees `start < end`, including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct TimeWindow {
    #[serde(with = "hhmm")]
    start: NaiveTime,
    #[serde(with = "hhmm")]
    end: NaiveTime,
}

/// Unchecked wire form of [`TimeWindow`].
#[derive(Deserialize)]
struct RawWindow {
    #[serde(with = "hhmm")]
    start: NaiveTime,
    #[serde(with = "hhmm")]
    end: NaiveTime,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = TimetableError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeWindow {
    /// Creates a window, rejecting empty or inverted intervals.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(TimetableError::invalid_input(format!(
                "time window start {} must be before end {}",
                start.format("%H:%M"),
                end.format("%H:%M")
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses a window from two `"HH:MM"` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_hhmm(start)?, parse_hhmm(end)?)
    }

    /// Builds a window from hour/minute pairs. `None` if out of range or empty.
    pub fn from_hm(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> Option<Self> {
        let start = NaiveTime::from_hms_opt(start_h, start_m, 0)?;
        let end = NaiveTime::from_hms_opt(end_h, end_m, 0)?;
        Self::new(start, end).ok()
    }

    /// Interval start (inclusive).
    #[inline]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Interval end (exclusive).
    #[inline]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length of the window.
    #[inline]
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Whether a time of day falls within this window.
    #[inline]
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Half-open overlap test. Containment and partial overlap in either
    /// direction all reduce to this single comparison.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start.hour(),
            self.start.minute(),
            self.end.hour(),
            self.end.minute()
        )
    }
}

/// The two three-hour teaching blocks: `09:00-11:50` and `13:00-15:50`.
///
/// The gap between them is the lunch break.
pub fn standard_slots() -> Vec<TimeWindow> {
    [(9, 0, 11, 50), (13, 0, 15, 50)]
        .into_iter()
        .filter_map(|(sh, sm, eh, em)| TimeWindow::from_hm(sh, sm, eh, em))
        .collect()
}

/// Parses a zero-padded or unpadded `"HH:MM"` time.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| TimetableError::invalid_input(format!("invalid time '{s}', expected HH:MM")))
}

/// Serde adapter for `"HH:MM"` times.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M").map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse(start, end).unwrap()
    }

    #[test]
    fn test_day_parse() {
        assert_eq!("Monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("fri".parse::<Day>().unwrap(), Day::Friday);
        assert_eq!(" WEDNESDAY ".parse::<Day>().unwrap(), Day::Wednesday);
        assert!("Saturday".parse::<Day>().is_err());
        assert!("".parse::<Day>().is_err());
    }

    #[test]
    fn test_day_order_and_index() {
        assert!(Day::Monday < Day::Friday);
        assert_eq!(Day::Thursday.index(), 3);
        assert_eq!(Day::ALL.len(), 5);
    }

    #[test]
    fn test_time_window_rejects_inverted() {
        assert!(TimeWindow::parse("11:50", "09:00").is_err());
        assert!(TimeWindow::parse("09:00", "09:00").is_err());
        assert!(TimeWindow::parse("9am", "10:00").is_err());
    }

    #[test]
    fn test_time_window_contains() {
        let slot = w("09:00", "11:50");
        assert!(slot.contains(parse_hhmm("09:00").unwrap()));
        assert!(slot.contains(parse_hhmm("11:49").unwrap()));
        assert!(!slot.contains(parse_hhmm("11:50").unwrap())); // exclusive end
        assert_eq!(slot.duration(), chrono::Duration::minutes(170));
    }

    #[test]
    fn test_time_window_overlap_cases() {
        let slot = w("09:00", "11:50");
        // Blackout covering the start
        assert!(w("08:00", "10:00").overlaps(&slot));
        // Blackout covering the end
        assert!(w("11:00", "12:00").overlaps(&slot));
        // Blackout inside the slot
        assert!(w("10:00", "10:30").overlaps(&slot));
        // Blackout containing the slot
        assert!(w("09:00", "12:00").overlaps(&slot));
        // Touching is not overlapping
        assert!(!w("11:50", "13:00").overlaps(&slot));
        assert!(!w("07:00", "09:00").overlaps(&slot));
    }

    #[test]
    fn test_standard_slots() {
        let slots = standard_slots();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].to_string(), "09:00-11:50");
        assert_eq!(slots[1].to_string(), "13:00-15:50");
        assert!(!slots[0].overlaps(&slots[1]));
    }

    #[test]
    fn test_time_window_serde_hhmm() {
        let json = serde_json::to_string(&w("09:00", "11:50")).unwrap();
        assert_eq!(json, r#"{"start":"09:00","end":"11:50"}"#);
        let back: TimeWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w("09:00", "11:50"));
    }

    #[test]
    fn test_time_window_serde_rejects_inverted() {
        let inverted = serde_json::from_str::<TimeWindow>(r#"{"start":"12:00","end":"09:00"}"#);
        assert!(inverted.is_err());
        let empty = serde_json::from_str::<TimeWindow>(r#"{"start":"09:00","end":"09:00"}"#);
        assert!(empty.is_err());
        assert!(serde_json::from_str::<TimeWindow>(r#"{"start":"9:00","end":"11:50"}"#).is_ok());
    }
}
