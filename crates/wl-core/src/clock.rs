//! Minute-of-day time model and clock conversions.
//!
//! All times are stored as [`MinuteOfDay`], an integer in `[0, 1440)` counting
//! minutes since local midnight. Text forms (`h:mm AM/PM` and `HH:MM`) only exist
//! at the edges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Start time suggested for the first entry of a day (9:00 AM).
pub const DEFAULT_START: MinuteOfDay = MinuteOfDay(9 * 60);

/// Errors produced when a clock value cannot be turned into a minute of day.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// A clock field was not a number.
    #[error("{field} is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    /// Hour outside the allowed range for the clock in use.
    #[error("hour must be between {min} and {max}, got {hour}")]
    HourOutOfRange { hour: i64, min: u8, max: u8 },

    /// Minute outside 0..=59.
    #[error("minute must be between 0 and 59, got {minute}")]
    MinuteOutOfRange { minute: i64 },

    /// Meridiem was neither AM nor PM.
    #[error("unknown meridiem: {value:?} (expected AM or PM)")]
    UnknownMeridiem { value: String },

    /// Text did not look like a clock time at all.
    #[error("invalid time: {value:?} (expected HH:MM or h:mm AM/PM)")]
    Malformed { value: String },

    /// A raw minute count outside `[0, 1440)`.
    #[error("minute of day must be below {MINUTES_PER_DAY}, got {minutes}")]
    OutOfDay { minutes: u16 },
}

/// Half of the day on a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Meridiem {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Self::Am),
            "PM" => Ok(Self::Pm),
            _ => Err(TimeError::UnknownMeridiem {
                value: s.to_string(),
            }),
        }
    }
}

/// Minutes since local midnight, always in `[0, 1440)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Midnight.
    pub const MIDNIGHT: Self = Self(0);

    /// Creates a minute of day, rejecting values at or past 1440.
    pub const fn new(minutes: u16) -> Result<Self, TimeError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(TimeError::OutOfDay { minutes });
        }
        Ok(Self(minutes))
    }

    /// Creates a minute of day from a 24-hour clock reading.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::HourOutOfRange {
                hour: hour.into(),
                min: 0,
                max: 23,
            });
        }
        if minute > 59 {
            return Err(TimeError::MinuteOutOfRange {
                minute: minute.into(),
            });
        }
        Ok(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Creates a minute of day from a 12-hour clock reading.
    ///
    /// `12 AM` is midnight and `12 PM` is noon.
    pub fn from_12h(hour: u8, minute: u8, meridiem: Meridiem) -> Result<Self, TimeError> {
        if !(1..=12).contains(&hour) {
            return Err(TimeError::HourOutOfRange {
                hour: hour.into(),
                min: 1,
                max: 12,
            });
        }
        let hour24 = match (meridiem, hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        };
        Self::from_hm(hour24, minute)
    }

    /// Returns the raw minute count.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Splits into a 12-hour clock reading.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "hour < 24 and minute < 60 by construction"
    )]
    pub const fn to_12h(self) -> (u8, u8, Meridiem) {
        let hour24 = (self.0 / 60) as u8;
        let minute = (self.0 % 60) as u8;
        let meridiem = if hour24 >= 12 { Meridiem::Pm } else { Meridiem::Am };
        let hour12 = match hour24 % 12 {
            0 => 12,
            h => h,
        };
        (hour12, minute, meridiem)
    }

    /// Renders as zero-padded 24-hour `HH:MM`.
    #[must_use]
    pub fn to_24h_string(self) -> String {
        format!("{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<u16> for MinuteOfDay {
    type Error = TimeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinuteOfDay> for u16 {
    fn from(value: MinuteOfDay) -> Self {
        value.0
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, minute, meridiem) = self.to_12h();
        write!(f, "{hour}:{minute:02} {meridiem}")
    }
}

/// Parses either `h:mm AM/PM` (space optional, any case) or 24-hour `HH:MM`.
impl FromStr for MinuteOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let upper = text.to_ascii_uppercase();
        let Some(clock) = upper
            .strip_suffix("AM")
            .or_else(|| upper.strip_suffix("PM"))
        else {
            return parse_clock_time_24(text);
        };
        let meridiem = &upper[clock.len()..];
        let Some((hour, minute)) = clock.trim_end().split_once(':') else {
            return Err(TimeError::Malformed {
                value: s.to_string(),
            });
        };
        parse_clock_time(hour, minute, meridiem)
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<i64, TimeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::NotNumeric {
            field,
            value: value.to_string(),
        });
    }
    trimmed.parse().map_err(|_| TimeError::NotNumeric {
        field,
        value: value.to_string(),
    })
}

/// Converts 12-hour clock fields, as entered by a user, into a minute of day.
///
/// Fails when either number is non-numeric, the hour is outside 1..=12, the
/// minute is outside 0..=59, or the meridiem is not AM/PM.
pub fn parse_clock_time(hour: &str, minute: &str, meridiem: &str) -> Result<MinuteOfDay, TimeError> {
    let hour = parse_field("hour", hour)?;
    let minute = parse_field("minute", minute)?;
    let meridiem: Meridiem = meridiem.parse()?;

    let hour = u8::try_from(hour)
        .ok()
        .filter(|h| (1..=12).contains(h))
        .ok_or(TimeError::HourOutOfRange {
            hour,
            min: 1,
            max: 12,
        })?;
    let minute = u8::try_from(minute)
        .ok()
        .filter(|m| *m <= 59)
        .ok_or(TimeError::MinuteOutOfRange { minute })?;

    MinuteOfDay::from_12h(hour, minute, meridiem)
}

/// Converts 24-hour `HH:MM` text into a minute of day.
///
/// The hour may be one or two digits; the minute must be exactly two.
pub fn parse_clock_time_24(text: &str) -> Result<MinuteOfDay, TimeError> {
    let malformed = || TimeError::Malformed {
        value: text.to_string(),
    };
    let (hour, minute) = text.trim().split_once(':').ok_or_else(malformed)?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return Err(malformed());
    }
    let hour = parse_field("hour", hour)?;
    let minute = parse_field("minute", minute)?;

    let hour = u8::try_from(hour)
        .ok()
        .filter(|h| *h <= 23)
        .ok_or(TimeError::HourOutOfRange {
            hour,
            min: 0,
            max: 23,
        })?;
    let minute = u8::try_from(minute)
        .ok()
        .filter(|m| *m <= 59)
        .ok_or(TimeError::MinuteOutOfRange { minute })?;

    MinuteOfDay::from_hm(hour, minute)
}

/// Renders any minute count as `h:mm AM/PM`, wrapping it into a single day first.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "rem_euclid result is in [0, 1440)"
)]
pub fn format_minutes_of_day(minutes: i64) -> String {
    let normalized = minutes.rem_euclid(i64::from(MINUTES_PER_DAY)) as u16;
    MinuteOfDay(normalized).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_hour_anchor_points() {
        assert_eq!(parse_clock_time("12", "0", "AM").unwrap().minutes(), 0);
        assert_eq!(parse_clock_time("12", "0", "PM").unwrap().minutes(), 720);
        assert_eq!(parse_clock_time("1", "30", "PM").unwrap().minutes(), 810);
        assert_eq!(parse_clock_time("11", "59", "pm").unwrap().minutes(), 1439);
    }

    #[test]
    fn twelve_hour_round_trip() {
        for hour in 1..=12u8 {
            for minute in 0..=59u8 {
                for meridiem in ["AM", "PM"] {
                    let parsed =
                        parse_clock_time(&hour.to_string(), &minute.to_string(), meridiem)
                            .unwrap();
                    assert_eq!(
                        format_minutes_of_day(i64::from(parsed.minutes())),
                        format!("{hour}:{minute:02} {meridiem}")
                    );
                }
            }
        }
    }

    #[test]
    fn twelve_hour_rejects_out_of_range() {
        assert_eq!(
            parse_clock_time("0", "15", "AM"),
            Err(TimeError::HourOutOfRange {
                hour: 0,
                min: 1,
                max: 12
            })
        );
        assert!(matches!(
            parse_clock_time("13", "00", "PM"),
            Err(TimeError::HourOutOfRange { hour: 13, .. })
        ));
        assert_eq!(
            parse_clock_time("9", "60", "AM"),
            Err(TimeError::MinuteOutOfRange { minute: 60 })
        );
    }

    #[test]
    fn twelve_hour_rejects_non_numeric() {
        assert!(matches!(
            parse_clock_time("nine", "00", "AM"),
            Err(TimeError::NotNumeric { field: "hour", .. })
        ));
        assert!(matches!(
            parse_clock_time("9", "", "AM"),
            Err(TimeError::NotNumeric { field: "minute", .. })
        ));
        assert!(matches!(
            parse_clock_time("-1", "00", "AM"),
            Err(TimeError::NotNumeric { .. })
        ));
        assert!(matches!(
            parse_clock_time("9", "00", "noon"),
            Err(TimeError::UnknownMeridiem { .. })
        ));
    }

    #[test]
    fn twenty_four_hour_parses() {
        assert_eq!(parse_clock_time_24("00:00").unwrap().minutes(), 0);
        assert_eq!(parse_clock_time_24("09:05").unwrap().minutes(), 545);
        assert_eq!(parse_clock_time_24("9:05").unwrap().minutes(), 545);
        assert_eq!(parse_clock_time_24("23:59").unwrap().minutes(), 1439);
    }

    #[test]
    fn twenty_four_hour_rejects_malformed() {
        assert!(matches!(
            parse_clock_time_24("0900"),
            Err(TimeError::Malformed { .. })
        ));
        assert!(matches!(
            parse_clock_time_24("9:5"),
            Err(TimeError::Malformed { .. })
        ));
        assert!(matches!(
            parse_clock_time_24("ab:cd"),
            Err(TimeError::NotNumeric { .. })
        ));
        assert!(matches!(
            parse_clock_time_24("24:00"),
            Err(TimeError::HourOutOfRange { hour: 24, .. })
        ));
        assert!(matches!(
            parse_clock_time_24("12:60"),
            Err(TimeError::MinuteOutOfRange { minute: 60 })
        ));
    }

    #[test]
    fn twenty_four_hour_string_round_trips() {
        for minutes in [0, 59, 60, 545, 720, 1439] {
            let time = MinuteOfDay::new(minutes).unwrap();
            assert_eq!(parse_clock_time_24(&time.to_24h_string()).unwrap(), time);
        }
    }

    #[test]
    fn format_wraps_out_of_range_input() {
        assert_eq!(format_minutes_of_day(0), "12:00 AM");
        assert_eq!(format_minutes_of_day(720), "12:00 PM");
        assert_eq!(format_minutes_of_day(1440), "12:00 AM");
        assert_eq!(format_minutes_of_day(-60), "11:00 PM");
        assert_eq!(format_minutes_of_day(1440 + 545), "9:05 AM");
    }

    #[test]
    fn to_12h_splits_fields() {
        assert_eq!(MinuteOfDay::MIDNIGHT.to_12h(), (12, 0, Meridiem::Am));
        assert_eq!(
            MinuteOfDay::new(810).unwrap().to_12h(),
            (1, 30, Meridiem::Pm)
        );
    }

    #[test]
    fn from_str_accepts_both_clocks() {
        let cases = [
            ("5:30 PM", 1050),
            ("5:30pm", 1050),
            (" 12:00 am ", 0),
            ("17:30", 1050),
            ("09:00", 540),
        ];
        for (text, expected) in cases {
            let parsed: MinuteOfDay = text.parse().unwrap();
            assert_eq!(parsed.minutes(), expected, "parsing {text:?}");
        }
        assert!("5pm".parse::<MinuteOfDay>().is_err());
        assert!("13:00 PM".parse::<MinuteOfDay>().is_err());
    }

    #[test]
    fn serde_rejects_out_of_day_minutes() {
        let parsed: MinuteOfDay = serde_json::from_str("1439").unwrap();
        assert_eq!(parsed.minutes(), 1439);
        assert!(serde_json::from_str::<MinuteOfDay>("1440").is_err());
    }
}
