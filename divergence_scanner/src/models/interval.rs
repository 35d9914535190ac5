use std::{fmt, str::FromStr};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Invalid interval {input:?}: expected one of 1h, 4h, 1d")]
    InvalidInput { input: String },
}

/// Sampling interval of a candle series.
///
/// Only the periods the scanner is meant to run on are representable; the
/// serialized form is the short exchange code (`"1h"`, `"4h"`, `"1d"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1h")]
    OneHour,
    #[default]
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    pub const ALL: [Interval; 3] = [Interval::OneHour, Interval::FourHours, Interval::OneDay];

    /// Short code, identical to the Binance kline interval parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneHour => "1h",
            Interval::FourHours => "4h",
            Interval::OneDay => "1d",
        }
    }

    /// Length of one sampling period.
    pub fn duration(&self) -> Duration {
        match self {
            Interval::OneHour => Duration::hours(1),
            Interval::FourHours => Duration::hours(4),
            Interval::OneDay => Duration::days(1),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1h" | "60m" | "1hour" => Ok(Interval::OneHour),
            "4h" | "240m" | "4hour" => Ok(Interval::FourHours),
            "1d" | "d" | "24h" | "1day" => Ok(Interval::OneDay),
            _ => Err(IntervalError::InvalidInput {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_codes() {
        assert_eq!("1h".parse::<Interval>().unwrap(), Interval::OneHour);
        assert_eq!("4h".parse::<Interval>().unwrap(), Interval::FourHours);
        assert_eq!("1d".parse::<Interval>().unwrap(), Interval::OneDay);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(" 60m ".parse::<Interval>().unwrap(), Interval::OneHour);
        assert_eq!("4HOUR".parse::<Interval>().unwrap(), Interval::FourHours);
        assert_eq!("24h".parse::<Interval>().unwrap(), Interval::OneDay);
        assert_eq!("D".parse::<Interval>().unwrap(), Interval::OneDay);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            "15m".parse::<Interval>(),
            Err(IntervalError::InvalidInput {
                input: "15m".to_string()
            })
        );
        assert!("".parse::<Interval>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for interval in Interval::ALL {
            assert_eq!(interval.to_string().parse::<Interval>().unwrap(), interval);
        }
    }

    #[test]
    fn test_serde_uses_short_code() {
        assert_eq!(serde_json::to_string(&Interval::OneDay).unwrap(), "\"1d\"");
        let parsed: Interval = serde_json::from_str("\"1h\"").unwrap();
        assert_eq!(parsed, Interval::OneHour);
    }

    #[test]
    fn test_duration() {
        assert_eq!(Interval::FourHours.duration(), Duration::hours(4));
        assert_eq!(Interval::OneDay.duration(), Duration::hours(24));
    }
}
