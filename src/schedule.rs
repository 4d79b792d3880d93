use std::{fmt, str::FromStr};

use jiff::{
    SignedDuration, Timestamp,
    civil::{Date, DateTime, Time},
    tz::TimeZone,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Minimum separation between two screenings in the same room.
pub const CONFLICT_WINDOW: SignedDuration = SignedDuration::from_hours(3);

/// Two start times collide when they are strictly closer than the window.
pub fn conflicts(a: Timestamp, b: Timestamp) -> bool {
    a.duration_since(b).abs() < CONFLICT_WINDOW
}

/// Parses a screening start. Offsets are honoured; a bare civil date-time (or
/// date) is read as UTC.
pub fn parse_moment(raw: &str) -> AppResult<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(ts);
    }
    let civil = raw
        .parse::<DateTime>()
        .or_else(|_| raw.parse::<Date>().map(|d| d.to_datetime(Time::midnight())))
        .map_err(|_| AppError::validation(format!("Date invalide: {raw}")))?;
    let zoned = civil
        .to_zoned(TimeZone::UTC)
        .map_err(|_| AppError::validation(format!("Date invalide: {raw}")))?;
    Ok(zoned.timestamp())
}

/// Calendar day (UTC) of anything [`parse_moment`] accepts.
pub fn parse_day(raw: &str) -> AppResult<Date> {
    Ok(day_of(parse_moment(raw)?))
}

pub fn day_of(ts: Timestamp) -> Date {
    ts.to_zoned(TimeZone::UTC).date()
}

/// Normalizes a seance start to `HH:MM`.
pub fn parse_heure(raw: &str) -> AppResult<String> {
    let time: Time =
        raw.trim().parse().map_err(|_| AppError::validation(format!("Heure invalide: {raw}")))?;
    Ok(format!("{:02}:{:02}", time.hour(), time.minute()))
}

/// Day of a weekly seance. Declaration order is the display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Weekday {
    #[serde(rename = "Lundi")]
    Monday,
    #[serde(rename = "Mardi")]
    Tuesday,
    #[serde(rename = "Mercredi")]
    Wednesday,
    #[serde(rename = "Jeudi")]
    Thursday,
    #[serde(rename = "Vendredi")]
    Friday,
    #[serde(rename = "Samedi")]
    Saturday,
    #[serde(rename = "Dimanche")]
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Lundi",
            Weekday::Tuesday => "Mardi",
            Weekday::Wednesday => "Mercredi",
            Weekday::Thursday => "Jeudi",
            Weekday::Friday => "Vendredi",
            Weekday::Saturday => "Samedi",
            Weekday::Sunday => "Dimanche",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::validation(format!("Jour invalide: {s}")))
    }
}

impl TryFrom<String> for Weekday {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
