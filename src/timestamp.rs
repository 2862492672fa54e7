//! Timestamp-valued flags.
//!
//! Text is parsed with a chrono `strftime` layout. Fields the layout leaves
//! without a zone are interpreted in the configured [`Location`], or in UTC
//! when there is none. Fields the layout does not mention take their zero
//! value: January, the first of the month, midnight, and year 0 for layouts
//! with no date at all.

use std::{any::Any, fmt, ops::Deref, str::FromStr};

use chrono::{
    format::{self, ParseResult, Parsed, StrftimeItems},
    DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::{
    command::Command,
    flag::{FlagBase, ValueCreator},
    value::{BoxError, Destination, TypedValue, Value},
};

/// Commonly used layouts.
pub mod layout {
    pub const DATE: &str = "%Y-%m-%d";
    pub const DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";
    pub const RFC3339: &str = "%Y-%m-%dT%H:%M:%S%:z";
}

pub type TimestampFlag = FlagBase<Timestamp, TimestampConfig, TimestampValue>;

/// Configuration of a [`TimestampFlag`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampConfig {
    pub timezone: Option<Location>,
    pub layout: String,
}

impl TimestampConfig {
    pub fn new(layout: impl Into<String>) -> TimestampConfig {
        TimestampConfig { timezone: None, layout: layout.into() }
    }

    pub fn timezone(mut self, location: Location) -> TimestampConfig {
        self.timezone = Some(location);
        self
    }
}

/// Where zone-free wall clock times are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Utc,
    /// The system time zone.
    Local,
    Fixed(FixedOffset),
    /// An IANA zone such as `Europe/Berlin`, with its daylight saving rules.
    Named(Tz),
}

impl Location {
    fn resolve(self, naive: NaiveDateTime) -> Result<DateTime<FixedOffset>, BoxError> {
        let resolved: Option<DateTime<FixedOffset>> = match self {
            Location::Utc => Some(Utc.from_utc_datetime(&naive).into()),
            Location::Local => Local.from_local_datetime(&naive).earliest().map(Into::into),
            Location::Fixed(offset) => offset.from_local_datetime(&naive).earliest(),
            Location::Named(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|it| it.with_timezone(&it.offset().fix())),
        };
        resolved.ok_or_else(|| NonexistentLocalTime(naive).into())
    }
}

impl From<FixedOffset> for Location {
    fn from(offset: FixedOffset) -> Location {
        Location::Fixed(offset)
    }
}

impl From<Tz> for Location {
    fn from(tz: Tz) -> Location {
        Location::Named(tz)
    }
}

/// Accepts `UTC`, `Z`, `Local`, IANA names such as `America/New_York` and
/// offsets such as `+05:30` or `-0800`.
impl FromStr for Location {
    type Err = InvalidLocation;

    fn from_str(s: &str) -> Result<Location, InvalidLocation> {
        match s {
            "UTC" | "utc" | "Z" => return Ok(Location::Utc),
            "Local" | "local" => return Ok(Location::Local),
            _ => (),
        }
        let err = || InvalidLocation(s.to_string());

        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return s.parse::<Tz>().map(Location::Named).map_err(|_| err()),
        };
        let (hours, minutes) = match rest.split_once(':') {
            Some(it) => it,
            None if rest.len() == 4 => rest.split_at(2),
            None => (rest, "0"),
        };
        let digits = |it: &str| it.len() <= 2 && it.bytes().all(|b| b.is_ascii_digit());
        if !digits(hours) || !digits(minutes) || hours.is_empty() || minutes.is_empty() {
            return Err(err());
        }
        let hours: i32 = hours.parse().map_err(|_| err())?;
        let minutes: i32 = minutes.parse().map_err(|_| err())?;
        if minutes >= 60 {
            return Err(err());
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Location::Fixed)
            .ok_or_else(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location `{0}`, expected `UTC`, `Local`, a zone name or an offset like `+05:30`")]
pub struct InvalidLocation(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} does not exist in the configured time zone")]
pub struct NonexistentLocalTime(NaiveDateTime);

/// A point in time with the offset it was written in.
///
/// The default value is [`Timestamp::zero`], which stands for "never set" and
/// renders as an empty string in help output.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// The "never set" value: the earliest instant chrono can represent.
    pub fn zero() -> Timestamp {
        Timestamp(DateTime::<Utc>::MIN_UTC.into())
    }

    pub fn is_zero(&self) -> bool {
        *self == Timestamp::zero()
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    pub fn into_datetime(self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl Default for Timestamp {
    fn default() -> Timestamp {
        Timestamp::zero()
    }
}

impl Deref for Timestamp {
    type Target = DateTime<FixedOffset>;

    fn deref(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(datetime: DateTime<Tz>) -> Timestamp {
        let offset = datetime.offset().fix();
        Timestamp(datetime.with_timezone(&offset))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            f.write_str("Timestamp(zero)")
        } else {
            f.debug_tuple("Timestamp").field(&self.0).finish()
        }
    }
}

/// Value object behind a [`TimestampFlag`].
pub struct TimestampValue {
    timestamp: Destination<Timestamp>,
    has_been_set: bool,
    layout: String,
    location: Option<Location>,
}

impl TimestampValue {
    /// The parsed timestamp, or the default if the flag was not set.
    pub fn value(&self) -> Timestamp {
        self.timestamp.get()
    }

    fn parse(&self, raw: &str) -> Result<Timestamp, BoxError> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, raw, StrftimeItems::new(&self.layout))?;
        fill_defaults(&mut parsed)?;
        if parsed.offset().is_some() {
            return Ok(Timestamp(parsed.to_datetime()?));
        }
        let naive = parsed.to_naive_datetime_with_offset(0)?;
        let datetime = self.location.unwrap_or(Location::Utc).resolve(naive)?;
        Ok(Timestamp(datetime))
    }
}

/// Zeroes the fields `parsed` is missing so that any layout yields an instant.
///
/// A Unix timestamp (`%s`) pins every field by itself and is read as UTC.
fn fill_defaults(parsed: &mut Parsed) -> ParseResult<()> {
    if parsed.timestamp().is_some() {
        if parsed.offset().is_none() {
            parsed.set_offset(0)?;
        }
        return Ok(());
    }
    let iso_week = parsed.isoyear().is_some() || parsed.isoweek().is_some();
    let week = parsed.week_from_sun().is_some() || parsed.week_from_mon().is_some();

    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some();
    if !has_year && !iso_week {
        parsed.set_year(0)?;
    }
    if parsed.month().is_none() && parsed.ordinal().is_none() && !iso_week && !week {
        parsed.set_month(1)?;
    }
    if parsed.day().is_none() && parsed.ordinal().is_none() && !iso_week && !week {
        parsed.set_day(1)?;
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        // `%I` without `%p` reads as AM.
        (None, Some(_)) => parsed.set_ampm(false)?,
        (Some(_), None) => parsed.set_hour12(12)?,
        (Some(_), Some(_)) => (),
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    Ok(())
}

impl ValueCreator<Timestamp, TimestampConfig> for TimestampValue {
    fn create(
        default: Timestamp,
        mut destination: Destination<Timestamp>,
        config: &TimestampConfig,
    ) -> TimestampValue {
        destination.put(default);
        TimestampValue {
            timestamp: destination,
            has_been_set: false,
            layout: config.layout.clone(),
            location: config.timezone,
        }
    }

    fn display(value: &Timestamp) -> String {
        if value.is_zero() {
            return String::new();
        }
        value.to_string()
    }
}

impl Value for TimestampValue {
    fn set(&mut self, raw: &str) -> Result<(), BoxError> {
        let timestamp = self.parse(raw)?;
        self.timestamp.put(timestamp);
        self.has_been_set = true;
        Ok(())
    }

    fn is_set(&self) -> bool {
        self.has_been_set
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedValue for TimestampValue {
    type Output = Timestamp;

    const KIND: &'static str = "timestamp";

    fn get(&self) -> Timestamp {
        self.value()
    }
}

impl fmt::Debug for TimestampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.timestamp.is_initialized() {
            fmt::Debug::fmt(&self.timestamp.get(), f)
        } else {
            f.write_str("Timestamp(uninitialized)")
        }
    }
}

impl Command {
    /// Looks up the timestamp flag `name` in the invoked command chain.
    pub fn timestamp(&self, name: &str) -> Option<Timestamp> {
        self.value::<TimestampValue>(name)
    }
}
