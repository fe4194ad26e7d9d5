//! DOS-packed time and date fields used by [`crate::short_entry::ShortEntry`].
//!
//! Encoding is local-time-as-stored with no timezone normalization. This
//! module only knows about the bit layout; it never reads the system clock.

use crate::error::Error;

/// A DOS-packed time: `hours<<11 | minutes<<5 | seconds/2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FatTime(pub u16);

/// A DOS-packed date: `(year-1980)<<9 | month<<5 | day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FatDate(pub u16);

impl FatTime {
    /// Pack `hours:minutes:seconds` into DOS time.
    ///
    /// Out-of-range components are rejected with [`Error::InvalidTimestamp`]
    /// unless the `compat-clamp-time` feature is enabled, in which case they
    /// are clamped into the representable range. Seconds are stored with
    /// 2-second granularity; odd seconds round down.
    pub fn pack(hours: u8, minutes: u8, seconds: u8) -> Result<Self, Error> {
        let (hours, minutes, seconds) = clamp_or_reject(
            hours,
            minutes,
            seconds,
            (0, 23),
            (0, 59),
            (0, 59),
        )?;
        let packed = (hours as u16) << 11 | (minutes as u16) << 5 | (seconds as u16 / 2);
        Ok(Self(packed))
    }

    pub fn hours(self) -> u8 {
        (self.0 >> 11) as u8
    }

    pub fn minutes(self) -> u8 {
        ((self.0 >> 5) & 0x3f) as u8
    }

    /// Seconds, always even (2-second granularity).
    pub fn seconds(self) -> u8 {
        (self.0 & 0x1f) as u8 * 2
    }
}

impl FatDate {
    /// Pack a `year/month/day` into DOS date.
    ///
    /// `year` is a full year (e.g. `2026`); the DOS epoch is 1980, and
    /// the representable range is 1980..=2107. Out-of-range components
    /// follow the same reject-or-clamp rule as [`FatTime::pack`].
    pub fn pack(year: u16, month: u8, day: u8) -> Result<Self, Error> {
        let (month, day) = clamp_or_reject_date(year, month, day)?;
        let year_field = year_field(year)?;
        let packed = year_field << 9 | (month as u16) << 5 | day as u16;
        Ok(Self(packed))
    }

    pub fn year(self) -> u16 {
        (self.0 >> 9) + 1980
    }

    pub fn month(self) -> u8 {
        ((self.0 >> 5) & 0x0f) as u8
    }

    pub fn day(self) -> u8 {
        (self.0 & 0x1f) as u8
    }
}

fn year_field(year: u16) -> Result<u16, Error> {
    if year < 1980 {
        #[cfg(feature = "compat-clamp-time")]
        return Ok(0);
        #[cfg(not(feature = "compat-clamp-time"))]
        return Err(Error::InvalidTimestamp);
    }
    let field = year - 1980;
    if field > 0x7f {
        #[cfg(feature = "compat-clamp-time")]
        return Ok(0x7f);
        #[cfg(not(feature = "compat-clamp-time"))]
        return Err(Error::InvalidTimestamp);
    }
    Ok(field)
}

fn clamp_or_reject(
    hours: u8,
    minutes: u8,
    seconds: u8,
    hours_range: (u8, u8),
    minutes_range: (u8, u8),
    seconds_range: (u8, u8),
) -> Result<(u8, u8, u8), Error> {
    let in_range = hours <= hours_range.1
        && minutes <= minutes_range.1
        && seconds <= seconds_range.1;
    if in_range {
        return Ok((hours, minutes, seconds));
    }
    #[cfg(feature = "compat-clamp-time")]
    {
        Ok((
            hours.min(hours_range.1),
            minutes.min(minutes_range.1),
            seconds.min(seconds_range.1),
        ))
    }
    #[cfg(not(feature = "compat-clamp-time"))]
    {
        Err(Error::InvalidTimestamp)
    }
}

fn clamp_or_reject_date(year: u16, month: u8, day: u8) -> Result<(u8, u8), Error> {
    let in_range = (1..=12).contains(&month) && (1..=31).contains(&day) && year >= 1980;
    if in_range {
        return Ok((month, day));
    }
    #[cfg(feature = "compat-clamp-time")]
    {
        Ok((month.clamp(1, 12), day.clamp(1, 31)))
    }
    #[cfg(not(feature = "compat-clamp-time"))]
    {
        Err(Error::InvalidTimestamp)
    }
}

#[cfg(feature = "std")]
impl FatTime {
    pub fn from_chrono(time: chrono::NaiveTime) -> Result<Self, Error> {
        use chrono::Timelike;
        Self::pack(time.hour() as u8, time.minute() as u8, time.second() as u8)
    }

    /// The hand-rolled bit-packing above remains the canonical encoder;
    /// this is a convenience layered on top for callers already working
    /// with `chrono`.
    pub fn to_chrono(self) -> Option<chrono::NaiveTime> {
        chrono::NaiveTime::from_hms_opt(
            self.hours() as u32,
            self.minutes() as u32,
            self.seconds() as u32,
        )
    }
}

#[cfg(feature = "std")]
impl FatDate {
    pub fn from_chrono(date: chrono::NaiveDate) -> Result<Self, Error> {
        use chrono::Datelike;
        Self::pack(date.year() as u16, date.month() as u8, date.day() as u8)
    }

    pub fn to_chrono(self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::from_ymd_opt(self.year() as i32, self.month() as u32, self.day() as u32)
    }
}
