use anyhow::{anyhow, Result};
use hifitime::{Epoch, Unit, UNIX_REF_EPOCH};

/// Time capability used by the client and the dashboard builder, so tests
/// can run against an injected clock instead of the system one.
pub trait Clock: Send + Sync {
    /// The current wall-clock time.
    fn now(&self) -> Epoch;

    /// Parse an ISO 8601 timestamp, such as a scenario start date.
    fn parse_timestamp(&self, text: &str) -> Result<Epoch>;
}

/// The production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Epoch {
        Epoch::now().unwrap_or(UNIX_REF_EPOCH)
    }

    fn parse_timestamp(&self, text: &str) -> Result<Epoch> {
        parse_iso8601_epoch(text)
    }
}

pub fn epoch_from_unix_milliseconds(timestamp: i64) -> Epoch {
    Epoch::from_utc_duration(UNIX_REF_EPOCH.to_utc_duration() + timestamp * Unit::Millisecond)
}

pub fn epoch_to_unix_milliseconds(epoch: Epoch) -> i64 {
    epoch.to_unix_milliseconds().floor() as i64
}

fn parse_iso8601_epoch(text: &str) -> Result<Epoch> {
    let datetime =
        iso8601::datetime(text).map_err(|err| anyhow!("invalid timestamp {text:?}: {err}"))?;
    convert_iso8601_to_epoch(datetime)
}

fn convert_iso8601_to_epoch(datetime: iso8601::DateTime) -> Result<Epoch> {
    let iso8601::DateTime { date, time } = datetime;
    let (year, month, day) = match date {
        iso8601::Date::YMD { year, month, day } => (year, month as u8, day as u8),
        iso8601::Date::Week { year, .. } | iso8601::Date::Ordinal { year, .. } => (year, 1, 1),
    };
    let iso8601::Time {
        hour,
        minute,
        second,
        millisecond,
        tz_offset_hours,
        tz_offset_minutes,
    } = time;

    let nanos = millisecond * 1_000_000_u32;
    let mut epoch = Epoch::maybe_from_gregorian_utc(
        year,
        month,
        day,
        hour as u8,
        minute as u8,
        second as u8,
        nanos,
    )
    .map_err(|err| anyhow!("timestamp out of range: {err}"))?;

    // The parsed fields are local to the offset; subtract it to get UTC.
    if tz_offset_hours != 0 {
        epoch -= Unit::Hour * tz_offset_hours as i64;
    }
    if tz_offset_minutes != 0 {
        epoch -= Unit::Minute * tz_offset_minutes as i64;
    }

    // Week and ordinal dates carry their day information outside the YMD
    // fields.
    match date {
        iso8601::Date::YMD { .. } => {}
        iso8601::Date::Week { ww, d, .. } => {
            epoch += Unit::Day * (7 * (ww as i64 - 1) + (d as i64 - 1));
        }
        iso8601::Date::Ordinal { ddd, .. } => {
            epoch += Unit::Day * (ddd as i64 - 1);
        }
    }

    Ok(epoch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milliseconds_roundtrip() {
        for &input_ms in &[0_i64, 1000, 1704067200000, 1704067200123] {
            let epoch = epoch_from_unix_milliseconds(input_ms);
            assert_eq!(epoch_to_unix_milliseconds(epoch), input_ms);
        }
    }

    #[test]
    fn test_parse_utc_timestamp() {
        let epoch = SystemClock.parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(epoch_to_unix_milliseconds(epoch), 1704067200000);
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        // 01:00 at +01:00 is midnight UTC.
        let epoch = SystemClock
            .parse_timestamp("2024-01-01T01:00:00+01:00")
            .unwrap();
        assert_eq!(epoch_to_unix_milliseconds(epoch), 1704067200000);
    }

    #[test]
    fn test_parse_timestamp_with_milliseconds() {
        let epoch = SystemClock
            .parse_timestamp("2024-01-01T00:00:00.250Z")
            .unwrap();
        assert_eq!(epoch_to_unix_milliseconds(epoch), 1704067200250);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SystemClock.parse_timestamp("not a date").is_err());
        assert!(SystemClock.parse_timestamp("").is_err());
    }

    #[test]
    fn test_system_clock_is_current() {
        let now = SystemClock.now();
        assert!(epoch_to_unix_milliseconds(now) > 1704067200000);
    }
}
