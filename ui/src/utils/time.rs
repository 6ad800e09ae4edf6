use jiff::{Timestamp, civil::DateTime, tz::TimeZone};

/// Layout of `<input type="datetime-local">` values.
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Value for a datetime-local input, in the browser's timezone.
pub fn to_input_value(timestamp: Option<Timestamp>) -> String {
    timestamp
        .map(|ts| {
            ts.to_zoned(TimeZone::system())
                .datetime()
                .strftime(INPUT_FORMAT)
                .to_string()
        })
        .unwrap_or_default()
}

/// Read a datetime-local input value as local time. Empty or unparsable
/// values give None.
pub fn from_input_value(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let datetime: DateTime = value.parse().ok()?;
    datetime
        .to_zoned(TimeZone::system())
        .ok()
        .map(|zoned| zoned.timestamp())
}

/// Date and time for listing cards, e.g. "01/06/2025 10:00".
pub fn format_timestamp(timestamp: Timestamp) -> String {
    timestamp
        .to_zoned(TimeZone::system())
        .strftime("%d/%m/%Y %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_value_round_trip_keeps_minutes() {
        let ts = from_input_value("2025-06-01T10:30").unwrap();
        assert_eq!(to_input_value(Some(ts)), "2025-06-01T10:30");
    }

    #[test]
    fn empty_and_invalid_inputs() {
        assert_eq!(from_input_value(""), None);
        assert_eq!(from_input_value("mañana"), None);
        assert_eq!(to_input_value(None), "");
    }
}
