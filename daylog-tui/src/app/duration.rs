use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid duration '{0}', use e.g. 1h 30m, 45m or 2h")]
pub struct InvalidDuration(String);

/// The server refuses entries longer than a day.
pub const MAX_MINUTES: u32 = 24 * 60;

/// Parses `1h 30m`, `1h30m`, `2h`, `45m` or a bare number of minutes, up to
/// [`MAX_MINUTES`].
///
/// Blank input means no duration.
pub fn parse_duration(input: &str) -> Result<Option<u32>, InvalidDuration> {
    match parse_minutes(input)? {
        Some(minutes) if minutes > MAX_MINUTES => Err(InvalidDuration(input.trim().to_string())),
        parsed => Ok(parsed),
    }
}

fn parse_minutes(input: &str) -> Result<Option<u32>, InvalidDuration> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    if compact.is_empty() {
        return Ok(None);
    }

    let invalid = || InvalidDuration(input.trim().to_string());

    if let Ok(minutes) = compact.parse::<u32>() {
        return Ok(Some(minutes));
    }

    let mut total: u32 = 0;
    let mut digits = String::new();
    let mut seen_hours = false;
    let mut seen_minutes = false;

    for c in compact.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'h' if !seen_hours && !seen_minutes && !digits.is_empty() => {
                let hours: u32 = digits.parse().map_err(|_| invalid())?;
                total = hours
                    .checked_mul(60)
                    .and_then(|m| total.checked_add(m))
                    .ok_or_else(invalid)?;
                digits.clear();
                seen_hours = true;
            }
            'm' if !seen_minutes && !digits.is_empty() => {
                let minutes: u32 = digits.parse().map_err(|_| invalid())?;
                total = total.checked_add(minutes).ok_or_else(invalid)?;
                digits.clear();
                seen_minutes = true;
            }
            _ => return Err(invalid()),
        }
    }

    if !digits.is_empty() {
        return Err(invalid());
    }
    Ok(Some(total))
}

/// `1h 30m`, `2h` or `45m`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hours_and_minutes() {
        assert_eq!(parse_duration(""), Ok(None));
        assert_eq!(parse_duration("  "), Ok(None));
        assert_eq!(parse_duration("45"), Ok(Some(45)));
        assert_eq!(parse_duration("45m"), Ok(Some(45)));
        assert_eq!(parse_duration("2h"), Ok(Some(120)));
        assert_eq!(parse_duration("1h 30m"), Ok(Some(90)));
        assert_eq!(parse_duration("1H30M"), Ok(Some(90)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("30m 1h").is_err());
        assert!(parse_duration("1h 30").is_err());
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn rejects_more_than_a_day() {
        assert_eq!(parse_duration("24h"), Ok(Some(MAX_MINUTES)));
        assert!(parse_duration("24h 1m").is_err());
        assert!(parse_duration("2147483647").is_err());
    }

    #[test]
    fn formats_like_the_summary() {
        assert_eq!(format_duration(90), "1h 30m");
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(0), "0m");
    }
}
