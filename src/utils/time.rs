//! Time and timezone offset utilities

/// Parse a display offset into minutes east of UTC
///
/// Accepts `+05:30`, `-08:00`, `+0530`, `Z`, or a plain minute count such
/// as `330` or `-480`.
pub fn parse_tz_offset(input: &str) -> Option<i32> {
    let s = input.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Some(0);
    }

    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => (1, s),
    };

    let (hours, minutes) = if let Some((h, m)) = rest.split_once(':') {
        (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?)
    } else if rest.len() == 4 && rest.is_ascii() && (s.starts_with('+') || s.starts_with('-')) {
        (rest[..2].parse::<i32>().ok()?, rest[2..].parse::<i32>().ok()?)
    } else {
        return rest.parse::<i32>().ok().map(|m| sign * m);
    };

    if !(0..60).contains(&minutes) || !(0..24).contains(&hours) {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

/// Format minutes east of UTC as `+HH:MM`
pub fn format_tz_offset(minutes: i32) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colon_form() {
        assert_eq!(parse_tz_offset("+05:30"), Some(330));
        assert_eq!(parse_tz_offset("-08:00"), Some(-480));
        assert_eq!(parse_tz_offset("00:00"), Some(0));
    }

    #[test]
    fn test_parse_compact_and_minutes() {
        assert_eq!(parse_tz_offset("+0530"), Some(330));
        assert_eq!(parse_tz_offset("330"), Some(330));
        assert_eq!(parse_tz_offset("-480"), Some(-480));
        assert_eq!(parse_tz_offset("Z"), Some(0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_tz_offset(""), None);
        assert_eq!(parse_tz_offset("+05:75"), None);
        assert_eq!(parse_tz_offset("IST"), None);
        assert_eq!(parse_tz_offset("+1\u{e9}1"), None);
        assert_eq!(parse_tz_offset("-\u{e9}\u{e9}"), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_tz_offset(330), "+05:30");
        assert_eq!(format_tz_offset(-480), "-08:00");
        assert_eq!(format_tz_offset(0), "+00:00");
    }
}
