//! Game clock parsing.
//!
//! The official feed encodes the clock as an ISO-8601 duration token
//! (`PT05M32.00S`); the broadcaster feed already sends a display string
//! (`"5:32"`, `"45.3"`, `"END"`). Both end up as `M:SS` on a `GameState`,
//! and the regime classifier needs the display form as fractional minutes.

/// Convert an official-feed duration token to `M:SS`.
///
/// Fractions are truncated, so `PT00M59.90S` is `0:59`. Empty input gives an
/// empty string; anything unparseable is returned unchanged.
pub fn parse_iso_clock(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let body = raw.strip_prefix("PT").unwrap_or(raw);
    let body = body.strip_suffix('S').unwrap_or(body);

    let parsed = match body.split_once('M') {
        Some((minutes, seconds)) => whole(minutes).zip(if seconds.is_empty() {
            Some(0)
        } else {
            whole(seconds)
        }),
        None => whole(body).map(|seconds| (0, seconds)),
    };

    match parsed {
        Some((minutes, seconds)) => format!("{minutes}:{seconds:02}"),
        None => raw.to_owned(),
    }
}

/// Minutes left on a display clock, or `None` when the clock can't be read.
///
/// `None` means "unknown" and must not be treated as zero: only the explicit
/// end-of-period tokens map to `0.0`.
pub fn minutes_remaining(display: &str) -> Option<f64> {
    if is_expired(display) {
        return Some(0.0);
    }
    match display.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = minutes.parse::<u32>().ok()?;
            let seconds = non_negative(seconds)?;
            Some(f64::from(minutes) + seconds / 60.0)
        }
        // Sub-minute clocks come through bare: "45.3".
        None => non_negative(display).map(|seconds| seconds / 60.0),
    }
}

fn is_expired(display: &str) -> bool {
    display.is_empty()
        || display == "0.0"
        || display.eq_ignore_ascii_case("END")
        || display.eq_ignore_ascii_case("FINAL")
}

fn non_negative(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|x| x.is_finite() && *x >= 0.0)
}

fn whole(s: &str) -> Option<u64> {
    non_negative(s).map(|x| x.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_clock_with_minutes() {
        assert_eq!(parse_iso_clock("PT05M32.00S"), "5:32");
        assert_eq!(parse_iso_clock("PT12M00.00S"), "12:00");
        assert_eq!(parse_iso_clock("PT00M59.90S"), "0:59");
    }

    #[test]
    fn iso_clock_zero() {
        assert_eq!(parse_iso_clock("PT00M00.00S"), "0:00");
    }

    #[test]
    fn iso_clock_empty() {
        assert_eq!(parse_iso_clock(""), "");
    }

    #[test]
    fn iso_clock_seconds_only() {
        assert_eq!(parse_iso_clock("PT45.20S"), "0:45");
        assert_eq!(parse_iso_clock("PT7S"), "0:07");
    }

    #[test]
    fn iso_clock_minutes_without_seconds() {
        assert_eq!(parse_iso_clock("PT03M"), "3:00");
    }

    #[test]
    fn iso_clock_garbage_is_returned_unchanged() {
        assert_eq!(parse_iso_clock("halftime"), "halftime");
        assert_eq!(parse_iso_clock("PTxxMyyS"), "PTxxMyyS");
        assert_eq!(parse_iso_clock("PT-1M00S"), "PT-1M00S");
        assert_eq!(parse_iso_clock("PTinfS"), "PTinfS");
    }

    #[test]
    fn display_clock_minutes_and_seconds() {
        assert_eq!(minutes_remaining("2:30"), Some(2.5));
        assert_eq!(minutes_remaining("12:00"), Some(12.0));
        assert_eq!(minutes_remaining("0:30"), Some(0.5));
    }

    #[test]
    fn display_clock_bare_seconds() {
        assert_eq!(minutes_remaining("30"), Some(0.5));
        let m = minutes_remaining("45.3").unwrap();
        assert!((m - 45.3 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn display_clock_end_tokens_are_zero() {
        for token in ["END", "end", "Final", "FINAL", "", "0.0"] {
            assert_eq!(minutes_remaining(token), Some(0.0), "token {token:?}");
        }
    }

    #[test]
    fn display_clock_malformed_is_unknown() {
        for token in ["Halftime", "5:xx", "a:30", "1:2:3", "-4:00", "NaN"] {
            assert_eq!(minutes_remaining(token), None, "token {token:?}");
        }
    }
}
