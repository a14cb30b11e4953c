//! Display formatting for timers and the stopwatch.
//!
//! All widgets surface remaining/elapsed time as text; the conventions are
//! `MM:SS` for the session timer, `HH:MM:SS` for long countdowns, and
//! `MM:SS.cc` (centiseconds) for the stopwatch.

/// Format whole seconds as `MM:SS`.
///
/// Minutes are not capped at 59: a 90-minute session renders as `90:00`.
pub fn mm_ss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format whole seconds as `HH:MM:SS`, dropping the hour field when zero.
pub fn hms(secs: u32) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Format milliseconds as `MM:SS.cc`, with an hour field once elapsed
/// time passes one hour.
pub fn stopwatch_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    let centis = (ms % 1000) / 10;
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}.{centis:02}")
    } else {
        format!("{m:02}:{s:02}.{centis:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mm_ss_pads_both_fields() {
        assert_eq!(mm_ss(0), "00:00");
        assert_eq!(mm_ss(65), "01:05");
        assert_eq!(mm_ss(25 * 60), "25:00");
    }

    #[test]
    fn mm_ss_does_not_cap_minutes() {
        assert_eq!(mm_ss(90 * 60), "90:00");
    }

    #[test]
    fn hms_drops_zero_hours() {
        assert_eq!(hms(5 * 60), "05:00");
        assert_eq!(hms(3661), "01:01:01");
    }

    #[test]
    fn stopwatch_renders_centiseconds() {
        assert_eq!(stopwatch_ms(0), "00:00.00");
        assert_eq!(stopwatch_ms(61_230), "01:01.23");
        assert_eq!(stopwatch_ms(3_600_000), "01:00:00.00");
    }
}
