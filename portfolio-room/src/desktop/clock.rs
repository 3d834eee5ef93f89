use bevy::prelude::*;
use chrono::{Local, NaiveTime};
use constants::sequencer::CLOCK_TICK_SECONDS;

/// Taskbar clock, refreshed on a fixed tick while the desktop is up.
#[derive(Resource)]
pub struct TaskbarClock {
    pub timer: Timer,
    pub text: String,
}

impl Default for TaskbarClock {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(CLOCK_TICK_SECONDS, TimerMode::Repeating),
            text: current_clock_text(),
        }
    }
}

/// 12-hour "h:mm AM" format.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Local wall-clock time. On wasm chrono reads the browser's timezone.
pub fn current_clock_text() -> String {
    format_clock(Local::now().time())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn formats_twelve_hour_clock() {
        assert_eq!(format_clock(at(0, 5)), "12:05 AM");
        assert_eq!(format_clock(at(9, 30)), "9:30 AM");
        assert_eq!(format_clock(at(12, 0)), "12:00 PM");
        assert_eq!(format_clock(at(23, 59)), "11:59 PM");
    }

    #[test]
    fn current_text_parses_back_as_a_time() {
        let text = current_clock_text();
        assert!(NaiveTime::parse_from_str(&text, "%-I:%M %p").is_ok(), "{text}");
    }
}
