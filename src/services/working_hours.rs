use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;

/// First hour of the working day, inclusive.
pub const OPEN_HOUR: u32 = 9;
/// End of the working day, exclusive.
pub const CLOSE_HOUR: u32 = 20;

/// True when the current wall-clock time in `tz` falls inside the
/// working window (Monday-Friday, 9:00-20:00).
pub fn is_working_time(tz: Tz) -> bool {
    is_working_at(Utc::now().with_timezone(&tz))
}

/// Classifies a specific local instant against the working window.
pub fn is_working_at(local: DateTime<Tz>) -> bool {
    let on_weekday = !matches!(local.weekday(), Weekday::Sat | Weekday::Sun);
    on_weekday && (OPEN_HOUR..CLOSE_HOUR).contains(&local.hour())
}
