use chrono::DateTime;
use chrono_tz::Tz;
use std::time::Duration;
use tracing::info;

/// Logs an inbound group message event with consistent format
pub fn log_message_event(chat_title: &str, tz: Tz, local: &DateTime<Tz>, working: bool) {
    info!(
        "MSG_EVENT: chat '{}' tz {} local {} working {}",
        chat_title,
        tz.name(),
        local.format("%Y-%m-%d %H:%M:%S"),
        working
    );
}

/// Logs table-builder progress with consistent format
pub fn log_fetch_progress(resolved: usize, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    let rate = if secs > 0.0 { resolved as f64 / secs } else { 0.0 };
    info!("FETCH_PROGRESS: {} cities resolved - {:.1} cities/sec", resolved, rate);
}
