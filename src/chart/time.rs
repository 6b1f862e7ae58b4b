use std::time::Duration;

/// strftime-style format of time axis ticks for a bucket width in ms.
pub fn time_format(granularity: u64) -> &'static str {
    if granularity < 1000 {
        "%H:%M:%S.%L"
    } else {
        "%H:%M:%S"
    }
}

pub fn elapsed_time_label(granularity: u64) -> String {
    format!(
        "Elapsed Time (granularity: {})",
        humantime::format_duration(Duration::from_millis(granularity))
    )
}

/// Converts an axis time format into the chrono dialect. Only the
/// millisecond directive differs.
pub(crate) fn chrono_format(format: &str) -> String {
    format.replace(".%L", "%.3f").replace("%L", "%3f")
}
