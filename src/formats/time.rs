/// `HH:MM:SS,mmm`; hours widen past two digits instead of wrapping.
pub fn format_srt_timestamp(seconds: f64) -> String {
    format_timestamp(seconds_to_ms(seconds), ',')
}

/// `M:SS` with floored seconds, as used in script block labels.
pub fn format_clock_label(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0).floor() as u64;
    let min = total_seconds / 60;
    let sec = total_seconds % 60;
    format!("{min}:{sec:02}")
}

// Rounded to the nearest millisecond so offsets like 1.001 do not print as ",000".
fn seconds_to_ms(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0).round() as u64
}

fn format_timestamp(ms: u64, ms_sep: char) -> String {
    let total_seconds = ms / 1000;
    let milli = ms % 1000;

    let sec = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let min = total_minutes % 60;
    let hour = total_minutes / 60;

    format!("{hour:02}:{min:02}:{sec:02}{ms_sep}{milli:03}")
}
