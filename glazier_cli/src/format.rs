/// `12.3 km`
pub fn format_distance_km(meters: u64) -> String {
    format!("{:.1} km", meters as f64 / 1000.0)
}

/// `1h 05m`, or `45m` under an hour. Seconds are rounded to the nearest minute.
pub fn format_duration(seconds: u64) -> String {
    let minutes = (seconds + 30) / 60;
    let (hours, minutes) = (minutes / 60, minutes % 60);

    if hours == 0 {
        format!("{minutes}m")
    } else {
        format!("{hours}h {minutes:02}m")
    }
}
