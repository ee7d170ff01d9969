use crate::{
    schedule::normalize_area,
    stop::{Depot, Stop},
};

/// Normalized, order sensitive signature of everything an itinerary depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItineraryCacheKey(String);

/// Separators inside free text are backslash escaped so no field can end early.
fn escape_field(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '|' | '@' | ',') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn normalize_text(value: &str) -> String {
    escape_field(&value.trim().to_lowercase())
}

fn format_coordinate(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value:.6}"),
        _ => "-".to_string(),
    }
}

impl ItineraryCacheKey {
    pub fn new(label: &str, area: Option<&str>, base: &Depot, stops: &[Stop]) -> Self {
        let mut key = format!(
            "{}|{}|{},{}|{}",
            normalize_text(label),
            escape_field(&area.and_then(normalize_area).unwrap_or_default()),
            format_coordinate(Some(base.lat)),
            format_coordinate(Some(base.lng)),
            normalize_text(&base.address),
        );

        for stop in stops {
            key.push_str(&format!(
                "|{}@{},{}@{}",
                escape_field(stop.id.trim()),
                format_coordinate(stop.lat),
                format_coordinate(stop.lng),
                normalize_text(&stop.address),
            ));
        }

        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
