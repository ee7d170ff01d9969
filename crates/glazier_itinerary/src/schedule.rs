use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::stop::Stop;

/// Lowercases and collapses whitespace. Blank labels are no label.
pub fn normalize_area(label: &str) -> Option<String> {
    let normalized = label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    (!normalized.is_empty()).then_some(normalized)
}

/// One calendar day of the job board: its area tag and its stops in display order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct ScheduleDay {
    pub date: Date,
    pub area: Option<String>,
    pub stops: Vec<Stop>,
}

impl ScheduleDay {
    pub fn normalized_area(&self) -> Option<String> {
        self.area.as_deref().and_then(normalize_area)
    }
}

/// A maximal run of day-adjacent dates that share an area label. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    area: String,
    dates: Vec<Date>,
}

impl Block {
    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    pub fn start(&self) -> Date {
        self.dates[0]
    }

    pub fn end(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn contains(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }

    /// `start_end`, e.g. `2026-03-02_2026-03-04`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.start(), self.end())
    }

    /// Member days' stops concatenated in date order, each day in its own display order.
    pub fn stops(&self, days: &[ScheduleDay]) -> Vec<Stop> {
        self.dates
            .iter()
            .filter_map(|date| days.iter().find(|day| day.date == *date))
            .flat_map(|day| day.stops.iter().cloned())
            .collect()
    }

    fn extends_to(&self, date: Date, area: &str) -> bool {
        self.area == area && self.end().tomorrow().ok() == Some(date)
    }
}

/// Groups days into blocks of at least two strictly consecutive dates with the same
/// non-empty area. A gap of one or more days ends a block even if the label comes back.
pub fn find_blocks(days: &[ScheduleDay]) -> Vec<Block> {
    let mut dated = days
        .iter()
        .map(|day| (day.date, day.normalized_area()))
        .collect::<Vec<_>>();
    dated.sort_by_key(|(date, _)| *date);
    dated.dedup_by_key(|(date, _)| *date);

    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (date, area) in dated {
        let extends = match (&current, &area) {
            (Some(block), Some(area)) => block.extends_to(date, area),
            _ => false,
        };

        if extends {
            if let Some(block) = current.as_mut() {
                block.dates.push(date);
            }
            continue;
        }

        if let Some(block) = current.take() {
            if block.len() >= 2 {
                blocks.push(block);
            }
        }

        current = area.map(|area| Block {
            area,
            dates: vec![date],
        });
    }

    if let Some(block) = current {
        if block.len() >= 2 {
            blocks.push(block);
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::test_utils;

    fn day(date: Date, area: Option<&str>) -> ScheduleDay {
        ScheduleDay {
            date,
            area: area.map(str::to_string),
            stops: vec![],
        }
    }

    #[test]
    fn test_normalize_area() {
        assert_eq!(normalize_area("  Lake   District "), Some("lake district".to_string()));
        assert_eq!(normalize_area("LAKES"), Some("lakes".to_string()));
        assert_eq!(normalize_area("   "), None);
    }

    #[test]
    fn test_consecutive_days_with_same_area_form_a_block() {
        let days = vec![
            day(date(2026, 3, 2), Some("Lakes")),
            day(date(2026, 3, 3), Some(" lakes ")),
            day(date(2026, 3, 4), Some("LAKES")),
            day(date(2026, 3, 5), Some("Dales")),
        ];

        let blocks = find_blocks(&days);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].area(), "lakes");
        assert_eq!(blocks[0].len(), 3);
        assert_eq!(blocks[0].label(), "2026-03-02_2026-03-04");
    }

    #[test]
    fn test_gap_breaks_block() {
        let days = vec![
            day(date(2026, 3, 2), Some("Lakes")),
            day(date(2026, 3, 4), Some("Lakes")),
            day(date(2026, 3, 5), Some("Lakes")),
        ];

        let blocks = find_blocks(&days);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start(), date(2026, 3, 4));
        assert!(!blocks[0].contains(date(2026, 3, 2)));
    }

    #[test]
    fn test_unlabelled_days_never_join() {
        let days = vec![
            day(date(2026, 3, 2), None),
            day(date(2026, 3, 3), None),
            day(date(2026, 3, 4), Some("  ")),
        ];

        assert!(find_blocks(&days).is_empty());
    }

    #[test]
    fn test_single_labelled_day_is_not_a_block() {
        let days = vec![
            day(date(2026, 3, 2), Some("Lakes")),
            day(date(2026, 3, 3), Some("Dales")),
        ];

        assert!(find_blocks(&days).is_empty());
    }

    #[test]
    fn test_unsorted_input_and_month_boundary() {
        let days = vec![
            day(date(2026, 3, 1), Some("Coast")),
            day(date(2026, 2, 28), Some("Coast")),
        ];

        let blocks = find_blocks(&days);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].label(), "2026-02-28_2026-03-01");
    }

    #[test]
    fn test_block_stops_follow_date_then_display_order() {
        let stops = test_utils::create_stops(3);
        let days = vec![
            ScheduleDay {
                date: date(2026, 3, 3),
                area: Some("Lakes".to_string()),
                stops: vec![stops[2].clone()],
            },
            ScheduleDay {
                date: date(2026, 3, 2),
                area: Some("Lakes".to_string()),
                stops: vec![stops[0].clone(), stops[1].clone()],
            },
        ];

        let blocks = find_blocks(&days);
        let ids = blocks[0]
            .stops(&days)
            .into_iter()
            .map(|stop| stop.id)
            .collect::<Vec<_>>();

        assert_eq!(ids, vec!["job-1", "job-2", "job-3"]);
    }
}
