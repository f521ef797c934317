//! Per-day occurrence records and their grouping by date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// One all-day event placed on one calendar day.
///
/// A multi-day or recurring event produces several records sharing a `uid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub title: String,
    pub location: String,
    pub uid: String,
}

/// Occurrences keyed by day, in ascending date order.
pub type OccurrenceMap = BTreeMap<NaiveDate, Vec<Occurrence>>;

/// ## Summary
/// Groups records by date.
///
/// Records on the same day keep the order they were given in.
#[must_use]
pub fn group_by_date(records: impl IntoIterator<Item = Occurrence>) -> OccurrenceMap {
    let mut map = OccurrenceMap::new();
    for record in records {
        map.entry(record.date).or_default().push(record);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, uid: &str) -> Occurrence {
        Occurrence {
            date: NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
            title: format!("Event {uid}"),
            location: String::new(),
            uid: uid.to_string(),
        }
    }

    #[test]
    fn groups_by_day_in_ascending_order() {
        let map = group_by_date(vec![record(3, "a"), record(1, "b"), record(3, "c")]);

        let days: Vec<_> = map.keys().map(ToString::to_string).collect();
        assert_eq!(days, vec!["2025-09-01", "2025-09-03"]);

        let third: Vec<_> = map[&record(3, "x").date].iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(third, vec!["a", "c"]);
    }

    #[test]
    fn empty_input_gives_empty_map() {
        assert!(group_by_date(Vec::new()).is_empty());
    }

    #[test]
    fn map_serializes_with_iso_keys() {
        let json = serde_json::to_value(group_by_date(vec![record(1, "a")])).unwrap();
        assert_eq!(json["2025-09-01"][0]["date"], "2025-09-01");
        assert_eq!(json["2025-09-01"][0]["title"], "Event a");
    }
}
