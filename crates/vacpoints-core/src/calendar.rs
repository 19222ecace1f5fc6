use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Closed date interval: both `start` and `end` are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DomainError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Range covering `nights` consecutive days starting at `start`.
    pub fn from_nights(start: NaiveDate, nights: u32) -> Self {
        let last = i64::from(nights.max(1)) - 1;
        Self {
            start,
            end: start + Duration::days(last),
        }
    }

    /// Jan 1 through Dec 31 of `year`.
    pub fn year(year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn intersection(&self, other: &DateRange) -> Option<DateRange> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// Smallest range covering both.
    pub fn union(&self, other: &DateRange) -> DateRange {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let len = self.len_days() as usize;
        self.start.iter_days().take(len)
    }

    /// Move both ends by `days`. Shifting by a multiple of 7 keeps weekdays.
    pub fn shifted(&self, days: i64) -> DateRange {
        Self {
            start: self.start + Duration::days(days),
            end: self.end + Duration::days(days),
        }
    }

    pub fn starts_in(&self, year: i32) -> bool {
        self.start.year() == year
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Collapse an ascending sequence of days into runs of consecutive days.
pub fn merge_days(days: impl IntoIterator<Item = NaiveDate>) -> Vec<DateRange> {
    let mut runs: Vec<DateRange> = Vec::new();
    for day in days {
        match runs.last_mut() {
            Some(run) if run.end + Duration::days(1) == day => run.end = day,
            _ => runs.push(DateRange::single(day)),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn range(a: &str, b: &str) -> DateRange {
        DateRange::new(d(a), d(b)).unwrap()
    }

    #[test]
    fn new_rejects_end_before_start() {
        let result = DateRange::new(d("2025-02-20"), d("2025-02-14"));
        assert_eq!(
            result,
            Err(DomainError::InvalidDateRange {
                start: d("2025-02-20"),
                end: d("2025-02-14"),
            })
        );
    }

    #[test]
    fn contains_is_closed_on_both_ends() {
        let r = range("2025-02-14", "2025-02-20");
        assert!(r.contains(d("2025-02-14")));
        assert!(r.contains(d("2025-02-20")));
        assert!(!r.contains(d("2025-02-13")));
        assert!(!r.contains(d("2025-02-21")));
    }

    #[test]
    fn overlap_touching_ends_counts() {
        let a = range("2025-01-03", "2025-01-30");
        let b = range("2025-01-30", "2025-02-05");
        let c = range("2025-01-31", "2025-02-05");
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.intersection(&b), Some(DateRange::single(d("2025-01-30"))));
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn len_and_days_agree() {
        let r = range("2024-02-27", "2024-03-02");
        assert_eq!(r.len_days(), 5);
        let days: Vec<_> = r.days().collect();
        assert_eq!(days.len(), 5);
        assert_eq!(days[2], d("2024-02-29"));
    }

    #[test]
    fn shifted_by_52_weeks_keeps_weekday() {
        use chrono::Datelike;
        let r = range("2025-11-21", "2025-11-27");
        let next = r.shifted(364);
        assert_eq!(next, range("2026-11-20", "2026-11-26"));
        assert_eq!(next.start().weekday(), r.start().weekday());
    }

    #[test]
    fn from_nights_covers_last_night() {
        let r = DateRange::from_nights(d("2025-12-30"), 4);
        assert_eq!(r, range("2025-12-30", "2026-01-02"));
    }

    #[test]
    fn merge_days_groups_consecutive_runs() {
        let runs = merge_days([
            d("2025-01-01"),
            d("2025-01-02"),
            d("2025-03-01"),
            d("2025-03-02"),
            d("2025-03-03"),
        ]);
        assert_eq!(
            runs,
            vec![
                range("2025-01-01", "2025-01-02"),
                range("2025-03-01", "2025-03-03")
            ]
        );
    }

    #[test]
    fn deserialize_validates_order() {
        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2025-01-03","end":"2025-01-30"}"#).unwrap();
        assert_eq!(ok.len_days(), 28);

        let bad: Result<DateRange, _> =
            serde_json::from_str(r#"{"start":"2025-01-30","end":"2025-01-03"}"#);
        assert!(bad.is_err());
    }
}
