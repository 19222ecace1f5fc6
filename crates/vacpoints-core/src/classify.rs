use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar::{merge_days, DateRange};
use crate::resort::{DayCategory, HolidayWeek, Resort, Season};

/// Pricing bucket a single date falls into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Bucket {
    Holiday { name: String, dates: DateRange },
    Season { name: String, rate_class: String },
}

impl Bucket {
    pub fn name(&self) -> &str {
        match self {
            Self::Holiday { name, .. } | Self::Season { name, .. } => name,
        }
    }

    pub fn is_holiday(&self) -> bool {
        matches!(self, Self::Holiday { .. })
    }
}

/// Borrowed price source for one date.
#[derive(Debug, Clone, Copy)]
pub enum DailyRate<'a> {
    Holiday(&'a HolidayWeek),
    Night {
        season: &'a Season,
        category: &'a DayCategory,
    },
}

impl DailyRate<'_> {
    pub fn bucket(&self) -> Bucket {
        match self {
            Self::Holiday(h) => Bucket::Holiday {
                name: h.name().to_string(),
                dates: h.dates(),
            },
            Self::Night { season, category } => Bucket::Season {
                name: season.name().to_string(),
                rate_class: category.name().to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub date: NaiveDate,
    pub buckets: Vec<String>,
}

/// Result of walking every day of a year through the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub year: i32,
    pub gaps: Vec<DateRange>,
    pub conflicts: Vec<Conflict>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty() && self.conflicts.is_empty()
    }

    pub fn gap_days(&self) -> i64 {
        self.gaps.iter().map(DateRange::len_days).sum()
    }
}

impl Resort {
    /// Holiday weeks that contain `day`. Weeks filed under the previous year count
    /// when they run past New Year.
    pub fn holidays_on(&self, day: NaiveDate) -> impl Iterator<Item = &HolidayWeek> {
        [day.year() - 1, day.year()]
            .into_iter()
            .filter_map(move |y| self.year(y))
            .flat_map(|y| y.holidays())
            .filter(move |h| h.contains(day))
    }

    /// Holiday weeks overlapping `range`, ordered by start date.
    pub fn holidays_within(&self, range: &DateRange) -> Vec<&HolidayWeek> {
        let mut weeks: Vec<&HolidayWeek> = (range.start().year() - 1..=range.end().year())
            .filter_map(|y| self.year(y))
            .flat_map(|y| y.holidays())
            .filter(|h| h.dates().overlaps(range))
            .collect();
        weeks.sort_by_key(|h| h.dates());
        weeks
    }

    pub fn daily_rate(&self, day: NaiveDate) -> Option<DailyRate<'_>> {
        if let Some(holiday) = self.holidays_on(day).next() {
            return Some(DailyRate::Holiday(holiday));
        }
        let season = self
            .year(day.year())?
            .seasons()
            .iter()
            .find(|s| s.contains(day))?;
        let category = season.category_for(day.weekday())?;
        Some(DailyRate::Night { season, category })
    }

    pub fn classify(&self, day: NaiveDate) -> Option<Bucket> {
        self.daily_rate(day).map(|rate| rate.bucket())
    }

    /// Check that every day of `year` resolves to exactly one bucket.
    pub fn coverage(&self, year: i32) -> CoverageReport {
        let mut gaps = Vec::new();
        let mut conflicts = Vec::new();
        let days = DateRange::year(year).into_iter().flat_map(|r| r.days());

        for day in days {
            let holidays: Vec<&HolidayWeek> = self.holidays_on(day).collect();
            if holidays.len() > 1 {
                conflicts.push(Conflict {
                    date: day,
                    buckets: holidays.iter().map(|h| h.name().to_string()).collect(),
                });
                continue;
            }
            if holidays.len() == 1 {
                continue;
            }

            let seasons: Vec<&Season> = self
                .year(year)
                .map(|y| y.seasons().iter().filter(|s| s.contains(day)).collect())
                .unwrap_or_default();
            match seasons.as_slice() {
                [] => gaps.push(day),
                [season] => {
                    if season.category_for(day.weekday()).is_none() {
                        gaps.push(day);
                    }
                }
                _ => conflicts.push(Conflict {
                    date: day,
                    buckets: seasons.iter().map(|s| s.name().to_string()).collect(),
                }),
            }
        }

        CoverageReport {
            year,
            gaps: merge_days(gaps),
            conflicts,
        }
    }
}
