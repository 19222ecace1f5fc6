use chrono::{NaiveDate, Weekday};

use crate::calendar::DateRange;
use crate::ids::ResortId;
use crate::resort::{DayCategory, HolidayWeek, Resort, RoomPoints, Season};

pub(crate) fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub(crate) fn range(a: &str, b: &str) -> DateRange {
    DateRange::new(d(a), d(b)).unwrap()
}

fn points(two: u32, three: u32) -> RoomPoints {
    RoomPoints::from([("2BR".into(), two), ("3BR".into(), three)])
}

fn low_season() -> Season {
    let mut s = Season::new("Low Season").unwrap();
    s.set_day_category(
        DayCategory::new("Fri-Sat", vec![Weekday::Fri, Weekday::Sat])
            .unwrap()
            .with_points(points(700, 900)),
    )
    .unwrap();
    s.set_day_category(
        DayCategory::new(
            "Sun-Thu",
            vec![
                Weekday::Sun,
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
            ],
        )
        .unwrap()
        .with_points(points(300, 400)),
    )
    .unwrap();
    s.set_full_week("2BR", Some(2850)).unwrap();
    s
}

/// Two published years. 2025 opens with an unpublished Jan 1-2 and closes with a
/// New Year week that runs into 2026. Independence Day has no 3BR price.
pub(crate) fn newport() -> Resort {
    let mut r = Resort::new(
        ResortId::parse("newport-coast-villas").unwrap(),
        "Newport Coast Villas",
        "America/Los_Angeles".parse().unwrap(),
    )
    .unwrap();

    r.add_year(2025).unwrap();
    let y = r.year_mut(2025).unwrap();
    y.upsert_season(low_season()).unwrap();
    y.add_season_period("Low Season", range("2025-01-03", "2025-07-03"))
        .unwrap();
    y.add_season_period("Low Season", range("2025-07-11", "2025-12-18"))
        .unwrap();
    y.upsert_holiday(
        HolidayWeek::new("Independence Day", range("2025-07-04", "2025-07-10"))
            .unwrap()
            .with_points(RoomPoints::from([("2BR".into(), 4950)])),
    )
    .unwrap();
    y.upsert_holiday(
        HolidayWeek::new("Christmas", range("2025-12-19", "2025-12-25"))
            .unwrap()
            .with_points(points(4950, 6000)),
    )
    .unwrap();
    y.upsert_holiday(
        HolidayWeek::new("New Year's Eve/Day", range("2025-12-26", "2026-01-01"))
            .unwrap()
            .with_points(points(5200, 6400)),
    )
    .unwrap();

    r.add_year(2026).unwrap();
    let y = r.year_mut(2026).unwrap();
    y.upsert_season(low_season()).unwrap();
    y.add_season_period("Low Season", range("2026-01-02", "2026-12-31"))
        .unwrap();
    r
}
