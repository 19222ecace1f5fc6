use chrono::{NaiveDate, Weekday};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("name must not be empty")]
    EmptyName,
    #[error("name already in use: {0}")]
    DuplicateName(String),
    #[error("{0} overlaps an existing period")]
    OverlappingPeriod(String),
    #[error("{0} is claimed by more than one rate class")]
    WeekdayClaimedTwice(Weekday),
    #[error("rate class requires at least one weekday")]
    RateClassRequiresWeekday,
    #[error("{points} points exceeds the limit of {max}")]
    PointsOutOfRange { points: u32, max: u32 },
    #[error("total points overflow")]
    PointsOverflow,
    #[error("year {0} is not published")]
    UnknownYear(i32),
    #[error("year {0} already exists")]
    YearExists(i32),
    #[error("season not found: {0}")]
    UnknownSeason(String),
    #[error("rate class not found: {0}")]
    UnknownRateClass(String),
    #[error("holiday not found: {0}")]
    UnknownHoliday(String),
    #[error("period not found: {0}")]
    UnknownPeriod(String),
    #[error("stay must be between 1 and {max} nights, got {nights}")]
    InvalidStayLength { nights: u32, max: u32 },
    #[error("at least one room type is required")]
    NoRoomTypes,
}
