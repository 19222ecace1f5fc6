use std::collections::{BTreeMap, HashSet};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::error::DomainError;

/// Room type -> points.
pub type RoomPoints = BTreeMap<String, u32>;

/// Largest value a single price table entry may hold.
pub const MAX_POINTS: u32 = 1_000_000;

pub(crate) fn check_points(points: u32) -> Result<(), DomainError> {
    if points > MAX_POINTS {
        return Err(DomainError::PointsOutOfRange {
            points,
            max: MAX_POINTS,
        });
    }
    Ok(())
}

pub(crate) fn check_table(table: &RoomPoints) -> Result<(), DomainError> {
    table.values().try_for_each(|points| check_points(*points))
}

pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A rate class inside a season ("Fri-Sat", "Sun-Thu", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDayCategory")]
pub struct DayCategory {
    name: String,
    days: Vec<Weekday>,
    #[serde(default)]
    room_points: RoomPoints,
}

#[derive(Deserialize)]
struct RawDayCategory {
    name: String,
    days: Vec<Weekday>,
    #[serde(default)]
    room_points: RoomPoints,
}

impl TryFrom<RawDayCategory> for DayCategory {
    type Error = DomainError;

    fn try_from(raw: RawDayCategory) -> Result<Self, Self::Error> {
        check_table(&raw.room_points)?;
        Ok(Self::new(&raw.name, raw.days)?.with_points(raw.room_points))
    }
}

impl DayCategory {
    pub fn new(name: &str, days: Vec<Weekday>) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        let mut seen = HashSet::new();
        let days: Vec<Weekday> = days.into_iter().filter(|d| seen.insert(*d)).collect();
        if days.is_empty() {
            return Err(DomainError::RateClassRequiresWeekday);
        }
        Ok(Self {
            name: name.to_string(),
            days,
            room_points: RoomPoints::new(),
        })
    }

    pub fn with_points(mut self, room_points: RoomPoints) -> Self {
        self.room_points = room_points;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn applies_to(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    pub fn room_points(&self) -> &RoomPoints {
        &self.room_points
    }

    pub fn points_for(&self, room: &str) -> u32 {
        self.room_points.get(room).copied().unwrap_or(0)
    }

    pub(crate) fn room_points_mut(&mut self) -> &mut RoomPoints {
        &mut self.room_points
    }
}

/// Named season with its date periods and per-weekday rate classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSeason")]
pub struct Season {
    name: String,
    #[serde(default)]
    periods: Vec<DateRange>,
    #[serde(default)]
    day_categories: Vec<DayCategory>,
    /// Published 7-night price; falls back to the sum of the weekdays when absent.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    full_week: RoomPoints,
}

#[derive(Deserialize)]
struct RawSeason {
    name: String,
    #[serde(default)]
    periods: Vec<DateRange>,
    #[serde(default)]
    day_categories: Vec<DayCategory>,
    #[serde(default)]
    full_week: RoomPoints,
}

impl TryFrom<RawSeason> for Season {
    type Error = DomainError;

    fn try_from(raw: RawSeason) -> Result<Self, Self::Error> {
        let mut season = Self::new(&raw.name)?;
        season.periods = raw.periods;
        season.day_categories = raw.day_categories;
        season.full_week = raw.full_week;
        season.validate()?;
        Ok(season)
    }
}

impl Season {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            periods: vec![],
            day_categories: vec![],
            full_week: RoomPoints::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn periods(&self) -> &[DateRange] {
        &self.periods
    }

    pub fn day_categories(&self) -> &[DayCategory] {
        &self.day_categories
    }

    pub fn full_week(&self) -> &RoomPoints {
        &self.full_week
    }

    pub fn contains(&self, day: chrono::NaiveDate) -> bool {
        self.periods.iter().any(|p| p.contains(day))
    }

    pub fn category_for(&self, day: Weekday) -> Option<&DayCategory> {
        self.day_categories.iter().find(|c| c.applies_to(day))
    }

    pub fn category(&self, name: &str) -> Option<&DayCategory> {
        self.day_categories.iter().find(|c| c.name == name)
    }

    /// 7-night points: one night of every weekday, each priced by its rate class.
    /// Saturates at `u32::MAX`; validated tables stay far below it.
    pub fn weekly_points(&self, room: &str) -> u32 {
        WEEK.iter()
            .filter_map(|d| self.category_for(*d))
            .map(|c| c.points_for(room))
            .fold(0, u32::saturating_add)
    }

    pub fn full_week_points(&self, room: &str) -> u32 {
        self.full_week
            .get(room)
            .copied()
            .unwrap_or_else(|| self.weekly_points(room))
    }

    pub fn room_types(&self) -> impl Iterator<Item = &str> {
        self.day_categories
            .iter()
            .flat_map(|c| c.room_points.keys())
            .chain(self.full_week.keys())
            .map(String::as_str)
    }

    /// Replace the rate class of the same name, or add it.
    pub fn set_day_category(&mut self, category: DayCategory) -> Result<(), DomainError> {
        for other in self.day_categories.iter().filter(|c| c.name != category.name) {
            if let Some(day) = category.days.iter().find(|d| other.applies_to(**d)) {
                return Err(DomainError::WeekdayClaimedTwice(*day));
            }
        }
        match self
            .day_categories
            .iter_mut()
            .find(|c| c.name == category.name)
        {
            Some(existing) => *existing = category,
            None => self.day_categories.push(category),
        }
        Ok(())
    }

    pub fn remove_day_category(&mut self, name: &str) -> Result<DayCategory, DomainError> {
        let pos = self
            .day_categories
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| DomainError::UnknownRateClass(name.into()))?;
        Ok(self.day_categories.remove(pos))
    }

    pub fn set_room_points(
        &mut self,
        rate_class: &str,
        room: &str,
        points: u32,
    ) -> Result<(), DomainError> {
        check_points(points)?;
        let category = self
            .day_categories
            .iter_mut()
            .find(|c| c.name == rate_class)
            .ok_or_else(|| DomainError::UnknownRateClass(rate_class.into()))?;
        category.room_points.insert(room.to_string(), points);
        Ok(())
    }

    pub fn set_full_week(&mut self, room: &str, points: Option<u32>) -> Result<(), DomainError> {
        match points {
            Some(p) => {
                check_points(p)?;
                self.full_week.insert(room.to_string(), p);
            }
            None => {
                self.full_week.remove(room);
            }
        }
        Ok(())
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn periods_mut(&mut self) -> &mut Vec<DateRange> {
        &mut self.periods
    }

    pub(crate) fn point_tables_mut(&mut self) -> impl Iterator<Item = &mut RoomPoints> {
        self.day_categories
            .iter_mut()
            .map(DayCategory::room_points_mut)
            .chain(std::iter::once(&mut self.full_week))
    }

    /// Day categories must not claim a weekday twice; every price stays within `MAX_POINTS`.
    pub(crate) fn validate(&self) -> Result<(), DomainError> {
        let mut claimed = HashSet::new();
        for day in self.day_categories.iter().flat_map(|c| c.days.iter()) {
            if !claimed.insert(*day) {
                return Err(DomainError::WeekdayClaimedTwice(*day));
            }
        }
        for category in &self.day_categories {
            check_table(&category.room_points)?;
        }
        check_table(&self.full_week)
    }
}
