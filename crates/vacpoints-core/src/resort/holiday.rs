use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::error::DomainError;
use crate::resort::season::{check_points, check_table, RoomPoints};

/// Fixed named week that overrides season pricing. Points cover the whole week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHolidayWeek")]
pub struct HolidayWeek {
    name: String,
    #[serde(flatten)]
    dates: DateRange,
    #[serde(default)]
    room_points: RoomPoints,
}

#[derive(Deserialize)]
struct RawHolidayWeek {
    name: String,
    #[serde(flatten)]
    dates: DateRange,
    #[serde(default)]
    room_points: RoomPoints,
}

impl TryFrom<RawHolidayWeek> for HolidayWeek {
    type Error = DomainError;

    fn try_from(raw: RawHolidayWeek) -> Result<Self, Self::Error> {
        check_table(&raw.room_points)?;
        Ok(Self::new(&raw.name, raw.dates)?.with_points(raw.room_points))
    }
}

impl HolidayWeek {
    pub fn new(name: &str, dates: DateRange) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            dates,
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

    pub fn dates(&self) -> DateRange {
        self.dates
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.dates.contains(day)
    }

    pub fn room_points(&self) -> &RoomPoints {
        &self.room_points
    }

    pub fn points_for(&self, room: &str) -> u32 {
        self.room_points.get(room).copied().unwrap_or(0)
    }

    pub fn set_room_points(&mut self, room: &str, points: u32) -> Result<(), DomainError> {
        check_points(points)?;
        self.room_points.insert(room.to_string(), points);
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), DomainError> {
        check_table(&self.room_points)
    }

    pub(crate) fn set_dates(&mut self, dates: DateRange) {
        self.dates = dates;
    }

    pub(crate) fn room_points_mut(&mut self) -> &mut RoomPoints {
        &mut self.room_points
    }
}
