use serde::Serialize;

use crate::classify::DailyRate;
use crate::error::DomainError;
use crate::ids::ResortId;
use crate::resort::{Resort, RoomPoints};

/// Rate class holding the 7-night price of a season.
pub const FULL_WEEK: &str = "Full Week";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    Season,
    Holiday,
}

impl<'a> DailyRate<'a> {
    /// Points of every room type for this date's rate class or holiday week.
    pub fn room_points(&self) -> &'a RoomPoints {
        match self {
            Self::Holiday(h) => h.room_points(),
            Self::Night { category, .. } => category.room_points(),
        }
    }

    pub fn points_for(&self, room: &str) -> u32 {
        self.room_points().get(room).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingRow {
    pub bucket: String,
    pub kind: BucketKind,
    pub rate_class: String,
    pub room_points: RoomPoints,
}

/// Published point chart of one resort year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingTable {
    pub resort: ResortId,
    pub year: i32,
    pub room_types: Vec<String>,
    pub rows: Vec<PricingRow>,
}

impl PricingTable {
    pub fn points(&self, bucket: &str, rate_class: &str, room: &str) -> Option<u32> {
        self.rows
            .iter()
            .find(|r| r.bucket == bucket && r.rate_class == rate_class)
            .and_then(|r| r.room_points.get(room).copied())
    }
}

/// 7-night points of a season or holiday week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyPoints {
    pub bucket: String,
    pub kind: BucketKind,
    pub room_points: RoomPoints,
}

impl Resort {
    pub fn pricing_table(&self, year: i32) -> Result<PricingTable, DomainError> {
        let data = self.year(year).ok_or(DomainError::UnknownYear(year))?;
        let mut rows = Vec::new();

        for season in data.seasons() {
            for category in season.day_categories() {
                rows.push(PricingRow {
                    bucket: season.name().to_string(),
                    kind: BucketKind::Season,
                    rate_class: category.name().to_string(),
                    room_points: category.room_points().clone(),
                });
            }
            let full_week: RoomPoints = season
                .room_types()
                .map(|room| (room.to_string(), season.full_week_points(room)))
                .collect();
            if !full_week.is_empty() {
                rows.push(PricingRow {
                    bucket: season.name().to_string(),
                    kind: BucketKind::Season,
                    rate_class: FULL_WEEK.to_string(),
                    room_points: full_week,
                });
            }
        }

        for holiday in data.holidays() {
            rows.push(PricingRow {
                bucket: holiday.name().to_string(),
                kind: BucketKind::Holiday,
                rate_class: holiday.name().to_string(),
                room_points: holiday.room_points().clone(),
            });
        }

        Ok(PricingTable {
            resort: self.id().clone(),
            year,
            room_types: data.room_types().into_iter().collect(),
            rows,
        })
    }

    /// Seasons sum one night of every weekday; holidays carry their week price.
    pub fn weekly_points(&self, year: i32) -> Result<Vec<WeeklyPoints>, DomainError> {
        let data = self.year(year).ok_or(DomainError::UnknownYear(year))?;
        let rooms = data.room_types();

        let seasons = data.seasons().iter().map(|season| WeeklyPoints {
            bucket: season.name().to_string(),
            kind: BucketKind::Season,
            room_points: rooms
                .iter()
                .map(|room| (room.clone(), season.weekly_points(room)))
                .collect(),
        });
        let holidays = data.holidays().iter().map(|holiday| WeeklyPoints {
            bucket: holiday.name().to_string(),
            kind: BucketKind::Holiday,
            room_points: holiday.room_points().clone(),
        });
        Ok(seasons.chain(holidays).collect())
    }
}
