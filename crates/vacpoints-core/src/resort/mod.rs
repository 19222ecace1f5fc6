pub mod holiday;
pub mod season;
pub mod year;

use std::collections::{BTreeMap, BTreeSet};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ResortId;

pub use holiday::HolidayWeek;
pub use season::{DayCategory, RoomPoints, Season, MAX_POINTS, WEEK};
pub use year::ResortYear;

/// Whole weeks between two editions of a calendar; keeps every date on its weekday.
pub const DAYS_PER_CALENDAR_YEAR: i64 = 364;

mod tz_serde {
    use chrono_tz::Tz;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(tz.name())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Tz, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Tz>().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resort {
    id: ResortId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(with = "tz_serde")]
    timezone: Tz,
    #[serde(default)]
    years: BTreeMap<i32, ResortYear>,
}

/// Display card data for a resort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResortInfo {
    pub id: ResortId,
    pub name: String,
    pub full_name: String,
    pub timezone: String,
    pub address: String,
    pub years: Vec<i32>,
}

impl Resort {
    pub fn new(id: ResortId, name: &str, timezone: Tz) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Self {
            id,
            name: name.to_string(),
            full_name: None,
            address: None,
            timezone,
            years: BTreeMap::new(),
        })
    }

    pub fn id(&self) -> &ResortId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timezone(&self) -> &Tz {
        &self.timezone
    }

    pub fn years(&self) -> &BTreeMap<i32, ResortYear> {
        &self.years
    }

    pub fn year(&self, year: i32) -> Option<&ResortYear> {
        self.years.get(&year)
    }

    pub fn year_mut(&mut self, year: i32) -> Result<&mut ResortYear, DomainError> {
        self.years
            .get_mut(&year)
            .ok_or(DomainError::UnknownYear(year))
    }

    pub fn info(&self) -> ResortInfo {
        ResortInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            full_name: self.full_name.clone().unwrap_or_else(|| self.name.clone()),
            timezone: self.timezone.name().to_string(),
            address: self
                .address
                .clone()
                .unwrap_or_else(|| "Address not available".into()),
            years: self.years.keys().copied().collect(),
        }
    }

    pub fn set_details(
        &mut self,
        name: &str,
        full_name: Option<String>,
        address: Option<String>,
        timezone: Tz,
    ) -> Result<(), DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        self.name = name.to_string();
        self.full_name = full_name.filter(|s| !s.trim().is_empty());
        self.address = address.filter(|s| !s.trim().is_empty());
        self.timezone = timezone;
        Ok(())
    }

    /// Every room type priced anywhere in the resort, sorted.
    pub fn room_types(&self) -> Vec<String> {
        let rooms: BTreeSet<String> = self
            .years
            .values()
            .flat_map(ResortYear::room_types)
            .collect();
        rooms.into_iter().collect()
    }

    pub fn add_year(&mut self, year: i32) -> Result<(), DomainError> {
        if self.years.contains_key(&year) {
            return Err(DomainError::YearExists(year));
        }
        self.years.insert(year, ResortYear::new());
        Ok(())
    }

    /// Seed `to` from `from`, moving every date by whole 52-week blocks.
    pub fn copy_year(&mut self, from: i32, to: i32) -> Result<(), DomainError> {
        if self.years.contains_key(&to) {
            return Err(DomainError::YearExists(to));
        }
        let source = self.year(from).ok_or(DomainError::UnknownYear(from))?;
        let copy = source.shifted(i64::from(to - from) * DAYS_PER_CALENDAR_YEAR);
        self.years.insert(to, copy);
        Ok(())
    }

    pub fn remove_year(&mut self, year: i32) -> Result<ResortYear, DomainError> {
        self.years
            .remove(&year)
            .ok_or(DomainError::UnknownYear(year))
    }

    pub fn rename_room_type(&mut self, from: &str, to: &str) -> Result<usize, DomainError> {
        let to = to.trim();
        if to.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(self
            .years
            .values_mut()
            .map(|y| y.rename_room_type(from, to))
            .sum())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for year in self.years.values() {
            year.validate()?;
        }
        // A week filed under one year may run into the next one.
        for (y, year) in &self.years {
            let Some(next) = self.years.get(&(y + 1)) else {
                continue;
            };
            for late in next.holidays() {
                if year.holidays().iter().any(|h| h.dates().overlaps(&late.dates())) {
                    return Err(DomainError::OverlappingPeriod(late.dates().to_string()));
                }
            }
        }
        Ok(())
    }
}
