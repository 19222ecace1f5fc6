use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::error::DomainError;
use crate::resort::holiday::HolidayWeek;
use crate::resort::season::{DayCategory, RoomPoints, Season};

/// Seasons and holiday weeks published for one year of a resort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResortYear {
    #[serde(default)]
    seasons: Vec<Season>,
    #[serde(default)]
    holidays: Vec<HolidayWeek>,
}

impl ResortYear {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn holidays(&self) -> &[HolidayWeek] {
        &self.holidays
    }

    pub fn season(&self, name: &str) -> Option<&Season> {
        self.seasons.iter().find(|s| s.name() == name)
    }

    pub fn holiday(&self, name: &str) -> Option<&HolidayWeek> {
        self.holidays.iter().find(|h| h.name() == name)
    }

    pub fn room_types(&self) -> BTreeSet<String> {
        let mut rooms: BTreeSet<String> = self
            .seasons
            .iter()
            .flat_map(|s| s.room_types())
            .map(str::to_string)
            .collect();
        rooms.extend(
            self.holidays
                .iter()
                .flat_map(|h| h.room_points().keys().cloned()),
        );
        rooms
    }

    /// Replace the season with the same name, or add it.
    pub fn upsert_season(&mut self, season: Season) -> Result<(), DomainError> {
        season.validate()?;
        for (i, period) in season.periods().iter().enumerate() {
            if season.periods()[..i].iter().any(|p| p.overlaps(period)) {
                return Err(DomainError::OverlappingPeriod(period.to_string()));
            }
            self.check_season_period(season.name(), period)?;
        }
        match self.seasons.iter_mut().find(|s| s.name() == season.name()) {
            Some(existing) => *existing = season,
            None => self.seasons.push(season),
        }
        Ok(())
    }

    pub fn remove_season(&mut self, name: &str) -> Result<Season, DomainError> {
        let pos = self
            .seasons
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| DomainError::UnknownSeason(name.into()))?;
        Ok(self.seasons.remove(pos))
    }

    pub fn rename_season(&mut self, from: &str, to: &str) -> Result<(), DomainError> {
        let to = to.trim();
        if to.is_empty() {
            return Err(DomainError::EmptyName);
        }
        if from != to && self.season(to).is_some() {
            return Err(DomainError::DuplicateName(to.into()));
        }
        self.season_mut(from)?.rename(to.to_string());
        Ok(())
    }

    pub fn add_season_period(&mut self, name: &str, period: DateRange) -> Result<(), DomainError> {
        if self.season(name).is_none() {
            return Err(DomainError::UnknownSeason(name.into()));
        }
        self.check_season_period("", &period)?;
        let periods = self.season_mut(name)?.periods_mut();
        periods.push(period);
        periods.sort();
        Ok(())
    }

    pub fn remove_season_period(
        &mut self,
        name: &str,
        period: &DateRange,
    ) -> Result<(), DomainError> {
        let periods = self.season_mut(name)?.periods_mut();
        let pos = periods
            .iter()
            .position(|p| p == period)
            .ok_or_else(|| DomainError::UnknownPeriod(period.to_string()))?;
        periods.remove(pos);
        Ok(())
    }

    pub fn set_day_category(
        &mut self,
        season: &str,
        category: DayCategory,
    ) -> Result<(), DomainError> {
        self.season_mut(season)?.set_day_category(category)
    }

    pub fn remove_day_category(
        &mut self,
        season: &str,
        rate_class: &str,
    ) -> Result<DayCategory, DomainError> {
        self.season_mut(season)?.remove_day_category(rate_class)
    }

    pub fn set_room_points(
        &mut self,
        season: &str,
        rate_class: &str,
        room: &str,
        points: u32,
    ) -> Result<(), DomainError> {
        self.season_mut(season)?
            .set_room_points(rate_class, room, points)
    }

    pub fn set_full_week(
        &mut self,
        season: &str,
        room: &str,
        points: Option<u32>,
    ) -> Result<(), DomainError> {
        self.season_mut(season)?.set_full_week(room, points)
    }

    /// Replace the holiday with the same name, or add it.
    pub fn upsert_holiday(&mut self, holiday: HolidayWeek) -> Result<(), DomainError> {
        self.check_holiday_dates(holiday.name(), &holiday.dates())?;
        match self.holidays.iter_mut().find(|h| h.name() == holiday.name()) {
            Some(existing) => *existing = holiday,
            None => {
                self.holidays.push(holiday);
                self.holidays.sort_by_key(|h| h.dates());
            }
        }
        Ok(())
    }

    pub fn move_holiday(&mut self, name: &str, dates: DateRange) -> Result<(), DomainError> {
        if self.holiday(name).is_none() {
            return Err(DomainError::UnknownHoliday(name.into()));
        }
        self.check_holiday_dates(name, &dates)?;
        self.holiday_mut(name)?.set_dates(dates);
        self.holidays.sort_by_key(|h| h.dates());
        Ok(())
    }

    pub fn remove_holiday(&mut self, name: &str) -> Result<HolidayWeek, DomainError> {
        let pos = self
            .holidays
            .iter()
            .position(|h| h.name() == name)
            .ok_or_else(|| DomainError::UnknownHoliday(name.into()))?;
        Ok(self.holidays.remove(pos))
    }

    pub fn set_holiday_points(
        &mut self,
        name: &str,
        room: &str,
        points: u32,
    ) -> Result<(), DomainError> {
        self.holiday_mut(name)?.set_room_points(room, points)
    }

    /// Rename a room type in every price table of the year. Returns the number of tables touched.
    pub fn rename_room_type(&mut self, from: &str, to: &str) -> usize {
        let tables = self
            .seasons
            .iter_mut()
            .flat_map(|s| s.point_tables_mut())
            .chain(self.holidays.iter_mut().map(HolidayWeek::room_points_mut));
        let mut touched = 0;
        for table in tables {
            if rename_key(table, from, to) {
                touched += 1;
            }
        }
        touched
    }

    /// Copy of this year with every date moved by `days`.
    pub fn shifted(&self, days: i64) -> ResortYear {
        let mut copy = self.clone();
        for season in &mut copy.seasons {
            for period in season.periods_mut().iter_mut() {
                *period = period.shifted(days);
            }
        }
        for holiday in &mut copy.holidays {
            let moved = holiday.dates().shifted(days);
            holiday.set_dates(moved);
        }
        copy
    }

    /// Season periods never overlap each other, holiday weeks never overlap each other.
    pub fn validate(&self) -> Result<(), DomainError> {
        for season in &self.seasons {
            season.validate()?;
        }
        for holiday in &self.holidays {
            holiday.validate()?;
        }
        let mut periods: Vec<&DateRange> =
            self.seasons.iter().flat_map(|s| s.periods()).collect();
        periods.sort();
        if let Some(pair) = periods.windows(2).find(|w| w[0].overlaps(w[1])) {
            return Err(DomainError::OverlappingPeriod(pair[1].to_string()));
        }
        let mut weeks: Vec<DateRange> = self.holidays.iter().map(|h| h.dates()).collect();
        weeks.sort();
        if let Some(pair) = weeks.windows(2).find(|w| w[0].overlaps(&w[1])) {
            return Err(DomainError::OverlappingPeriod(pair[1].to_string()));
        }
        Ok(())
    }

    fn check_season_period(&self, skip_season: &str, period: &DateRange) -> Result<(), DomainError> {
        let clash = self
            .seasons
            .iter()
            .filter(|s| s.name() != skip_season)
            .flat_map(|s| s.periods())
            .any(|p| p.overlaps(period));
        if clash {
            return Err(DomainError::OverlappingPeriod(period.to_string()));
        }
        Ok(())
    }

    fn check_holiday_dates(&self, skip_holiday: &str, dates: &DateRange) -> Result<(), DomainError> {
        let clash = self
            .holidays
            .iter()
            .filter(|h| h.name() != skip_holiday)
            .any(|h| h.dates().overlaps(dates));
        if clash {
            return Err(DomainError::OverlappingPeriod(dates.to_string()));
        }
        Ok(())
    }

    fn season_mut(&mut self, name: &str) -> Result<&mut Season, DomainError> {
        self.seasons
            .iter_mut()
            .find(|s| s.name() == name)
            .ok_or_else(|| DomainError::UnknownSeason(name.into()))
    }

    fn holiday_mut(&mut self, name: &str) -> Result<&mut HolidayWeek, DomainError> {
        self.holidays
            .iter_mut()
            .find(|h| h.name() == name)
            .ok_or_else(|| DomainError::UnknownHoliday(name.into()))
    }
}

fn rename_key(table: &mut RoomPoints, from: &str, to: &str) -> bool {
    match table.remove(from) {
        Some(points) => {
            table.insert(to.to_string(), points);
            true
        }
        None => false,
    }
}
