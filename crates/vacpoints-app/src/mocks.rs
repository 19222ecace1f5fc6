use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Weekday};

use vacpoints_core::calendar::DateRange;
use vacpoints_core::ids::ResortId;
use vacpoints_core::resort::{DayCategory, HolidayWeek, Resort, RoomPoints, Season};
use vacpoints_core::settings::Profile;
use vacpoints_ports::error::PortError;
use vacpoints_ports::outbound::{ResortRepository, SettingsRepository};

#[derive(Default)]
pub struct MockResortRepo {
    pub resorts: Mutex<Vec<Resort>>,
    /// Batch saves fail when they reach this id.
    pub reject: Option<String>,
}

impl MockResortRepo {
    pub fn with(resorts: Vec<Resort>) -> Self {
        Self {
            resorts: Mutex::new(resorts),
            reject: None,
        }
    }
}

fn upsert(resorts: &mut Vec<Resort>, resort: &Resort) {
    if let Some(pos) = resorts.iter().position(|r| r.id() == resort.id()) {
        resorts[pos] = resort.clone();
    } else {
        resorts.push(resort.clone());
    }
}

#[async_trait]
impl ResortRepository for MockResortRepo {
    async fn save(&self, resort: &Resort) -> Result<(), PortError> {
        upsert(&mut self.resorts.lock().unwrap(), resort);
        Ok(())
    }
    async fn save_all(&self, batch: &[Resort]) -> Result<(), PortError> {
        let mut resorts = self.resorts.lock().unwrap();
        let mut staged = resorts.clone();
        for resort in batch {
            if self.reject.as_deref() == Some(resort.id().as_str()) {
                return Err(PortError::Persistence(format!("{} rejected", resort.id())));
            }
            upsert(&mut staged, resort);
        }
        *resorts = staged;
        Ok(())
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Resort>, PortError> {
        let resorts = self.resorts.lock().unwrap();
        Ok(resorts.iter().find(|r| r.id().as_str() == id).cloned())
    }
    async fn list_all(&self) -> Result<Vec<Resort>, PortError> {
        Ok(self.resorts.lock().unwrap().clone())
    }
    async fn delete(&self, id: &str) -> Result<(), PortError> {
        let mut resorts = self.resorts.lock().unwrap();
        let before = resorts.len();
        resorts.retain(|r| r.id().as_str() != id);
        if resorts.len() == before {
            return Err(PortError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockSettingsRepo {
    pub profiles: Mutex<HashMap<String, Profile>>,
}

#[async_trait]
impl SettingsRepository for MockSettingsRepo {
    async fn load_profile(&self, name: &str) -> Result<Option<Profile>, PortError> {
        Ok(self.profiles.lock().unwrap().get(name).cloned())
    }
    async fn save_profile(&self, name: &str, profile: &Profile) -> Result<(), PortError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(name.to_string(), profile.clone());
        Ok(())
    }
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn range(a: &str, b: &str) -> DateRange {
    DateRange::new(d(a), d(b)).unwrap()
}

fn points(one: u32, two: u32) -> RoomPoints {
    RoomPoints::from([("1BR OV".into(), one), ("2BR OV".into(), two)])
}

/// 2026 calendar: one season from Jan 2, Christmas week in December.
pub fn ko_olina() -> Resort {
    let mut r = Resort::new(
        ResortId::parse("ko-olina-beach-club").unwrap(),
        "Ko Olina Beach Club",
        "Pacific/Honolulu".parse().unwrap(),
    )
    .unwrap();
    r.add_year(2026).unwrap();
    let y = r.year_mut(2026).unwrap();

    let mut low = Season::new("Low Season").unwrap();
    low.set_day_category(
        DayCategory::new("Fri-Sat", vec![Weekday::Fri, Weekday::Sat])
            .unwrap()
            .with_points(points(300, 500)),
    )
    .unwrap();
    low.set_day_category(
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
        .with_points(points(200, 300)),
    )
    .unwrap();
    y.upsert_season(low).unwrap();
    y.add_season_period("Low Season", range("2026-01-02", "2026-12-17"))
        .unwrap();
    y.add_season_period("Low Season", range("2026-12-25", "2026-12-31"))
        .unwrap();
    y.upsert_holiday(
        HolidayWeek::new("Christmas", range("2026-12-18", "2026-12-24"))
            .unwrap()
            .with_points(points(2500, 4000)),
    )
    .unwrap();
    r
}
