use chrono_tz::Tz;
use tracing::info;

use vacpoints_core::calendar::DateRange;
use vacpoints_core::error::DomainError;
use vacpoints_core::ids::ResortId;
use vacpoints_core::resort::{DayCategory, HolidayWeek, Resort, Season};
use vacpoints_ports::error::PortError;
use vacpoints_ports::outbound::ResortRepository;
use vacpoints_ports::types::{Dataset, ImportSummary};

use crate::error::AppError;

/// Maintains the season, holiday and point tables. Every edit is validated
/// against the whole resort before it is stored.
pub struct EditorService<R>
where
    R: ResortRepository,
{
    resorts: R,
}

impl<R> EditorService<R>
where
    R: ResortRepository,
{
    pub fn new(resorts: R) -> Self {
        Self { resorts }
    }

    async fn edit<T>(
        &self,
        resort_id: &str,
        op: &'static str,
        apply: impl FnOnce(&mut Resort) -> Result<T, DomainError>,
    ) -> Result<T, AppError> {
        let mut resort = self
            .resorts
            .find_by_id(resort_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))?;
        let out = apply(&mut resort)?;
        resort.validate()?;
        self.resorts.save(&resort).await?;
        info!(resort = %resort.id(), op, "resort updated");
        Ok(out)
    }

    pub async fn create_resort(&self, name: &str, timezone: Tz) -> Result<ResortId, AppError> {
        let id = ResortId::from_name(name)?;
        if self.resorts.find_by_id(id.as_str()).await?.is_some() {
            return Err(DomainError::DuplicateName(id.to_string()).into());
        }
        let resort = Resort::new(id.clone(), name, timezone)?;
        self.resorts.save(&resort).await?;
        info!(resort = %id, "resort created");
        Ok(id)
    }

    pub async fn update_details(
        &self,
        resort_id: &str,
        name: &str,
        full_name: Option<String>,
        address: Option<String>,
        timezone: Tz,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "update_details", |r| {
            r.set_details(name, full_name, address, timezone)
        })
        .await
    }

    pub async fn delete_resort(&self, resort_id: &str) -> Result<(), AppError> {
        self.resorts.delete(resort_id).await?;
        info!(resort = resort_id, "resort deleted");
        Ok(())
    }

    pub async fn add_year(&self, resort_id: &str, year: i32) -> Result<(), AppError> {
        self.edit(resort_id, "add_year", |r| r.add_year(year)).await
    }

    /// New year seeded from an existing one, dates moved by whole weeks.
    pub async fn copy_year(&self, resort_id: &str, from: i32, to: i32) -> Result<(), AppError> {
        self.edit(resort_id, "copy_year", |r| r.copy_year(from, to))
            .await
    }

    pub async fn remove_year(&self, resort_id: &str, year: i32) -> Result<(), AppError> {
        self.edit(resort_id, "remove_year", |r| r.remove_year(year).map(drop))
            .await
    }

    pub async fn upsert_season(
        &self,
        resort_id: &str,
        year: i32,
        season: Season,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "upsert_season", |r| {
            r.year_mut(year)?.upsert_season(season)
        })
        .await
    }

    pub async fn remove_season(
        &self,
        resort_id: &str,
        year: i32,
        name: &str,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "remove_season", |r| {
            r.year_mut(year)?.remove_season(name).map(drop)
        })
        .await
    }

    pub async fn rename_season(
        &self,
        resort_id: &str,
        year: i32,
        from: &str,
        to: &str,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "rename_season", |r| {
            r.year_mut(year)?.rename_season(from, to)
        })
        .await
    }

    pub async fn add_season_period(
        &self,
        resort_id: &str,
        year: i32,
        season: &str,
        period: DateRange,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "add_season_period", |r| {
            r.year_mut(year)?.add_season_period(season, period)
        })
        .await
    }

    pub async fn remove_season_period(
        &self,
        resort_id: &str,
        year: i32,
        season: &str,
        period: DateRange,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "remove_season_period", |r| {
            r.year_mut(year)?.remove_season_period(season, &period)
        })
        .await
    }

    pub async fn set_day_category(
        &self,
        resort_id: &str,
        year: i32,
        season: &str,
        category: DayCategory,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "set_day_category", |r| {
            r.year_mut(year)?.set_day_category(season, category)
        })
        .await
    }

    pub async fn remove_day_category(
        &self,
        resort_id: &str,
        year: i32,
        season: &str,
        rate_class: &str,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "remove_day_category", |r| {
            r.year_mut(year)?
                .remove_day_category(season, rate_class)
                .map(drop)
        })
        .await
    }

    pub async fn set_room_points(
        &self,
        resort_id: &str,
        year: i32,
        season: &str,
        rate_class: &str,
        room: &str,
        points: u32,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "set_room_points", |r| {
            r.year_mut(year)?
                .set_room_points(season, rate_class, room, points)
        })
        .await
    }

    pub async fn set_full_week(
        &self,
        resort_id: &str,
        year: i32,
        season: &str,
        room: &str,
        points: Option<u32>,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "set_full_week", |r| {
            r.year_mut(year)?.set_full_week(season, room, points)
        })
        .await
    }

    pub async fn upsert_holiday(
        &self,
        resort_id: &str,
        year: i32,
        holiday: HolidayWeek,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "upsert_holiday", |r| {
            r.year_mut(year)?.upsert_holiday(holiday)
        })
        .await
    }

    pub async fn move_holiday(
        &self,
        resort_id: &str,
        year: i32,
        name: &str,
        dates: DateRange,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "move_holiday", |r| {
            r.year_mut(year)?.move_holiday(name, dates)
        })
        .await
    }

    pub async fn remove_holiday(
        &self,
        resort_id: &str,
        year: i32,
        name: &str,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "remove_holiday", |r| {
            r.year_mut(year)?.remove_holiday(name).map(drop)
        })
        .await
    }

    pub async fn set_holiday_points(
        &self,
        resort_id: &str,
        year: i32,
        name: &str,
        room: &str,
        points: u32,
    ) -> Result<(), AppError> {
        self.edit(resort_id, "set_holiday_points", |r| {
            r.year_mut(year)?.set_holiday_points(name, room, points)
        })
        .await
    }

    /// Returns the number of point tables that carried the old name.
    pub async fn rename_room_type(
        &self,
        resort_id: &str,
        from: &str,
        to: &str,
    ) -> Result<usize, AppError> {
        self.edit(resort_id, "rename_room_type", |r| r.rename_room_type(from, to))
            .await
    }

    /// Merge a dataset: resorts with a known id are replaced, the rest are added.
    /// Nothing is stored unless every resort validates and the whole batch saves.
    pub async fn import_dataset(&self, dataset: Dataset) -> Result<ImportSummary, AppError> {
        for resort in &dataset.resorts {
            resort.validate()?;
        }
        let mut summary = ImportSummary::default();
        for resort in &dataset.resorts {
            let id = resort.id().to_string();
            if self.resorts.find_by_id(&id).await?.is_some() {
                summary.replaced.push(id);
            } else {
                summary.added.push(id);
            }
        }
        self.resorts.save_all(&dataset.resorts).await?;
        info!(
            added = summary.added.len(),
            replaced = summary.replaced.len(),
            "dataset imported"
        );
        Ok(summary)
    }

    pub async fn export_dataset(&self) -> Result<Dataset, AppError> {
        let mut resorts = self.resorts.list_all().await?;
        resorts.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(Dataset { resorts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{d, ko_olina, range, MockResortRepo};
    use chrono::Weekday;

    const ID: &str = "ko-olina-beach-club";

    fn make_service() -> EditorService<MockResortRepo> {
        EditorService::new(MockResortRepo::with(vec![ko_olina()]))
    }

    fn stored(svc: &EditorService<MockResortRepo>) -> Resort {
        svc.resorts.resorts.lock().unwrap()[0].clone()
    }

    fn honolulu() -> Tz {
        "Pacific/Honolulu".parse().unwrap()
    }

    #[tokio::test]
    async fn create_resort_derives_slug() {
        let svc = EditorService::new(MockResortRepo::default());
        let id = svc
            .create_resort("Maui Ocean Club", honolulu())
            .await
            .unwrap();
        assert_eq!(id.as_str(), "maui-ocean-club");

        let again = svc.create_resort("Maui Ocean Club", honolulu()).await;
        assert!(matches!(
            again,
            Err(AppError::Domain(DomainError::DuplicateName(_)))
        ));
    }

    #[tokio::test]
    async fn edit_of_unknown_resort_is_not_found() {
        let svc = make_service();
        let result = svc.add_year("nowhere", 2027).await;
        assert!(matches!(result, Err(AppError::Port(PortError::NotFound))));
    }

    #[tokio::test]
    async fn overlapping_period_is_rejected_and_not_saved() {
        let svc = make_service();
        let result = svc
            .add_season_period(ID, 2026, "Low Season", range("2026-12-10", "2026-12-20"))
            .await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::OverlappingPeriod(_)))
        ));
        assert_eq!(stored(&svc), ko_olina());
    }

    #[tokio::test]
    async fn set_room_points_persists() {
        let svc = make_service();
        svc.set_room_points(ID, 2026, "Low Season", "Fri-Sat", "2BR OV", 550)
            .await
            .unwrap();
        let resort = stored(&svc);
        let season = resort.year(2026).unwrap().season("Low Season").unwrap();
        assert_eq!(season.category("Fri-Sat").unwrap().points_for("2BR OV"), 550);
    }

    #[tokio::test]
    async fn oversized_points_are_rejected() {
        let svc = make_service();
        let result = svc
            .set_room_points(ID, 2026, "Low Season", "Fri-Sat", "2BR OV", 4_000_000_000)
            .await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::PointsOutOfRange { .. }))
        ));
        let result = svc
            .set_full_week(ID, 2026, "Low Season", "2BR OV", Some(4_000_000_000))
            .await;
        assert!(result.is_err());
        assert_eq!(stored(&svc), ko_olina());
    }

    #[tokio::test]
    async fn claimed_weekday_is_rejected() {
        let svc = make_service();
        let category = DayCategory::new("Sat", vec![Weekday::Sat]).unwrap();
        let result = svc
            .set_day_category(ID, 2026, "Low Season", category)
            .await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::WeekdayClaimedTwice(Weekday::Sat)))
        ));
    }

    #[tokio::test]
    async fn holiday_edits_round_trip() {
        let svc = make_service();
        let july =
            HolidayWeek::new("Independence Day", range("2026-07-03", "2026-07-09")).unwrap();
        svc.upsert_holiday(ID, 2026, july).await.unwrap();
        svc.set_holiday_points(ID, 2026, "Independence Day", "2BR OV", 3600)
            .await
            .unwrap();
        svc.move_holiday(ID, 2026, "Independence Day", range("2026-07-04", "2026-07-10"))
            .await
            .unwrap();

        let resort = stored(&svc);
        let week = resort.year(2026).unwrap().holiday("Independence Day").unwrap();
        assert_eq!(week.dates().start(), d("2026-07-04"));
        assert_eq!(week.points_for("2BR OV"), 3600);

        svc.remove_holiday(ID, 2026, "Independence Day").await.unwrap();
        assert!(stored(&svc)
            .year(2026)
            .unwrap()
            .holiday("Independence Day")
            .is_none());
    }

    #[tokio::test]
    async fn copy_year_keeps_weekdays() {
        let svc = make_service();
        svc.copy_year(ID, 2026, 2027).await.unwrap();
        let resort = stored(&svc);
        let christmas = resort.year(2027).unwrap().holiday("Christmas").unwrap();
        assert_eq!(christmas.dates(), range("2027-12-17", "2027-12-23"));
    }

    #[tokio::test]
    async fn rename_room_type_counts_tables() {
        let svc = make_service();
        let touched = svc.rename_room_type(ID, "2BR OV", "2BR OF").await.unwrap();
        // Fri-Sat, Sun-Thu and Christmas.
        assert_eq!(touched, 3);
        assert_eq!(stored(&svc).room_types(), vec!["1BR OV", "2BR OF"]);
    }

    #[tokio::test]
    async fn import_replaces_known_and_adds_new() {
        let svc = make_service();
        let other = Resort::new(
            ResortId::parse("maui-ocean-club").unwrap(),
            "Maui Ocean Club",
            honolulu(),
        )
        .unwrap();
        let summary = svc
            .import_dataset(Dataset {
                resorts: vec![ko_olina(), other],
            })
            .await
            .unwrap();
        assert_eq!(summary.replaced, vec![ID.to_string()]);
        assert_eq!(summary.added, vec!["maui-ocean-club".to_string()]);

        let exported = svc.export_dataset().await.unwrap();
        let ids: Vec<_> = exported.resorts.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec![ID, "maui-ocean-club"]);
    }

    #[tokio::test]
    async fn failed_import_stores_nothing() {
        let repo = MockResortRepo {
            reject: Some("maui-ocean-club".to_string()),
            ..MockResortRepo::with(vec![ko_olina()])
        };
        let svc = EditorService::new(repo);
        let mut renamed = ko_olina();
        renamed
            .set_details("Ko Olina Beach Club Villas", None, None, honolulu())
            .unwrap();
        let other = Resort::new(
            ResortId::parse("maui-ocean-club").unwrap(),
            "Maui Ocean Club",
            honolulu(),
        )
        .unwrap();

        let result = svc
            .import_dataset(Dataset {
                resorts: vec![renamed, other],
            })
            .await;

        assert!(matches!(result, Err(AppError::Port(PortError::Persistence(_)))));
        let exported = svc.export_dataset().await.unwrap();
        assert_eq!(exported.resorts, vec![ko_olina()]);
    }

    #[tokio::test]
    async fn delete_resort_removes_it() {
        let svc = make_service();
        svc.delete_resort(ID).await.unwrap();
        assert!(svc.export_dataset().await.unwrap().resorts.is_empty());
        let again = svc.delete_resort(ID).await;
        assert!(matches!(again, Err(AppError::Port(PortError::NotFound))));
    }
}
