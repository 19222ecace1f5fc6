use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use vacpoints_core::classify::{Bucket, CoverageReport};
use vacpoints_core::error::DomainError;
use vacpoints_core::legend::describe_room;
use vacpoints_core::pricing::PricingTable;
use vacpoints_core::quote::{
    Comparison, Quote, QuoteTerms, RoomSummary, Stay, StayWindow, WeeklyCostTable,
};
use vacpoints_core::resort::{Resort, ResortInfo};
use vacpoints_ports::error::PortError;
use vacpoints_ports::outbound::ResortRepository;

use crate::error::AppError;

/// Stay plus pricing terms, as sent by the calculator screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRequest {
    #[serde(flatten)]
    pub stay: Stay,
    #[serde(flatten)]
    pub terms: QuoteTerms,
    /// Widen the stay over any holiday week it touches before pricing.
    #[serde(default)]
    pub expand_holidays: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteOutcome {
    pub window: StayWindow,
    pub quote: Quote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomType {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResortDetails {
    #[serde(flatten)]
    pub info: ResortInfo,
    pub room_types: Vec<RoomType>,
}

pub struct CalculatorService<R>
where
    R: ResortRepository,
{
    resorts: R,
}

impl<R> CalculatorService<R>
where
    R: ResortRepository,
{
    pub fn new(resorts: R) -> Self {
        Self { resorts }
    }

    async fn load(&self, resort_id: &str) -> Result<Resort, AppError> {
        self.resorts
            .find_by_id(resort_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))
    }

    pub async fn list_resorts(&self) -> Result<Vec<ResortInfo>, AppError> {
        let mut resorts: Vec<ResortInfo> = self
            .resorts
            .list_all()
            .await?
            .iter()
            .map(Resort::info)
            .collect();
        resorts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(resorts)
    }

    pub async fn resort_info(&self, resort_id: &str) -> Result<ResortDetails, AppError> {
        let resort = self.load(resort_id).await?;
        let room_types = resort
            .room_types()
            .into_iter()
            .map(|code| RoomType {
                description: describe_room(&code),
                code,
            })
            .collect();
        Ok(ResortDetails {
            info: resort.info(),
            room_types,
        })
    }

    pub async fn classify(
        &self,
        resort_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Bucket>, AppError> {
        Ok(self.load(resort_id).await?.classify(date))
    }

    pub async fn coverage(&self, resort_id: &str, year: i32) -> Result<CoverageReport, AppError> {
        let resort = self.load(resort_id).await?;
        if resort.year(year).is_none() {
            return Err(DomainError::UnknownYear(year).into());
        }
        Ok(resort.coverage(year))
    }

    pub async fn pricing_table(
        &self,
        resort_id: &str,
        year: i32,
    ) -> Result<PricingTable, AppError> {
        Ok(self.load(resort_id).await?.pricing_table(year)?)
    }

    pub async fn quote(
        &self,
        resort_id: &str,
        room: &str,
        request: &StayRequest,
        now: DateTime<Utc>,
    ) -> Result<QuoteOutcome, AppError> {
        let resort = self.load(resort_id).await?;
        let window = stay_window(&resort, request)?;
        let today = local_today(&resort, now);
        let quote = resort.quote_stay(room, window.stay, &request.terms, today)?;
        Ok(QuoteOutcome { window, quote })
    }

    pub async fn compare(
        &self,
        resort_id: &str,
        rooms: &[String],
        request: &StayRequest,
        now: DateTime<Utc>,
    ) -> Result<Comparison, AppError> {
        let resort = self.load(resort_id).await?;
        let window = stay_window(&resort, request)?;
        let today = local_today(&resort, now);
        Ok(resort.compare_rooms(rooms, window.stay, &request.terms, today)?)
    }

    pub async fn room_summary(
        &self,
        resort_id: &str,
        request: &StayRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<RoomSummary>, AppError> {
        let resort = self.load(resort_id).await?;
        let window = stay_window(&resort, request)?;
        let today = local_today(&resort, now);
        Ok(resort.room_summary(window.stay, &request.terms, today)?)
    }

    pub async fn weekly_costs(
        &self,
        resort_id: &str,
        year: i32,
        terms: &QuoteTerms,
    ) -> Result<WeeklyCostTable, AppError> {
        Ok(self.load(resort_id).await?.weekly_cost_table(year, terms)?)
    }
}

fn stay_window(resort: &Resort, request: &StayRequest) -> Result<StayWindow, DomainError> {
    if request.expand_holidays {
        resort.expand_to_holidays(request.stay)
    } else {
        Ok(StayWindow {
            stay: request.stay,
            adjusted: false,
        })
    }
}

/// Booking windows count in the resort's local calendar.
fn local_today(resort: &Resort, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(resort.timezone()).date_naive()
}
