use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::classify::{Bucket, DailyRate};
use crate::error::DomainError;
use crate::ids::ResortId;
use crate::pricing::BucketKind;
use crate::resort::{HolidayWeek, Resort};

/// Longest stay accepted by the calculator.
pub const MAX_NIGHTS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserMode {
    Owner,
    Renter,
}

/// Membership tier. Higher tiers book at a discount close to the arrival date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tier {
    #[default]
    Ordinary,
    Executive,
    Presidential,
}

impl Tier {
    pub fn point_percent(self) -> u32 {
        match self {
            Self::Ordinary => 100,
            Self::Executive => 75,
            Self::Presidential => 70,
        }
    }

    /// Days before arrival in which the discount applies.
    pub fn booking_window_days(self) -> Option<i64> {
        match self {
            Self::Ordinary => None,
            Self::Executive => Some(30),
            Self::Presidential => Some(60),
        }
    }

    pub fn has_discount(self) -> bool {
        self.booking_window_days().is_some()
    }

    /// Discounted points, rounded down.
    pub fn apply(self, points: u32) -> u32 {
        let discounted = u64::from(points) * u64::from(self.point_percent()) / 100;
        u32::try_from(discounted).unwrap_or(points)
    }

    /// Points for a booking `days_out` days ahead and whether the discount kicked in.
    pub fn discount(self, points: u32, days_out: i64) -> (u32, bool) {
        match self.booking_window_days() {
            Some(window) if days_out <= window => (self.apply(points), true),
            _ => (points, false),
        }
    }

    /// Accepts long and legacy names ("Executive (25% off)", "Chairman").
    pub fn parse_loose(s: &str) -> Self {
        let s = s.to_ascii_lowercase();
        if s.contains("exec") {
            Self::Executive
        } else if s.contains("pres") || s.contains("chair") {
            Self::Presidential
        } else {
            Self::Ordinary
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::Ordinary => "Ordinary",
            Self::Executive => "Executive",
            Self::Presidential => "Presidential",
        }
    }
}

impl From<String> for Tier {
    fn from(s: String) -> Self {
        Self::parse_loose(&s)
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        tier.short_name().to_string()
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Cost components an owner pays per point. Rates are dollars per point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerCosts {
    pub maintenance_rate: Decimal,
    pub purchase_price: Decimal,
    pub capital_cost_pct: Decimal,
    pub salvage_value: Decimal,
    pub useful_life: u32,
    pub include_maintenance: bool,
    pub include_capital: bool,
    pub include_depreciation: bool,
}

impl Default for OwnerCosts {
    fn default() -> Self {
        Self {
            maintenance_rate: dec!(0.83),
            purchase_price: dec!(3.5),
            capital_cost_pct: dec!(5),
            salvage_value: dec!(3.0),
            useful_life: 20,
            include_maintenance: true,
            include_capital: true,
            include_depreciation: false,
        }
    }
}

impl OwnerCosts {
    pub fn capital_rate(&self) -> Decimal {
        self.purchase_price * self.capital_cost_pct / dec!(100)
    }

    pub fn depreciation_rate(&self) -> Decimal {
        if self.useful_life == 0 {
            return Decimal::ZERO;
        }
        (self.purchase_price - self.salvage_value) / Decimal::from(self.useful_life)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CostBasis {
    Renter { rate: Decimal },
    Owner(OwnerCosts),
}

impl CostBasis {
    pub fn renter(rate: Decimal) -> Self {
        Self::Renter {
            rate: rate.round_dp(2),
        }
    }

    pub fn mode(&self) -> UserMode {
        match self {
            Self::Renter { .. } => UserMode::Renter,
            Self::Owner(_) => UserMode::Owner,
        }
    }

    pub fn cost(&self, points: u32) -> CostBreakdown {
        match self {
            Self::Renter { rate } => CostBreakdown {
                maintenance: None,
                capital: None,
                depreciation: None,
                total: points_cost(points, rate.round_dp(2)),
            },
            Self::Owner(costs) => {
                let maintenance = costs
                    .include_maintenance
                    .then(|| points_cost(points, costs.maintenance_rate));
                let capital = costs
                    .include_capital
                    .then(|| points_cost(points, costs.capital_rate()));
                let depreciation = costs
                    .include_depreciation
                    .then(|| points_cost(points, costs.depreciation_rate()));
                CostBreakdown {
                    maintenance,
                    capital,
                    depreciation,
                    total: [maintenance, capital, depreciation]
                        .into_iter()
                        .flatten()
                        .sum(),
                }
            }
        }
    }
}

/// Whole dollars, rounded up. The 8-place rounding absorbs representation noise in the rate.
fn points_cost(points: u32, rate: Decimal) -> Decimal {
    (Decimal::from(points) * rate).round_dp(8).ceil()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depreciation: Option<Decimal>,
    pub total: Decimal,
}

/// How a quote is priced: who pays, at which tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTerms {
    pub basis: CostBasis,
    #[serde(default)]
    pub tier: Tier,
}

impl QuoteTerms {
    pub fn new(basis: CostBasis, tier: Tier) -> Self {
        Self { basis, tier }
    }
}

/// Check-in date and number of nights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStay")]
pub struct Stay {
    checkin: NaiveDate,
    nights: u32,
}

#[derive(Deserialize)]
struct RawStay {
    checkin: NaiveDate,
    nights: u32,
}

impl TryFrom<RawStay> for Stay {
    type Error = DomainError;

    fn try_from(raw: RawStay) -> Result<Self, Self::Error> {
        Self::new(raw.checkin, raw.nights)
    }
}

impl Stay {
    pub fn new(checkin: NaiveDate, nights: u32) -> Result<Self, DomainError> {
        if nights == 0 || nights > MAX_NIGHTS {
            return Err(DomainError::InvalidStayLength {
                nights,
                max: MAX_NIGHTS,
            });
        }
        Ok(Self { checkin, nights })
    }

    pub fn checkin(&self) -> NaiveDate {
        self.checkin
    }

    pub fn nights(&self) -> u32 {
        self.nights
    }

    /// Every night of the stay, check-in included.
    pub fn dates(&self) -> DateRange {
        DateRange::from_nights(self.checkin, self.nights)
    }
}

/// Stay after widening it over the holiday weeks it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StayWindow {
    pub stay: Stay,
    pub adjusted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteLine {
    /// Date for a night, "Name (Mon dd, yyyy - Mon dd, yyyy)" for a holiday week.
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<Weekday>,
    pub dates: DateRange,
    /// `None` for a night no season or holiday covers; such nights cost 0 points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<Bucket>,
    pub points: u32,
    pub discounted: bool,
    pub cost: CostBreakdown,
}

impl QuoteLine {
    pub fn is_holiday(&self) -> bool {
        matches!(&self.bucket, Some(b) if b.is_holiday())
    }

    pub fn is_unpriced(&self) -> bool {
        self.bucket.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub resort: ResortId,
    pub room: String,
    pub stay: Stay,
    pub mode: UserMode,
    pub tier: Tier,
    pub lines: Vec<QuoteLine>,
    pub total_points: u32,
    pub cost: CostBreakdown,
    pub discount_applied: bool,
    pub discounted_days: Vec<NaiveDate>,
    /// Nights outside every published season and holiday, priced at 0.
    pub unpriced_days: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    /// One entry per compared room, in request order.
    pub costs: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub rooms: Vec<String>,
    pub rows: Vec<ComparisonRow>,
    pub total: ComparisonRow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    pub room: String,
    pub points: u32,
    pub cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyCostRow {
    pub bucket: String,
    pub kind: BucketKind,
    /// `None` when a holiday week has no price for the room.
    pub costs: BTreeMap<String, Option<Decimal>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyCostTable {
    pub year: i32,
    pub room_types: Vec<String>,
    pub rows: Vec<WeeklyCostRow>,
}

fn holiday_label(holiday: &HolidayWeek) -> String {
    let dates = holiday.dates();
    format!(
        "{} ({} - {})",
        holiday.name(),
        dates.start().format("%b %d, %Y"),
        dates.end().format("%b %d, %Y")
    )
}

impl Resort {
    /// Price `room` for every night of `stay`. `today` is the booking date in the
    /// resort's timezone.
    pub fn quote_stay(
        &self,
        room: &str,
        stay: Stay,
        terms: &QuoteTerms,
        today: NaiveDate,
    ) -> Result<Quote, DomainError> {
        let last = stay.dates().end();
        let mut lines = Vec::new();
        let mut discounted_days = BTreeSet::new();
        let mut unpriced_days = Vec::new();
        let mut day = stay.checkin();

        while day <= last {
            let Some(rate) = self.daily_rate(day) else {
                unpriced_days.push(day);
                lines.push(QuoteLine {
                    label: day.format("%Y-%m-%d").to_string(),
                    weekday: Some(day.weekday()),
                    dates: DateRange::single(day),
                    bucket: None,
                    points: 0,
                    discounted: false,
                    cost: terms.basis.cost(0),
                });
                day += Duration::days(1);
                continue;
            };
            let raw = rate.points_for(room);

            match rate {
                DailyRate::Holiday(holiday) => {
                    let dates = holiday.dates();
                    let days_out = (dates.start() - today).num_days();
                    let (points, discounted) = terms.tier.discount(raw, days_out);
                    if discounted {
                        discounted_days.extend(dates.days());
                    }
                    lines.push(QuoteLine {
                        label: holiday_label(holiday),
                        weekday: None,
                        dates,
                        bucket: Some(rate.bucket()),
                        points,
                        discounted,
                        cost: terms.basis.cost(points),
                    });
                    day = dates.end() + Duration::days(1);
                }
                DailyRate::Night { .. } => {
                    let days_out = (day - today).num_days();
                    let (points, discounted) = terms.tier.discount(raw, days_out);
                    if discounted {
                        discounted_days.insert(day);
                    }
                    lines.push(QuoteLine {
                        label: day.format("%Y-%m-%d").to_string(),
                        weekday: Some(day.weekday()),
                        dates: DateRange::single(day),
                        bucket: Some(rate.bucket()),
                        points,
                        discounted,
                        cost: terms.basis.cost(points),
                    });
                    day += Duration::days(1);
                }
            }
        }

        let total_points = lines
            .iter()
            .try_fold(0u32, |acc, l| acc.checked_add(l.points))
            .ok_or(DomainError::PointsOverflow)?;
        Ok(Quote {
            resort: self.id().clone(),
            room: room.to_string(),
            stay,
            mode: terms.basis.mode(),
            tier: terms.tier,
            lines,
            total_points,
            cost: terms.basis.cost(total_points),
            discount_applied: !discounted_days.is_empty(),
            discounted_days: discounted_days.into_iter().collect(),
            unpriced_days,
        })
    }

    /// Widen `stay` so it covers every holiday week it touches in full. Fails when
    /// the widened stay is longer than `MAX_NIGHTS`.
    pub fn expand_to_holidays(&self, stay: Stay) -> Result<StayWindow, DomainError> {
        let dates = stay.dates();
        let widened = self
            .holidays_within(&dates)
            .into_iter()
            .fold(dates, |acc, h| acc.union(&h.dates()));
        if widened == dates {
            return Ok(StayWindow {
                stay,
                adjusted: false,
            });
        }
        let nights = u32::try_from(widened.len_days()).unwrap_or(u32::MAX);
        Ok(StayWindow {
            stay: Stay::new(widened.start(), nights)?,
            adjusted: true,
        })
    }

    /// Side by side cost of the same stay in several rooms. Rows follow the first room.
    pub fn compare_rooms(
        &self,
        rooms: &[String],
        stay: Stay,
        terms: &QuoteTerms,
        today: NaiveDate,
    ) -> Result<Comparison, DomainError> {
        let quotes = rooms
            .iter()
            .map(|room| self.quote_stay(room, stay, terms, today))
            .collect::<Result<Vec<_>, _>>()?;
        let template = quotes.first().ok_or(DomainError::NoRoomTypes)?;

        let rows = template
            .lines
            .iter()
            .map(|line| ComparisonRow {
                label: line.label.clone(),
                costs: quotes
                    .iter()
                    .map(|q| {
                        q.lines
                            .iter()
                            .find(|l| l.dates == line.dates)
                            .map_or(Decimal::ZERO, |l| l.cost.total)
                    })
                    .collect(),
            })
            .collect();

        let label = match terms.basis.mode() {
            UserMode::Owner => "Total Cost",
            UserMode::Renter => "Total Rent",
        };
        Ok(Comparison {
            rooms: rooms.to_vec(),
            rows,
            total: ComparisonRow {
                label: label.to_string(),
                costs: quotes.iter().map(|q| q.cost.total).collect(),
            },
        })
    }

    /// Total points and cost of `stay` for every room type of the resort.
    pub fn room_summary(
        &self,
        stay: Stay,
        terms: &QuoteTerms,
        today: NaiveDate,
    ) -> Result<Vec<RoomSummary>, DomainError> {
        self.room_types()
            .into_iter()
            .map(|room| {
                let quote = self.quote_stay(&room, stay, terms, today)?;
                Ok(RoomSummary {
                    room,
                    points: quote.total_points,
                    cost: quote.cost.total,
                })
            })
            .collect()
    }

    /// 7-night cost of every season and holiday week of `year`. The tier discount
    /// is always applied, regardless of booking window.
    pub fn weekly_cost_table(
        &self,
        year: i32,
        terms: &QuoteTerms,
    ) -> Result<WeeklyCostTable, DomainError> {
        let room_types = self.room_types();
        if room_types.is_empty() {
            return Err(DomainError::NoRoomTypes);
        }
        let discount = |points: u32| {
            if terms.tier.has_discount() {
                terms.tier.apply(points)
            } else {
                points
            }
        };

        let mut rows = Vec::new();
        for week in self.weekly_points(year)? {
            let points_for = |room: &str| week.room_points.get(room).copied().unwrap_or(0);
            let costs: BTreeMap<String, Option<Decimal>> = match week.kind {
                BucketKind::Season => {
                    if room_types.iter().all(|room| points_for(room) == 0) {
                        continue;
                    }
                    room_types
                        .iter()
                        .map(|room| {
                            let cost = terms.basis.cost(discount(points_for(room))).total;
                            (room.clone(), Some(cost))
                        })
                        .collect()
                }
                BucketKind::Holiday => room_types
                    .iter()
                    .map(|room| {
                        let cost = match points_for(room) {
                            0 => None,
                            raw => Some(terms.basis.cost(discount(raw)).total),
                        };
                        (room.clone(), cost)
                    })
                    .collect(),
            };
            rows.push(WeeklyCostRow {
                bucket: week.bucket.clone(),
                kind: week.kind,
                costs,
            });
        }

        Ok(WeeklyCostTable {
            year,
            room_types,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resort::RoomPoints;
    use crate::testing::{d, newport, range};

    fn renter(tier: Tier) -> QuoteTerms {
        QuoteTerms::new(CostBasis::renter(dec!(0.83)), tier)
    }

    fn owner(costs: OwnerCosts) -> QuoteTerms {
        QuoteTerms::new(CostBasis::Owner(costs), Tier::Ordinary)
    }

    fn stay(checkin: &str, nights: u32) -> Stay {
        Stay::new(d(checkin), nights).unwrap()
    }

    const FAR_AHEAD: &str = "2024-06-01";

    #[test]
    fn tier_parse_loose_accepts_long_names() {
        assert_eq!(Tier::parse_loose("Executive (25% off)"), Tier::Executive);
        assert_eq!(Tier::parse_loose("Presidential"), Tier::Presidential);
        assert_eq!(Tier::parse_loose("chairman"), Tier::Presidential);
        assert_eq!(Tier::parse_loose("No Discount"), Tier::Ordinary);
        assert_eq!(String::from(Tier::Executive), "Executive");
    }

    #[test]
    fn tier_discount_respects_window() {
        assert_eq!(Tier::Executive.discount(700, 30), (525, true));
        assert_eq!(Tier::Executive.discount(700, 31), (700, false));
        assert_eq!(Tier::Presidential.discount(3, 60), (2, true));
        assert_eq!(Tier::Ordinary.discount(700, 0), (700, false));
    }

    #[test]
    fn stay_length_is_bounded() {
        assert_eq!(
            Stay::new(d("2025-03-01"), 0),
            Err(DomainError::InvalidStayLength { nights: 0, max: 60 })
        );
        assert!(Stay::new(d("2025-03-01"), 61).is_err());
        let bad: Result<Stay, _> =
            serde_json::from_str(r#"{"checkin":"2025-03-01","nights":90}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn renter_quote_prices_each_night() {
        let q = newport()
            .quote_stay("2BR", stay("2025-03-06", 3), &renter(Tier::Ordinary), d(FAR_AHEAD))
            .unwrap();
        let points: Vec<_> = q.lines.iter().map(|l| l.points).collect();
        assert_eq!(points, vec![300, 700, 700]);
        assert_eq!(q.lines[0].label, "2025-03-06");
        assert_eq!(q.lines[0].weekday, Some(Weekday::Thu));
        assert_eq!(q.lines[0].cost.total, dec!(249));
        assert_eq!(q.lines[1].cost.total, dec!(581));
        assert_eq!(q.total_points, 1700);
        assert_eq!(q.cost.total, dec!(1411));
        assert_eq!(q.mode, UserMode::Renter);
        assert!(!q.discount_applied);
    }

    #[test]
    fn holiday_week_is_priced_once() {
        let q = newport()
            .quote_stay("2BR", stay("2025-07-02", 5), &renter(Tier::Ordinary), d(FAR_AHEAD))
            .unwrap();
        assert_eq!(q.lines.len(), 3);
        let holiday = &q.lines[2];
        assert!(holiday.is_holiday());
        assert_eq!(holiday.label, "Independence Day (Jul 04, 2025 - Jul 10, 2025)");
        assert_eq!(holiday.points, 4950);
        assert_eq!(holiday.weekday, None);
        assert_eq!(q.total_points, 300 + 300 + 4950);
    }

    #[test]
    fn walk_resumes_after_holiday_end() {
        // Check in mid-week: the rest of the week is covered by the single holiday line.
        let q = newport()
            .quote_stay("2BR", stay("2025-07-08", 5), &renter(Tier::Ordinary), d(FAR_AHEAD))
            .unwrap();
        let labels: Vec<_> = q.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Independence Day (Jul 04, 2025 - Jul 10, 2025)", "2025-07-11", "2025-07-12"]
        );
    }

    #[test]
    fn stay_across_new_year_uses_spilled_holiday() {
        let q = newport()
            .quote_stay("2BR", stay("2025-12-24", 10), &renter(Tier::Ordinary), d(FAR_AHEAD))
            .unwrap();
        let buckets: Vec<_> = q
            .lines
            .iter()
            .filter_map(|l| l.bucket.as_ref())
            .map(|b| b.name())
            .collect();
        assert_eq!(buckets, vec!["Christmas", "New Year's Eve/Day", "Low Season"]);
        assert_eq!(q.total_points, 4950 + 5200 + 700);
    }

    #[test]
    fn unpriced_nights_cost_nothing() {
        // 2024 is not published and 2025 opens on Jan 3.
        let q = newport()
            .quote_stay("2BR", stay("2024-12-31", 4), &renter(Tier::Ordinary), d(FAR_AHEAD))
            .unwrap();
        assert_eq!(q.lines.len(), 4);
        assert!(q.lines[..3].iter().all(|l| l.is_unpriced() && l.points == 0));
        assert_eq!(q.lines[0].cost.total, Decimal::ZERO);
        assert!(!q.lines[3].is_unpriced());
        assert_eq!(q.lines[3].points, 700);
        assert_eq!(q.total_points, 700);
        assert_eq!(
            q.unpriced_days,
            vec![d("2024-12-31"), d("2025-01-01"), d("2025-01-02")]
        );

        let json = serde_json::to_value(&q.lines[0]).unwrap();
        assert!(json.get("bucket").is_none());
    }

    #[test]
    fn oversized_points_do_not_panic() {
        let mut r = newport();
        let huge = || RoomPoints::from([("2BR".into(), 4_000_000_000)]);
        // with_points skips the editor bound, as a hand-built resort could.
        let y = r.year_mut(2026).unwrap();
        y.upsert_holiday(
            HolidayWeek::new("Spring A", range("2026-03-01", "2026-03-01"))
                .unwrap()
                .with_points(huge()),
        )
        .unwrap();
        y.upsert_holiday(
            HolidayWeek::new("Spring B", range("2026-03-02", "2026-03-02"))
                .unwrap()
                .with_points(huge()),
        )
        .unwrap();
        assert!(matches!(
            r.validate(),
            Err(DomainError::PointsOutOfRange { .. })
        ));
        let result = r.quote_stay(
            "2BR",
            stay("2026-03-01", 2),
            &renter(Tier::Ordinary),
            d(FAR_AHEAD),
        );
        assert_eq!(result, Err(DomainError::PointsOverflow));
    }

    #[test]
    fn room_missing_from_holiday_prices_at_zero() {
        let q = newport()
            .quote_stay("3BR", stay("2025-07-04", 1), &renter(Tier::Ordinary), d(FAR_AHEAD))
            .unwrap();
        assert_eq!(q.total_points, 0);
        assert_eq!(q.cost.total, Decimal::ZERO);
    }

    #[test]
    fn executive_discount_inside_window() {
        let q = newport()
            .quote_stay("2BR", stay("2025-03-06", 3), &renter(Tier::Executive), d("2025-03-01"))
            .unwrap();
        assert_eq!(q.total_points, 225 + 525 + 525);
        assert!(q.discount_applied);
        assert_eq!(
            q.discounted_days,
            vec![d("2025-03-06"), d("2025-03-07"), d("2025-03-08")]
        );
    }

    #[test]
    fn discount_window_depends_on_tier() {
        let r = newport();
        let today = d("2025-03-01");
        let exec = r
            .quote_stay("2BR", stay("2025-04-10", 1), &renter(Tier::Executive), today)
            .unwrap();
        assert_eq!(exec.total_points, 300);
        let pres = r
            .quote_stay("2BR", stay("2025-04-10", 1), &renter(Tier::Presidential), today)
            .unwrap();
        assert_eq!(pres.total_points, 210);
    }

    #[test]
    fn holiday_discount_marks_whole_week() {
        let q = newport()
            .quote_stay("2BR", stay("2025-07-06", 1), &renter(Tier::Presidential), d("2025-06-01"))
            .unwrap();
        // Window counts from the holiday start, not the check-in night.
        assert_eq!(q.total_points, 3465);
        assert_eq!(q.discounted_days.len(), 7);
        assert_eq!(q.discounted_days[0], d("2025-07-04"));
    }

    #[test]
    fn owner_quote_splits_components() {
        let q = newport()
            .quote_stay("2BR", stay("2025-03-07", 1), &owner(OwnerCosts::default()), d(FAR_AHEAD))
            .unwrap();
        let cost = &q.lines[0].cost;
        assert_eq!(cost.maintenance, Some(dec!(581)));
        // 700 x 0.175 = 122.5
        assert_eq!(cost.capital, Some(dec!(123)));
        assert_eq!(cost.depreciation, None);
        assert_eq!(cost.total, dec!(704));
        assert_eq!(q.mode, UserMode::Owner);
    }

    #[test]
    fn owner_depreciation_rate() {
        let costs = OwnerCosts {
            include_depreciation: true,
            ..OwnerCosts::default()
        };
        assert_eq!(costs.depreciation_rate(), dec!(0.025));
        assert_eq!(costs.capital_rate(), dec!(0.175));
        let q = newport()
            .quote_stay("2BR", stay("2025-03-07", 1), &owner(costs), d(FAR_AHEAD))
            .unwrap();
        assert_eq!(q.cost.depreciation, Some(dec!(18)));

        let no_life = OwnerCosts {
            useful_life: 0,
            ..OwnerCosts::default()
        };
        assert_eq!(no_life.depreciation_rate(), Decimal::ZERO);
    }

    #[test]
    fn totals_use_total_points() {
        let q = newport()
            .quote_stay("2BR", stay("2025-03-06", 2), &owner(OwnerCosts::default()), d(FAR_AHEAD))
            .unwrap();
        let line_sum: Decimal = q.lines.iter().map(|l| l.cost.total).sum();
        assert_eq!(line_sum, dec!(1006));
        assert_eq!(q.cost.maintenance, Some(dec!(830)));
        assert_eq!(q.cost.capital, Some(dec!(175)));
        assert_eq!(q.cost.total, dec!(1005));
    }

    #[test]
    fn renter_rate_is_rounded_to_cents() {
        let basis = CostBasis::renter(dec!(0.8349));
        assert_eq!(basis, CostBasis::Renter { rate: dec!(0.83) });
        let unrounded = CostBasis::Renter { rate: dec!(0.8349) };
        assert_eq!(unrounded.cost(100).total, dec!(83));
    }

    #[test]
    fn expand_to_holidays_widens_over_week() {
        let r = newport();
        let window = r.expand_to_holidays(stay("2025-07-06", 3)).unwrap();
        assert!(window.adjusted);
        assert_eq!(window.stay.checkin(), d("2025-07-04"));
        assert_eq!(window.stay.nights(), 7);

        let window = r.expand_to_holidays(stay("2025-07-01", 3)).unwrap();
        assert!(!window.adjusted);
        assert_eq!(window.stay, stay("2025-07-01", 3));
    }

    #[test]
    fn expand_to_holidays_keeps_stay_length_bound() {
        let r = newport();
        // Ends on Jul 04; the holiday pushes it to Jul 10.
        assert_eq!(
            r.expand_to_holidays(stay("2025-05-06", 60)),
            Err(DomainError::InvalidStayLength { nights: 66, max: MAX_NIGHTS })
        );
        let window = r.expand_to_holidays(stay("2025-05-12", 54)).unwrap();
        assert!(window.adjusted);
        assert_eq!(window.stay.nights(), MAX_NIGHTS);
        assert_eq!(window.stay.dates(), range("2025-05-12", "2025-07-10"));
    }

    #[test]
    fn expand_to_holidays_reaches_back_into_previous_year() {
        let window = newport().expand_to_holidays(stay("2026-01-01", 1)).unwrap();
        assert!(window.adjusted);
        assert_eq!(window.stay.dates(), range("2025-12-26", "2026-01-01"));
    }

    #[test]
    fn compare_rooms_pivots_costs() {
        let rooms = vec!["2BR".to_string(), "3BR".to_string()];
        let cmp = newport()
            .compare_rooms(&rooms, stay("2025-07-02", 5), &renter(Tier::Ordinary), d(FAR_AHEAD))
            .unwrap();
        assert_eq!(cmp.rows.len(), 3);
        assert_eq!(cmp.rows[0].costs, vec![dec!(249), dec!(332)]);
        assert_eq!(cmp.rows[2].costs, vec![dec!(4109), Decimal::ZERO]);
        assert_eq!(cmp.total.label, "Total Rent");
        assert_eq!(cmp.total.costs, vec![dec!(4607), dec!(664)]);
    }

    #[test]
    fn compare_rooms_requires_a_room() {
        let result = newport().compare_rooms(
            &[],
            stay("2025-07-02", 5),
            &renter(Tier::Ordinary),
            d(FAR_AHEAD),
        );
        assert_eq!(result, Err(DomainError::NoRoomTypes));
    }

    #[test]
    fn owner_comparison_total_label() {
        let cmp = newport()
            .compare_rooms(
                &["2BR".to_string()],
                stay("2025-03-06", 1),
                &owner(OwnerCosts::default()),
                d(FAR_AHEAD),
            )
            .unwrap();
        assert_eq!(cmp.total.label, "Total Cost");
    }

    #[test]
    fn room_summary_covers_every_room() {
        let summary = newport()
            .room_summary(stay("2025-03-06", 3), &renter(Tier::Ordinary), d(FAR_AHEAD))
            .unwrap();
        assert_eq!(
            summary,
            vec![
                RoomSummary {
                    room: "2BR".into(),
                    points: 1700,
                    cost: dec!(1411)
                },
                RoomSummary {
                    room: "3BR".into(),
                    points: 2200,
                    cost: dec!(1826)
                },
            ]
        );
    }

    #[test]
    fn weekly_cost_table_prices_seasons_and_holidays() {
        let table = newport()
            .weekly_cost_table(2025, &renter(Tier::Ordinary))
            .unwrap();
        assert_eq!(table.room_types, vec!["2BR", "3BR"]);
        let low = &table.rows[0];
        assert_eq!(low.kind, BucketKind::Season);
        // 2900 x 0.83 = 2407
        assert_eq!(low.costs["2BR"], Some(dec!(2407)));
        let july = table
            .rows
            .iter()
            .find(|r| r.bucket == "Independence Day")
            .unwrap();
        assert_eq!(july.costs["3BR"], None);
    }

    #[test]
    fn weekly_cost_table_always_discounts() {
        let table = newport()
            .weekly_cost_table(2025, &renter(Tier::Executive))
            .unwrap();
        // floor(2900 x 0.75) = 2175, x 0.83 = 1805.25
        assert_eq!(table.rows[0].costs["2BR"], Some(dec!(1806)));
    }

    #[test]
    fn weekly_cost_table_skips_unpriced_seasons() {
        let mut r = newport();
        let y = r.year_mut(2026).unwrap();
        y.upsert_season(crate::resort::Season::new("AP Rooms").unwrap())
            .unwrap();
        let table = r.weekly_cost_table(2026, &renter(Tier::Ordinary)).unwrap();
        assert!(table.rows.iter().all(|row| row.bucket != "AP Rooms"));
    }

    #[test]
    fn cost_basis_json_is_tagged_by_mode() {
        let basis: CostBasis =
            serde_json::from_str(r#"{"mode":"owner","include_depreciation":true}"#).unwrap();
        let CostBasis::Owner(costs) = basis else {
            panic!("expected owner basis");
        };
        assert!(costs.include_depreciation);
        assert_eq!(costs.maintenance_rate, dec!(0.83));

        let basis: CostBasis = serde_json::from_str(r#"{"mode":"renter","rate":0.5}"#).unwrap();
        assert_eq!(basis.mode(), UserMode::Renter);
    }
}
