use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::ResortId;
use crate::quote::{CostBasis, OwnerCosts, QuoteTerms, Tier, UserMode};

/// Saved calculator preferences of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub maintenance_rate: Decimal,
    pub purchase_price: Decimal,
    pub capital_cost_pct: Decimal,
    pub salvage_value: Decimal,
    pub useful_life: u32,
    pub discount_tier: Tier,
    pub include_maintenance: bool,
    pub include_capital: bool,
    pub include_depreciation: bool,
    pub renter_rate: Decimal,
    pub renter_discount_tier: Tier,
    #[serde(deserialize_with = "blank_as_none")]
    pub preferred_resort_id: Option<ResortId>,
}

impl Default for Profile {
    fn default() -> Self {
        let owner = OwnerCosts::default();
        Self {
            maintenance_rate: owner.maintenance_rate,
            purchase_price: owner.purchase_price,
            capital_cost_pct: owner.capital_cost_pct,
            salvage_value: owner.salvage_value,
            useful_life: owner.useful_life,
            discount_tier: Tier::Ordinary,
            include_maintenance: owner.include_maintenance,
            include_capital: owner.include_capital,
            include_depreciation: owner.include_depreciation,
            renter_rate: dec!(0.83),
            renter_discount_tier: Tier::Ordinary,
            preferred_resort_id: None,
        }
    }
}

// Saved profiles write "" when no resort is selected.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<ResortId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => ResortId::parse(id)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl Profile {
    pub fn owner_costs(&self) -> OwnerCosts {
        OwnerCosts {
            maintenance_rate: self.maintenance_rate,
            purchase_price: self.purchase_price,
            capital_cost_pct: self.capital_cost_pct,
            salvage_value: self.salvage_value,
            useful_life: self.useful_life,
            include_maintenance: self.include_maintenance,
            include_capital: self.include_capital,
            include_depreciation: self.include_depreciation,
        }
    }

    pub fn terms(&self, mode: UserMode) -> QuoteTerms {
        match mode {
            UserMode::Owner => {
                QuoteTerms::new(CostBasis::Owner(self.owner_costs()), self.discount_tier)
            }
            UserMode::Renter => QuoteTerms::new(
                CostBasis::renter(self.renter_rate),
                self.renter_discount_tier,
            ),
        }
    }

    /// Form stored on save: dollar rates kept to the cent.
    pub fn normalized(mut self) -> Self {
        self.maintenance_rate = self.maintenance_rate.round_dp(2);
        self.renter_rate = self.renter_rate.round_dp(2);
        self
    }
}
