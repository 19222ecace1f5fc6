use csv::Writer;
use rust_decimal::Decimal;

use vacpoints_core::quote::{CostBreakdown, Quote, UserMode};
use vacpoints_ports::error::PortError;
use vacpoints_ports::outbound::QuoteExporter;

/// Quote breakdown as a spreadsheet: one row per line, then the stay total.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvQuoteExporter;

impl CsvQuoteExporter {
    pub fn new() -> Self {
        Self
    }
}

impl QuoteExporter for CsvQuoteExporter {
    fn export(&self, quote: &Quote) -> Result<Vec<u8>, PortError> {
        let mut writer = Writer::from_writer(Vec::new());

        let mut header = vec!["Date".to_string(), "Day".to_string(), "Points".to_string()];
        match quote.mode {
            UserMode::Owner => {
                if quote.cost.maintenance.is_some() {
                    header.push("Maintenance".into());
                }
                if quote.cost.capital.is_some() {
                    header.push("Capital Cost".into());
                }
                if quote.cost.depreciation.is_some() {
                    header.push("Depreciation".into());
                }
                header.push("Total Cost".into());
            }
            UserMode::Renter => header.push(quote.room.clone()),
        }
        writer
            .write_record(&header)
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        for line in &quote.lines {
            let mut record = vec![
                line.label.clone(),
                line.weekday.map(|w| w.to_string()).unwrap_or_default(),
                line.points.to_string(),
            ];
            record.extend(money_columns(quote.mode, &line.cost));
            writer
                .write_record(&record)
                .map_err(|e| PortError::Persistence(e.to_string()))?;
        }

        let mut total = vec![
            "Total".to_string(),
            String::new(),
            quote.total_points.to_string(),
        ];
        total.extend(money_columns(quote.mode, &quote.cost));
        writer
            .write_record(&total)
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        writer
            .into_inner()
            .map_err(|e| PortError::Persistence(e.to_string()))
    }

    fn content_type(&self) -> &str {
        "text/csv"
    }
}

fn money_columns(mode: UserMode, cost: &CostBreakdown) -> Vec<String> {
    match mode {
        UserMode::Owner => [cost.maintenance, cost.capital, cost.depreciation]
            .into_iter()
            .flatten()
            .chain(std::iter::once(cost.total))
            .map(format_money)
            .collect(),
        UserMode::Renter => vec![format_money(cost.total)],
    }
}

/// Whole dollars with thousands separators: `$12,345`.
pub fn format_money(amount: Decimal) -> String {
    let whole = amount.round_dp(0).abs().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount.is_sign_negative() && !amount.round_dp(0).is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
