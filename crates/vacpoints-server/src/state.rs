use std::sync::Arc;

use vacpoints_adapters::dataset::JsonDataset;
use vacpoints_adapters::export::CsvQuoteExporter;
use vacpoints_adapters::persistence::sqlite::SqliteDb;
use vacpoints_app::calculator_service::CalculatorService;
use vacpoints_app::editor_service::EditorService;
use vacpoints_app::settings_service::SettingsService;

#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<CalculatorService<SqliteDb>>,
    pub editor: Arc<EditorService<SqliteDb>>,
    pub settings: Arc<SettingsService<SqliteDb>>,
    pub dataset: JsonDataset,
    pub exporter: CsvQuoteExporter,
}

impl AppState {
    pub fn new(db: SqliteDb) -> Self {
        Self {
            calculator: Arc::new(CalculatorService::new(db.clone())),
            editor: Arc::new(EditorService::new(db.clone())),
            settings: Arc::new(SettingsService::new(db)),
            dataset: JsonDataset::new(),
            exporter: CsvQuoteExporter::new(),
        }
    }
}
