use async_trait::async_trait;
use chrono::Utc;

use vacpoints_core::settings::Profile;
use vacpoints_ports::error::PortError;
use vacpoints_ports::outbound::SettingsRepository;

use super::SqliteDb;

#[async_trait]
impl SettingsRepository for SqliteDb {
    async fn load_profile(&self, name: &str) -> Result<Option<Profile>, PortError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM profiles WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        match row {
            Some((data,)) => {
                let profile: Profile = serde_json::from_str(&data)
                    .map_err(|e| PortError::Persistence(e.to_string()))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    async fn save_profile(&self, name: &str, profile: &Profile) -> Result<(), PortError> {
        let data =
            serde_json::to_string(profile).map_err(|e| PortError::Persistence(e.to_string()))?;
        let updated_at = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO profiles (name, data, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at",
        )
        .bind(name)
        .bind(&data)
        .bind(&updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }
}
