use async_trait::async_trait;

use vacpoints_core::resort::Resort;
use vacpoints_ports::error::PortError;
use vacpoints_ports::outbound::ResortRepository;

use super::SqliteDb;

const UPSERT: &str = "INSERT INTO resorts (id, name, data) VALUES (?, ?, ?)
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, data = excluded.data";

fn to_document(resort: &Resort) -> Result<String, PortError> {
    serde_json::to_string(resort).map_err(|e| PortError::Persistence(e.to_string()))
}

#[async_trait]
impl ResortRepository for SqliteDb {
    async fn save(&self, resort: &Resort) -> Result<(), PortError> {
        let data = to_document(resort)?;
        sqlx::query(UPSERT)
            .bind(resort.id().as_str())
            .bind(resort.name())
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }

    async fn save_all(&self, resorts: &[Resort]) -> Result<(), PortError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        for resort in resorts {
            let data = to_document(resort)?;
            sqlx::query(UPSERT)
                .bind(resort.id().as_str())
                .bind(resort.name())
                .bind(&data)
                .execute(&mut *tx)
                .await
                .map_err(|e| PortError::Persistence(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Resort>, PortError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM resorts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        match row {
            Some((data,)) => {
                let resort: Resort = serde_json::from_str(&data)
                    .map_err(|e| PortError::Persistence(e.to_string()))?;
                Ok(Some(resort))
            }
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Resort>, PortError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT data FROM resorts ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        let mut resorts = Vec::with_capacity(rows.len());
        for (data,) in rows {
            let resort: Resort =
                serde_json::from_str(&data).map_err(|e| PortError::Persistence(e.to_string()))?;
            resorts.push(resort);
        }
        Ok(resorts)
    }

    async fn delete(&self, id: &str) -> Result<(), PortError> {
        let result = sqlx::query("DELETE FROM resorts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound);
        }
        Ok(())
    }
}
