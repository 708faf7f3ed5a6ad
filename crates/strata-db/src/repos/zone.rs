//! Zone repository.

use chrono::Utc;
use strata_core::entities::Zone;
use strata_core::enums::{AuditAction, EntityType, InspectionLevel};
use strata_core::ids::PREFIX_ZONE;
use strata_risk::sanitize;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::StrataService;

const ZONE_COLUMNS: &str = "id, project_id, zone_name, importance_factor, inspection_level, created_at";

fn row_to_zone(row: &libsql::Row) -> Result<Zone, DatabaseError> {
    Ok(Zone {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        zone_name: row.get::<String>(2)?,
        importance_factor: row.get::<f64>(3)?,
        inspection_level: parse_enum(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl StrataService {
    /// Create a zone under an existing project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project does not exist;
    /// nothing is written in that case.
    pub async fn create_zone(
        &self,
        project_id: &str,
        zone_name: &str,
        importance_factor: f64,
        inspection_level: InspectionLevel,
    ) -> Result<Zone, DatabaseError> {
        self.get_project(project_id).await?;

        let now = Utc::now();
        let zone = Zone {
            id: self.db().generate_id(PREFIX_ZONE).await?,
            project_id: project_id.to_string(),
            zone_name: zone_name.to_string(),
            importance_factor: sanitize::level(importance_factor),
            inspection_level,
            created_at: now,
        };

        let tx = self.db().begin_write().await?;
        let result: Result<_, DatabaseError> = async {
            tx.execute(
                "INSERT INTO zones (id, project_id, zone_name, importance_factor, inspection_level, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    zone.id.as_str(),
                    zone.project_id.as_str(),
                    zone.zone_name.as_str(),
                    zone.importance_factor,
                    zone.inspection_level.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            self.append_audit(
                &tx,
                EntityType::Zone,
                &zone.id,
                AuditAction::Created,
                Some(serde_json::json!({ "project_id": zone.project_id })),
                now,
            )
            .await
        }
        .await;
        if let Err(e) = result {
            tx.rollback().await;
            return Err(e);
        }
        tx.commit().await?;

        tracing::debug!(zone_id = %zone.id, project_id, "zone created");
        Ok(zone)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no zone has this id.
    pub async fn get_zone(&self, id: &str) -> Result<Zone, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(&format!("SELECT {ZONE_COLUMNS} FROM zones WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Zone, id))?;
        row_to_zone(&row)
    }

    /// Zones of one project in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_zones(&self, project_id: &str) -> Result<Vec<Zone>, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {ZONE_COLUMNS} FROM zones WHERE project_id = ?1 ORDER BY created_at, rowid"
                ),
                [project_id],
            )
            .await?;
        let mut zones = Vec::new();
        while let Some(row) = rows.next().await? {
            zones.push(row_to_zone(&row)?);
        }
        Ok(zones)
    }

    /// Delete a zone and, by cascade, its components and their decisions.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no zone has this id.
    pub async fn delete_zone(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_entity(EntityType::Zone, "zones", id).await
    }
}
