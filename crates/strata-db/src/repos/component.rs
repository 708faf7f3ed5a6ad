//! Component repository.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use strata_core::entities::Component;
use strata_core::enums::{AuditAction, EntityType};
use strata_core::ids::PREFIX_COMPONENT;
use strata_risk::sanitize;

use crate::error::DatabaseError;
use crate::helpers::{bool_to_sql, get_bool, get_count, get_opt_string, parse_datetime};
use crate::service::StrataService;

const COMPONENT_COLUMNS: &str =
    "id, zone_id, component_type, load_bearing, dependency_count, redundancy_level, model_id, created_at";

/// Input for [`StrataService::create_component`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComponent {
    pub zone_id: String,
    pub component_type: String,
    pub load_bearing: bool,
    pub dependency_count: u32,
    pub redundancy_level: f64,
    /// Optional link to an external 3D model in the same project.
    pub model_id: Option<String>,
}

fn row_to_component(row: &libsql::Row) -> Result<Component, DatabaseError> {
    Ok(Component {
        id: row.get::<String>(0)?,
        zone_id: row.get::<String>(1)?,
        component_type: row.get::<String>(2)?,
        load_bearing: get_bool(row, 3)?,
        dependency_count: get_count(row, 4)?,
        redundancy_level: row.get::<f64>(5)?,
        model_id: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl StrataService {
    /// Create a component in an existing zone, optionally linked to a model.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the zone or the linked model does
    /// not exist; nothing is written in that case.
    pub async fn create_component(&self, new: &NewComponent) -> Result<Component, DatabaseError> {
        self.get_zone(&new.zone_id).await?;
        if let Some(model_id) = &new.model_id {
            self.get_model(model_id).await?;
        }

        let now = Utc::now();
        let component = Component {
            id: self.db().generate_id(PREFIX_COMPONENT).await?,
            zone_id: new.zone_id.clone(),
            component_type: new.component_type.clone(),
            load_bearing: new.load_bearing,
            dependency_count: new.dependency_count,
            redundancy_level: sanitize::level(new.redundancy_level),
            model_id: new.model_id.clone(),
            created_at: now,
        };

        let tx = self.db().begin_write().await?;
        let result: Result<_, DatabaseError> = async {
            tx.execute(
                "INSERT INTO components (id, zone_id, component_type, load_bearing, dependency_count, redundancy_level, model_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    component.id.as_str(),
                    component.zone_id.as_str(),
                    component.component_type.as_str(),
                    bool_to_sql(component.load_bearing),
                    i64::from(component.dependency_count),
                    component.redundancy_level,
                    component.model_id.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            self.append_audit(
                &tx,
                EntityType::Component,
                &component.id,
                AuditAction::Created,
                Some(serde_json::json!({ "zone_id": component.zone_id })),
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

        tracing::debug!(component_id = %component.id, zone_id = %component.zone_id, "component created");
        Ok(component)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no component has this id.
    pub async fn get_component(&self, id: &str) -> Result<Component, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                &format!("SELECT {COMPONENT_COLUMNS} FROM components WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Component, id))?;
        row_to_component(&row)
    }

    /// Components of one zone in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_components(&self, zone_id: &str) -> Result<Vec<Component>, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {COMPONENT_COLUMNS} FROM components WHERE zone_id = ?1 ORDER BY created_at, rowid"
                ),
                [zone_id],
            )
            .await?;
        let mut components = Vec::new();
        while let Some(row) = rows.next().await? {
            components.push(row_to_component(&row)?);
        }
        Ok(components)
    }

    /// Delete a component and, by cascade, its decisions and risk events.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no component has this id.
    pub async fn delete_component(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_entity(EntityType::Component, "components", id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{count_rows, reference_hierarchy, test_service};

    #[tokio::test]
    async fn create_and_list_components() {
        let svc = test_service().await;
        let (_, zone, component) = reference_hierarchy(&svc).await;
        assert!(component.id.starts_with("cmp-"));
        assert!(component.load_bearing);
        assert_eq!(component.dependency_count, 5);

        let fetched = svc.get_component(&component.id).await.unwrap();
        assert_eq!(fetched, component);
        assert_eq!(svc.list_components(&zone.id).await.unwrap(), vec![component]);
    }

    #[tokio::test]
    async fn unknown_zone_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .create_component(&NewComponent {
                zone_id: "zon-00000000".into(),
                component_type: "Column".into(),
                load_bearing: false,
                dependency_count: 0,
                redundancy_level: 0.0,
                model_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::NotFound {
                entity_type: EntityType::Zone,
                ..
            }
        ));
        assert_eq!(count_rows(&svc, "components").await, 0);
    }

    #[tokio::test]
    async fn unknown_model_is_not_found() {
        let svc = test_service().await;
        let (_, zone, _) = reference_hierarchy(&svc).await;
        let err = svc
            .create_component(&NewComponent {
                zone_id: zone.id,
                component_type: "Column".into(),
                load_bearing: true,
                dependency_count: 1,
                redundancy_level: 1.0,
                model_id: Some("mdl-00000000".into()),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::NotFound {
                entity_type: EntityType::Model,
                ..
            }
        ));
        assert_eq!(count_rows(&svc, "components").await, 1);
    }

    #[tokio::test]
    async fn component_links_to_model() {
        let svc = test_service().await;
        let (project, zone, _) = reference_hierarchy(&svc).await;
        let model = svc
            .create_model(&project.id, "Healthcare", "Core Frame", "memory://assets/core.glb")
            .await
            .unwrap();
        let component = svc
            .create_component(&NewComponent {
                zone_id: zone.id,
                component_type: "Transfer Beam".into(),
                load_bearing: true,
                dependency_count: 3,
                redundancy_level: 1.0,
                model_id: Some(model.id.clone()),
            })
            .await
            .unwrap();
        assert_eq!(
            svc.get_component(&component.id).await.unwrap().model_id,
            Some(model.id)
        );
    }
}
