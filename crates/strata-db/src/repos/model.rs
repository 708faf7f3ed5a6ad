//! External 3D model repository.
//!
//! A model is a project-scoped pointer to a GLB asset plus the most recent
//! risk state rendered onto it. Recording an edit refreshes that state via
//! [`StrataService::update_model_visual_state`].

use chrono::Utc;
use strata_core::entities::Model;
use strata_core::enums::{AuditAction, EntityType, Severity};
use strata_core::ids::PREFIX_MODEL;
use strata_core::responses::ModelCategory;

use crate::error::DatabaseError;
use crate::helpers::{get_count, get_opt_f64, get_opt_string, parse_datetime, parse_enum};
use crate::service::StrataService;

const MODEL_COLUMNS: &str = "id, project_id, category, name, external_asset_reference, current_risk, current_severity, updated_at";

fn row_to_model(row: &libsql::Row) -> Result<Model, DatabaseError> {
    Ok(Model {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        category: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
        external_asset_reference: row.get::<String>(4)?,
        current_risk: get_opt_f64(row, 5)?,
        current_severity: get_opt_string(row, 6)?
            .map(|s| parse_enum::<Severity>(&s))
            .transpose()?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl StrataService {
    /// Register an external model under a project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project does not exist.
    pub async fn create_model(
        &self,
        project_id: &str,
        category: &str,
        name: &str,
        external_asset_reference: &str,
    ) -> Result<Model, DatabaseError> {
        self.get_project(project_id).await?;

        let now = Utc::now();
        let model = Model {
            id: self.db().generate_id(PREFIX_MODEL).await?,
            project_id: project_id.to_string(),
            category: category.to_string(),
            name: name.to_string(),
            external_asset_reference: external_asset_reference.to_string(),
            current_risk: None,
            current_severity: None,
            updated_at: now,
        };

        let tx = self.db().begin_write().await?;
        let result: Result<_, DatabaseError> = async {
            tx.execute(
                "INSERT INTO models (id, project_id, category, name, external_asset_reference, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    model.id.as_str(),
                    model.project_id.as_str(),
                    model.category.as_str(),
                    model.name.as_str(),
                    model.external_asset_reference.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            self.append_audit(
                &tx,
                EntityType::Model,
                &model.id,
                AuditAction::Created,
                Some(serde_json::json!({
                    "project_id": model.project_id,
                    "category": model.category,
                })),
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

        tracing::debug!(model_id = %model.id, category, "model registered");
        Ok(model)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no model has this id.
    pub async fn get_model(&self, id: &str) -> Result<Model, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(&format!("SELECT {MODEL_COLUMNS} FROM models WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Model, id))?;
        row_to_model(&row)
    }

    /// Models in one category, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_models_by_category(
        &self,
        category: &str,
        limit: u32,
    ) -> Result<Vec<Model>, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {MODEL_COLUMNS} FROM models WHERE category = ?1
                     ORDER BY updated_at DESC, rowid DESC LIMIT ?2"
                ),
                libsql::params![category, i64::from(limit)],
            )
            .await?;
        let mut models = Vec::new();
        while let Some(row) = rows.next().await? {
            models.push(row_to_model(&row)?);
        }
        Ok(models)
    }

    /// Distinct categories with their model counts, alphabetical.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_model_categories(&self) -> Result<Vec<ModelCategory>, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                "SELECT category, COUNT(*) FROM models GROUP BY category ORDER BY category",
                (),
            )
            .await?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(ModelCategory {
                name: row.get::<String>(0)?,
                model_count: get_count(&row, 1)?,
            });
        }
        Ok(categories)
    }

    /// Point a model at a new asset revision and record the risk it shows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no model has this id.
    pub async fn update_model_visual_state(
        &self,
        model_id: &str,
        asset_reference: &str,
        current_risk: f64,
        current_severity: Severity,
    ) -> Result<Model, DatabaseError> {
        let now = Utc::now();
        let tx = self.db().begin_write().await?;
        let result: Result<_, DatabaseError> = async {
            let updated = tx
                .execute(
                    "UPDATE models
                     SET external_asset_reference = ?1, current_risk = ?2, current_severity = ?3, updated_at = ?4
                     WHERE id = ?5",
                    libsql::params![
                        asset_reference,
                        current_risk,
                        current_severity.as_str(),
                        now.to_rfc3339(),
                        model_id
                    ],
                )
                .await?;
            if updated == 0 {
                return Err(DatabaseError::not_found(EntityType::Model, model_id));
            }
            self.append_audit(
                &tx,
                EntityType::Model,
                model_id,
                AuditAction::VisualStateUpdated,
                Some(serde_json::json!({
                    "asset_reference": asset_reference,
                    "current_risk": current_risk,
                    "current_severity": current_severity,
                })),
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

        tracing::debug!(model_id, %current_severity, "model visual state updated");
        self.get_model(model_id).await
    }
}
