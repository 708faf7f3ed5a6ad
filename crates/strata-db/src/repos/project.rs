//! Project repository.

use chrono::Utc;
use strata_core::entities::Project;
use strata_core::enums::{AuditAction, EntityType};
use strata_core::ids::PREFIX_PROJECT;
use strata_risk::sanitize;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::StrataService;

const PROJECT_COLUMNS: &str = "id, name, project_type, regulatory_level, created_at";

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        project_type: row.get::<String>(2)?,
        regulatory_level: row.get::<f64>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl StrataService {
    /// Create a project. A non-finite or negative regulatory level is
    /// stored as `0`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn create_project(
        &self,
        name: &str,
        project_type: &str,
        regulatory_level: f64,
    ) -> Result<Project, DatabaseError> {
        let now = Utc::now();
        let project = Project {
            id: self.db().generate_id(PREFIX_PROJECT).await?,
            name: name.to_string(),
            project_type: project_type.to_string(),
            regulatory_level: sanitize::level(regulatory_level),
            created_at: now,
        };

        let tx = self.db().begin_write().await?;
        let result: Result<_, DatabaseError> = async {
            tx.execute(
                "INSERT INTO projects (id, name, project_type, regulatory_level, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    project.id.as_str(),
                    project.name.as_str(),
                    project.project_type.as_str(),
                    project.regulatory_level,
                    now.to_rfc3339()
                ],
            )
            .await?;
            self.append_audit(&tx, EntityType::Project, &project.id, AuditAction::Created, None, now)
                .await
        }
        .await;
        if let Err(e) = result {
            tx.rollback().await;
            return Err(e);
        }
        tx.commit().await?;

        tracing::debug!(project_id = %project.id, "project created");
        Ok(project)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has this id.
    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Project, id))?;
        row_to_project(&row)
    }

    /// Most recent projects first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_projects(&self, limit: u32) -> Result<Vec<Project>, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, rowid DESC LIMIT ?1"
                ),
                [i64::from(limit)],
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Delete a project and, by cascade, its zones, components, decisions,
    /// risk events, and models.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has this id.
    pub async fn delete_project(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_entity(EntityType::Project, "projects", id).await
    }

    /// Shared delete protocol: gated transaction, row delete (cascades run
    /// inside it), audit entry, commit.
    pub(crate) async fn delete_entity(
        &self,
        entity_type: EntityType,
        table: &str,
        id: &str,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now();
        let tx = self.db().begin_write().await?;
        let result: Result<_, DatabaseError> = async {
            let deleted = tx
                .execute(&format!("DELETE FROM {table} WHERE id = ?1"), [id])
                .await?;
            if deleted == 0 {
                return Err(DatabaseError::not_found(entity_type, id));
            }
            self.append_audit(&tx, entity_type, id, AuditAction::Deleted, None, now)
                .await
        }
        .await;
        if let Err(e) = result {
            tx.rollback().await;
            return Err(e);
        }
        tx.commit().await?;

        tracing::debug!(%entity_type, id, "entity deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;

    #[tokio::test]
    async fn create_and_get_project() {
        let svc = test_service().await;
        let project = svc
            .create_project("Harbour Hospital", "Healthcare", 3.0)
            .await
            .unwrap();
        assert!(project.id.starts_with("prj-"));

        let fetched = svc.get_project(&project.id).await.unwrap();
        assert_eq!(fetched.name, "Harbour Hospital");
        assert_eq!(fetched.project_type, "Healthcare");
        assert!((fetched.regulatory_level - 3.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn negative_regulatory_level_is_stored_as_zero() {
        let svc = test_service().await;
        let project = svc.create_project("P", "Residential", -2.0).await.unwrap();
        let fetched = svc.get_project(&project.id).await.unwrap();
        assert!(fetched.regulatory_level.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn get_missing_project_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_project("prj-00000000").await.unwrap_err();
        assert!(err.is_not_found(), "{err}");
    }

    #[tokio::test]
    async fn list_projects_respects_limit() {
        let svc = test_service().await;
        for i in 0..3 {
            svc.create_project(&format!("P{i}"), "Commercial", 1.0)
                .await
                .unwrap();
        }
        assert_eq!(svc.list_projects(10).await.unwrap().len(), 3);
        assert_eq!(svc.list_projects(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_missing_project_is_not_found_and_unaudited() {
        let svc = test_service().await;
        let err = svc.delete_project("prj-00000000").await.unwrap_err();
        assert!(err.is_not_found());
        let audit = svc
            .query_audit(&crate::repos::audit::AuditFilter::default())
            .await
            .unwrap();
        assert!(audit.is_empty());
    }
}
