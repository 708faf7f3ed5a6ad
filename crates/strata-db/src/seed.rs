//! Sample portfolio for demos and smoke tests.

use strata_core::enums::InspectionLevel;
use strata_core::responses::SeedResponse;
use strata_core::scale::parse_scale;

use crate::error::DatabaseError;
use crate::repos::component::NewComponent;
use crate::service::StrataService;

const DUCK_GLB: &str =
    "https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/master/2.0/Duck/glTF-Binary/Duck.glb";
const BOX_GLB: &str =
    "https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/master/2.0/Box/glTF-Binary/Box.glb";

impl StrataService {
    /// Create three projects with zones, components, and linked models.
    ///
    /// Every call creates a fresh set; nothing is deduplicated.
    ///
    /// # Errors
    ///
    /// Returns the first store error. Entities created before it remain.
    pub async fn seed_sample_data(&self) -> Result<SeedResponse, DatabaseError> {
        let hospital = self
            .create_project("City Hospital Complex", "Healthcare", parse_scale("High"))
            .await?;
        let apartments = self
            .create_project("Oceanview Apartments", "Residential", parse_scale("Medium"))
            .await?;
        let tower = self
            .create_project("Skyline Office Tower", "Commercial", parse_scale("High"))
            .await?;

        let core = self
            .create_zone(&hospital.id, "Structural Core", 1.5, InspectionLevel::RegulatoryCritical)
            .await?;
        let wings = self
            .create_zone(&hospital.id, "Patient Wings", 1.2, InspectionLevel::Enhanced)
            .await?;
        self.create_zone(&apartments.id, "Residential Towers", 1.0, InspectionLevel::Normal)
            .await?;

        let wing_model = self
            .create_model(&hospital.id, "Healthcare", "Hospital Wing A", DUCK_GLB)
            .await?;
        let room_model = self
            .create_model(&hospital.id, "Healthcare", "Patient Room", BOX_GLB)
            .await?;
        self.create_model(&hospital.id, "Healthcare", "Operating Theater", DUCK_GLB)
            .await?;
        self.create_model(&apartments.id, "Residential", "Apartment Tower A", BOX_GLB)
            .await?;
        self.create_model(&tower.id, "Commercial", "Office Floor 10", DUCK_GLB)
            .await?;

        let components = [
            (&core.id, "Load Bearing Wall", true, 5, "Medium", Some(&wing_model.id)),
            (&core.id, "Steel Beam", true, 8, "High", Some(&wing_model.id)),
            (&wings.id, "Patient Room Partition", false, 2, "Low", Some(&room_model.id)),
        ];
        for (zone_id, component_type, load_bearing, dependency_count, redundancy, model_id) in
            components
        {
            self.create_component(&NewComponent {
                zone_id: zone_id.clone(),
                component_type: component_type.to_string(),
                load_bearing,
                dependency_count,
                redundancy_level: parse_scale(redundancy),
                model_id: model_id.cloned(),
            })
            .await?;
        }

        tracing::info!("sample data seeded");
        Ok(SeedResponse {
            projects: 3,
            zones: 3,
            components: 3,
            models: 5,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::recorder::ScoringPolicy;
    use crate::test_support::{count_rows, test_service};

    #[tokio::test]
    async fn seeds_the_sample_portfolio() {
        let svc = test_service().await;
        let summary = svc.seed_sample_data().await.unwrap();
        assert_eq!(summary.models, 5);
        assert_eq!(count_rows(&svc, "projects").await, 3);
        assert_eq!(count_rows(&svc, "zones").await, 3);
        assert_eq!(count_rows(&svc, "components").await, 3);
        assert_eq!(count_rows(&svc, "models").await, 5);

        let categories = svc.list_model_categories().await.unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[1].name, "Healthcare");
        assert_eq!(categories[1].model_count, 3);
    }

    #[tokio::test]
    async fn seeded_components_are_recordable() {
        let svc = test_service().await;
        svc.seed_sample_data().await.unwrap();
        let mut rows = svc
            .db()
            .conn()
            .query("SELECT id FROM components WHERE component_type = 'Load Bearing Wall'", ())
            .await
            .unwrap();
        let id: String = rows.next().await.unwrap().unwrap().get(0).unwrap();

        // Regulatory "High" = 3, redundancy "Medium" = 2: the reference example.
        let record = svc
            .record_decision(&id, "Design Approval", false, &ScoringPolicy::Governance)
            .await
            .unwrap();
        assert!((record.final_score - 1.9435).abs() < 1e-9);
    }
}
