//! Shared fixtures for in-crate tests.

use strata_core::entities::{Component, Project, Zone};
use strata_core::enums::InspectionLevel;
use strata_risk::LearnedScorer;

use crate::StrataDb;
use crate::repos::component::NewComponent;
use crate::service::StrataService;
use crate::trail::writer::TrailWriter;

/// In-memory service, trail disabled, learned scorer unavailable.
pub async fn test_service() -> StrataService {
    let db = StrataDb::open_local(":memory:").await.unwrap();
    StrataService::from_db(db, TrailWriter::disabled(), LearnedScorer::unavailable())
}

/// The reference hierarchy: regulatory 3, importance 1.5, a load-bearing
/// component with 5 dependencies and redundancy 2.
pub async fn reference_hierarchy(svc: &StrataService) -> (Project, Zone, Component) {
    let project = svc
        .create_project("Harbour Hospital", "Healthcare", 3.0)
        .await
        .unwrap();
    let zone = svc
        .create_zone(
            &project.id,
            "Structural Core",
            1.5,
            InspectionLevel::RegulatoryCritical,
        )
        .await
        .unwrap();
    let component = svc
        .create_component(&NewComponent {
            zone_id: zone.id.clone(),
            component_type: "Load Bearing Wall".into(),
            load_bearing: true,
            dependency_count: 5,
            redundancy_level: 2.0,
            model_id: None,
        })
        .await
        .unwrap();
    (project, zone, component)
}

/// `SELECT COUNT(*)` over a table.
pub async fn count_rows(svc: &StrataService, table: &str) -> i64 {
    let mut rows = svc
        .db()
        .conn()
        .query(&format!("SELECT COUNT(*) FROM {table}"), ())
        .await
        .unwrap();
    rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
}
