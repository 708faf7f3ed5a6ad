//! Entity store and recorder integration tests:
//! - cascade deletes down the hierarchy
//! - all-or-nothing decision + risk event writes
//! - dangling parent links surface as integrity errors
//! - governance trail lines for committed recordings

use pretty_assertions::assert_eq;
use strata_core::entities::Component;
use strata_core::enums::{AuditAction, EntityType, InspectionLevel, ScorerKind, Severity};
use strata_db::error::DatabaseError;
use strata_db::recorder::ScoringPolicy;
use strata_db::repos::audit::AuditFilter;
use strata_db::repos::component::NewComponent;
use strata_db::service::StrataService;
use strata_risk::LearnedScorer;

async fn test_service() -> StrataService {
    StrataService::new_local(":memory:", None, LearnedScorer::unavailable())
        .await
        .unwrap()
}

async fn count(svc: &StrataService, table: &str) -> i64 {
    let mut rows = svc
        .db()
        .conn()
        .query(&format!("SELECT COUNT(*) FROM {table}"), ())
        .await
        .unwrap();
    rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
}

async fn component_in(svc: &StrataService, zone_id: &str, name: &str) -> Component {
    svc.create_component(&NewComponent {
        zone_id: zone_id.to_string(),
        component_type: name.to_string(),
        load_bearing: true,
        dependency_count: 5,
        redundancy_level: 2.0,
        model_id: None,
    })
    .await
    .unwrap()
}

/// One project, two zones, three components, one governance decision each.
async fn populated(svc: &StrataService) -> (String, Vec<String>, Vec<Component>) {
    let project = svc
        .create_project("Harbour Hospital", "Healthcare", 3.0)
        .await
        .unwrap();
    let core = svc
        .create_zone(&project.id, "Structural Core", 1.5, InspectionLevel::RegulatoryCritical)
        .await
        .unwrap();
    let wing = svc
        .create_zone(&project.id, "East Wing", 0.5, InspectionLevel::Normal)
        .await
        .unwrap();
    let components = vec![
        component_in(svc, &core.id, "Load Bearing Wall").await,
        component_in(svc, &core.id, "Transfer Beam").await,
        component_in(svc, &wing.id, "Column").await,
    ];
    for component in &components {
        svc.record_decision(&component.id, "Design Approval", false, &ScoringPolicy::Governance)
            .await
            .unwrap();
    }
    (project.id, vec![core.id, wing.id], components)
}

// ---------------------------------------------------------------------------
// Cascades
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleting_component_removes_its_decisions_and_events() {
    let svc = test_service().await;
    let (_, _, components) = populated(&svc).await;

    svc.delete_component(&components[0].id).await.unwrap();

    assert_eq!(count(&svc, "components").await, 2);
    assert_eq!(count(&svc, "decisions").await, 2);
    assert_eq!(count(&svc, "risk_events").await, 2);
    assert!(svc.list_decisions(&components[0].id, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_zone_removes_components_transitively() {
    let svc = test_service().await;
    let (_, zones, _) = populated(&svc).await;

    svc.delete_zone(&zones[0]).await.unwrap();

    assert_eq!(count(&svc, "zones").await, 1);
    assert_eq!(count(&svc, "components").await, 1);
    assert_eq!(count(&svc, "decisions").await, 1);
    assert_eq!(count(&svc, "risk_events").await, 1);
}

#[tokio::test]
async fn deleting_project_removes_everything_but_the_audit_trail() {
    let svc = test_service().await;
    let (project_id, _, _) = populated(&svc).await;
    let audit_before = count(&svc, "audit_trail").await;

    svc.delete_project(&project_id).await.unwrap();

    for table in ["projects", "zones", "components", "decisions", "risk_events", "models"] {
        assert_eq!(count(&svc, table).await, 0, "{table}");
    }
    assert_eq!(count(&svc, "audit_trail").await, audit_before + 1);
    let deleted = svc
        .query_audit(&AuditFilter {
            action: Some(AuditAction::Deleted),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].entity_type, EntityType::Project);
}

#[tokio::test]
async fn deleting_twice_is_not_found() {
    let svc = test_service().await;
    let (_, _, components) = populated(&svc).await;
    svc.delete_component(&components[2].id).await.unwrap();
    let err = svc.delete_component(&components[2].id).await.unwrap_err();
    assert!(err.is_not_found(), "{err}");
}

#[tokio::test]
async fn every_decision_has_exactly_one_event() {
    let svc = test_service().await;
    let (_, _, components) = populated(&svc).await;
    svc.record_decision(&components[0].id, "Change Order", true, &ScoringPolicy::Governance)
        .await
        .unwrap();

    let mut rows = svc
        .db()
        .conn()
        .query(
            "SELECT
                (SELECT COUNT(*) FROM decisions d
                  WHERE (SELECT COUNT(*) FROM risk_events r WHERE r.decision_id = d.id) != 1),
                (SELECT COUNT(*) FROM risk_events r
                  WHERE NOT EXISTS (SELECT 1 FROM decisions d WHERE d.id = r.decision_id))",
            (),
        )
        .await
        .unwrap();
    let row = rows.next().await.unwrap().unwrap();
    assert_eq!(row.get::<i64>(0).unwrap(), 0);
    assert_eq!(row.get::<i64>(1).unwrap(), 0);
    assert_eq!(count(&svc, "decisions").await, 4);
}

// ---------------------------------------------------------------------------
// Atomicity and integrity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_event_write_leaves_no_decision() {
    let svc = test_service().await;
    let (_, _, components) = populated(&svc).await;
    let audit_before = count(&svc, "audit_trail").await;
    svc.db()
        .conn()
        .execute("DROP TABLE risk_events", ())
        .await
        .unwrap();

    let err = svc
        .record_decision(&components[0].id, "Design Approval", false, &ScoringPolicy::Governance)
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::LibSql(_)), "{err}");

    assert_eq!(count(&svc, "decisions").await, 3);
    assert_eq!(count(&svc, "audit_trail").await, audit_before);
}

#[tokio::test]
async fn dangling_zone_link_is_an_integrity_error() {
    let svc = test_service().await;
    let conn = svc.db().conn();
    conn.execute("PRAGMA foreign_keys = OFF", ()).await.unwrap();
    conn.execute(
        "INSERT INTO components (id, zone_id, component_type, load_bearing, dependency_count, redundancy_level)
         VALUES ('cmp-deadbeef', 'zon-missing0', 'Orphan Beam', 1, 2, 1.0)",
        (),
    )
    .await
    .unwrap();
    conn.execute("PRAGMA foreign_keys = ON", ()).await.unwrap();

    let err = svc
        .record_decision("cmp-deadbeef", "Design Approval", false, &ScoringPolicy::Governance)
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Integrity(_)), "{err}");
    assert_eq!(count(&svc, "decisions").await, 0);
    assert_eq!(count(&svc, "risk_events").await, 0);
}

#[tokio::test]
async fn unknown_component_is_not_found_and_writes_nothing() {
    let svc = test_service().await;
    populated(&svc).await;
    let audit_before = count(&svc, "audit_trail").await;

    let err = svc
        .record_decision("cmp-00000000", "Design Approval", false, &ScoringPolicy::Governance)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(count(&svc, "decisions").await, 3);
    assert_eq!(count(&svc, "audit_trail").await, audit_before);
}

#[tokio::test]
async fn concurrent_recordings_each_get_their_own_pair() {
    let svc = std::sync::Arc::new(test_service().await);
    let (_, _, components) = populated(&svc).await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let svc = std::sync::Arc::clone(&svc);
        let component_id = components[i % components.len()].id.clone();
        handles.push(tokio::spawn(async move {
            svc.record_decision(&component_id, "Design Approval", i % 2 == 0, &ScoringPolicy::Governance)
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        let record = handle.await.unwrap();
        assert_eq!(record.scorer, ScorerKind::Deterministic);
    }
    assert_eq!(count(&svc, "decisions").await, 11);
    assert_eq!(count(&svc, "risk_events").await, 11);
}

#[tokio::test]
async fn readers_never_see_an_uncommitted_decision() {
    let svc = std::sync::Arc::new(test_service().await);
    let (_, _, components) = populated(&svc).await;
    let component_id = components[0].id.clone();

    let tx = svc.db().begin_write().await.unwrap();
    tx.execute(
        "INSERT INTO decisions (id, component_id, decision_type, severity)
         VALUES ('dec-0000beef', ?1, 'Design Approval', 'high')",
        [component_id.as_str()],
    )
    .await
    .unwrap();

    let listing = tokio::spawn({
        let svc = std::sync::Arc::clone(&svc);
        let component_id = component_id.clone();
        async move { svc.list_decisions(&component_id, 50).await }
    });
    let detail = tokio::spawn({
        let svc = std::sync::Arc::clone(&svc);
        async move { svc.get_decision_detail("dec-0000beef").await }
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(!listing.is_finished(), "list read ran inside an open write");
    assert!(!detail.is_finished(), "detail read ran inside an open write");

    tx.rollback().await;

    let decisions = listing.await.unwrap().unwrap();
    assert_eq!(decisions.len(), 1);
    assert!(decisions.iter().all(|d| d.id != "dec-0000beef"));
    let err = detail.await.unwrap().unwrap_err();
    assert!(err.is_not_found(), "{err}");
}

// ---------------------------------------------------------------------------
// Governance trail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn committed_recordings_are_appended_to_the_project_trail() {
    let dir = tempfile::tempdir().unwrap();
    let svc = StrataService::new_local(
        ":memory:",
        Some(dir.path().join("trail")),
        LearnedScorer::unavailable(),
    )
    .await
    .unwrap();
    assert!(svc.trail().is_enabled());

    let (project_id, _, components) = populated(&svc).await;
    let ops = svc.trail().read_project(&project_id).unwrap();
    assert_eq!(ops.len(), 3);

    let first = &ops[0];
    assert_eq!(first.v, 1);
    assert_eq!(first.component_id, components[0].id);
    assert_eq!(first.severity, Severity::High);
    assert_eq!(first.trace_id, format!("SS-{}-High-1.94", first.decision_id));
    assert!(svc.get_decision(&first.decision_id).await.is_ok());
}
