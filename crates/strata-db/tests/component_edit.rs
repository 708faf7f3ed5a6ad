//! Structural edits: learned scoring plus model visual-state refresh.

use bytes::Bytes;
use pretty_assertions::assert_eq;
use strata_assets::{AssetError, AssetPipeline, AssetStore, MaterialEditor, Rgb, severity_color};
use strata_core::entities::{Component, Model};
use strata_core::enums::{InspectionLevel, ScorerKind, Severity};
use strata_db::repos::component::NewComponent;
use strata_db::service::StrataService;
use strata_risk::LearnedScorer;
use strata_risk::learned::{BoostingParams, EditParameters, TrainingSettings};

/// Appends the target color so each revision is distinguishable.
struct TaggingEditor;

impl MaterialEditor for TaggingEditor {
    async fn recolor(&self, asset: Bytes, color: Rgb) -> Result<Bytes, AssetError> {
        let mut out = asset.to_vec();
        out.extend_from_slice(color.hex().as_bytes());
        Ok(Bytes::from(out))
    }
}

struct BrokenEditor;

impl MaterialEditor for BrokenEditor {
    async fn recolor(&self, _asset: Bytes, _color: Rgb) -> Result<Bytes, AssetError> {
        Err(AssetError::Editor("mesh has no materials".into()))
    }
}

fn trained_scorer() -> LearnedScorer {
    LearnedScorer::train(&TrainingSettings {
        params: BoostingParams {
            estimators: 30,
            max_depth: 4,
            ..BoostingParams::default()
        },
        sample_count: 400,
        seed: 7,
    })
    .unwrap()
}

/// A component linked to a model whose asset lives in `store`.
async fn linked_component(svc: &StrataService, store: &AssetStore) -> (Component, Model) {
    let project = svc
        .create_project("Harbour Hospital", "Healthcare", 3.0)
        .await
        .unwrap();
    let zone = svc
        .create_zone(&project.id, "Structural Core", 1.5, InspectionLevel::RegulatoryCritical)
        .await
        .unwrap();
    let reference = store
        .publish(&project.id, "seed", "initial", Bytes::from_static(b"glb"))
        .await
        .unwrap();
    let model = svc
        .create_model(&project.id, "Healthcare", "Core Frame", &reference)
        .await
        .unwrap();
    let component = svc
        .create_component(&NewComponent {
            zone_id: zone.id,
            component_type: "Load Bearing Wall".into(),
            load_bearing: true,
            dependency_count: 5,
            redundancy_level: 2.0,
            model_id: Some(model.id.clone()),
        })
        .await
        .unwrap();
    (component, model)
}

#[tokio::test]
async fn edit_recolors_the_linked_model() {
    let svc = StrataService::new_local(":memory:", None, trained_scorer())
        .await
        .unwrap();
    let pipeline = AssetPipeline::new(AssetStore::in_memory().unwrap(), TaggingEditor);
    let (component, model) = linked_component(&svc, pipeline.store()).await;

    let response = svc
        .edit_component(&component.id, &EditParameters::default(), true, Some(&pipeline))
        .await
        .unwrap();
    assert_eq!(response.edit_type, "Structural Edit");
    assert_eq!(response.decision.scorer, ScorerKind::Learned);
    assert_eq!(response.decision.severity, Severity::Low);
    assert!(response.decision.explanation.as_deref().unwrap().starts_with("gbt:"));

    let url = response.storage_url.expect("asset refreshed");
    assert_ne!(url, model.external_asset_reference);
    let color = severity_color(Severity::Low);
    assert_eq!(
        pipeline.store().fetch(&url).await.unwrap().as_ref(),
        format!("glb{}", color.hex()).as_bytes()
    );

    let refreshed = svc.get_model(&model.id).await.unwrap();
    assert_eq!(refreshed.external_asset_reference, url);
    assert_eq!(refreshed.current_severity, Some(Severity::Low));
    assert_eq!(refreshed.current_risk, Some(response.decision.final_score));
}

#[tokio::test]
async fn unchanged_color_keeps_the_current_asset() {
    let svc = StrataService::new_local(":memory:", None, trained_scorer())
        .await
        .unwrap();
    let pipeline = AssetPipeline::new(AssetStore::in_memory().unwrap(), TaggingEditor);
    let (component, _) = linked_component(&svc, pipeline.store()).await;

    let first = svc
        .edit_component(&component.id, &EditParameters::default(), true, Some(&pipeline))
        .await
        .unwrap();
    let second = svc
        .edit_component(&component.id, &EditParameters::default(), true, Some(&pipeline))
        .await
        .unwrap();
    assert_eq!(first.decision.severity, second.decision.severity);
    assert_eq!(first.storage_url, second.storage_url);
    assert_eq!(svc.list_decisions(&component.id, 10).await.unwrap().len(), 2);
}

#[tokio::test]
async fn asset_failure_keeps_the_recorded_decision() {
    let svc = StrataService::new_local(":memory:", None, trained_scorer())
        .await
        .unwrap();
    let pipeline = AssetPipeline::new(AssetStore::in_memory().unwrap(), BrokenEditor);
    let (component, model) = linked_component(&svc, pipeline.store()).await;

    let response = svc
        .edit_component(&component.id, &EditParameters::default(), false, Some(&pipeline))
        .await
        .unwrap();
    assert_eq!(response.storage_url, None);

    let detail = svc
        .get_decision_detail(&response.decision.decision_id)
        .await
        .unwrap();
    assert_eq!(detail.risk_event.final_score, response.decision.final_score);
    let untouched = svc.get_model(&model.id).await.unwrap();
    assert_eq!(untouched.external_asset_reference, model.external_asset_reference);
    assert_eq!(untouched.current_severity, None);
}

#[tokio::test]
async fn edit_without_pipeline_only_records() {
    let svc = StrataService::new_local(":memory:", None, LearnedScorer::unavailable())
        .await
        .unwrap();
    let store = AssetStore::in_memory().unwrap();
    let (component, _) = linked_component(&svc, &store).await;

    let response = svc
        .edit_component::<TaggingEditor>(&component.id, &EditParameters::default(), false, None)
        .await
        .unwrap();
    assert_eq!(response.storage_url, None);
    assert_eq!(response.decision.severity, Severity::Unavailable);
    assert_eq!(response.decision.final_score, 0.0);
}

#[tokio::test]
async fn mitigation_lowers_the_learned_score() {
    let svc = StrataService::new_local(":memory:", None, trained_scorer())
        .await
        .unwrap();
    let store = AssetStore::in_memory().unwrap();
    let (component, _) = linked_component(&svc, &store).await;

    let unmitigated = svc
        .edit_component::<TaggingEditor>(&component.id, &EditParameters::default(), false, None)
        .await
        .unwrap();
    let mitigated = svc
        .edit_component::<TaggingEditor>(&component.id, &EditParameters::default(), true, None)
        .await
        .unwrap();
    assert!(mitigated.decision.final_score < unmitigated.decision.final_score);
}
