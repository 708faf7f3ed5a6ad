//! Decision/Event recorder.
//!
//! Resolves a component's project and zone context, scores it with the
//! scorer named by a [`ScoringPolicy`], and writes the decision together
//! with its risk event in one transaction. Scoring runs before the write
//! gate is taken, so recordings only contend for the store while writing.

use chrono::Utc;
use strata_assets::{AssetPipeline, MaterialEditor, severity_color};
use strata_core::entities::{Component, Model, Project, Zone};
use strata_core::enums::{AuditAction, EntityType, ScorerKind, Severity, ThresholdAction};
use strata_core::ids::{PREFIX_DECISION, PREFIX_RISK_EVENT};
use strata_core::responses::{
    ComponentEditResponse, DecisionRecord, ESCALATION_WARNING, trace_stub,
};
use strata_core::trail::TrailOperation;
use strata_risk::deterministic::{self, RiskInputs};
use strata_risk::learned::{EditParameters, FeatureVector};

use crate::error::DatabaseError;
use crate::helpers::bool_to_sql;
use crate::service::StrataService;

/// Which scorer a recording uses.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringPolicy {
    /// Governance decisions use the deterministic multi-factor scorer.
    Governance,
    /// Structural edits use the learned scorer on the edit's parameters.
    StructuralEdit(EditParameters),
}

impl ScoringPolicy {
    #[must_use]
    pub const fn scorer(&self) -> ScorerKind {
        match self {
            Self::Governance => ScorerKind::Deterministic,
            Self::StructuralEdit(_) => ScorerKind::Learned,
        }
    }
}

/// A component with the zone and project it belongs to.
#[derive(Debug, Clone)]
pub struct ComponentContext {
    pub project: Project,
    pub zone: Zone,
    pub component: Component,
}

struct Scored {
    scorer: ScorerKind,
    base_risk: Option<f64>,
    adjusted_risk: Option<f64>,
    final_score: f64,
    severity: Severity,
    confidence: Option<f64>,
    explanation: Option<String>,
}

impl StrataService {
    /// Resolve a component's zone and project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the component does not exist and
    /// `DatabaseError::Integrity` if its zone or project link is dangling.
    pub async fn load_component_context(
        &self,
        component_id: &str,
    ) -> Result<ComponentContext, DatabaseError> {
        let component = self.get_component(component_id).await?;
        let zone = self
            .get_zone(&component.zone_id)
            .await
            .map_err(|e| dangling(e, component_id, "zone", &component.zone_id))?;
        let project = self
            .get_project(&zone.project_id)
            .await
            .map_err(|e| dangling(e, &zone.id, "project", &zone.project_id))?;
        Ok(ComponentContext {
            project,
            zone,
            component,
        })
    }

    /// Score a component and persist the decision and its risk event.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown component,
    /// `DatabaseError::Integrity` for a broken zone or project link, and any
    /// store error from the write. On error nothing is persisted.
    pub async fn record_decision(
        &self,
        component_id: &str,
        decision_type: &str,
        mitigation_flag: bool,
        policy: &ScoringPolicy,
    ) -> Result<DecisionRecord, DatabaseError> {
        let ctx = self.load_component_context(component_id).await?;
        let scored = self.score(&ctx, mitigation_flag, policy);

        let now = Utc::now();
        let decision_id = self.db().generate_id(PREFIX_DECISION).await?;
        let risk_event_id = self.db().generate_id(PREFIX_RISK_EVENT).await?;

        let tx = self.db().begin_write().await?;
        let result: Result<_, DatabaseError> = async {
            tx.execute(
                "INSERT INTO decisions (id, component_id, decision_type, severity, mitigation_flag, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    decision_id.as_str(),
                    component_id,
                    decision_type,
                    scored.severity.as_str(),
                    bool_to_sql(mitigation_flag),
                    now.to_rfc3339()
                ],
            )
            .await?;
            tx.execute(
                "INSERT INTO risk_events (id, decision_id, scorer, base_risk, adjusted_risk, final_score, severity, explanation, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    risk_event_id.as_str(),
                    decision_id.as_str(),
                    scored.scorer.as_str(),
                    scored.base_risk,
                    scored.adjusted_risk,
                    scored.final_score,
                    scored.severity.as_str(),
                    scored.explanation.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            self.append_audit(
                &tx,
                EntityType::Decision,
                &decision_id,
                AuditAction::Recorded,
                Some(serde_json::json!({
                    "component_id": component_id,
                    "decision_type": decision_type,
                    "mitigation_flag": mitigation_flag,
                })),
                now,
            )
            .await?;
            self.append_audit(
                &tx,
                EntityType::RiskEvent,
                &risk_event_id,
                AuditAction::Created,
                Some(serde_json::json!({
                    "decision_id": decision_id,
                    "scorer": scored.scorer,
                    "severity": scored.severity,
                    "final_score": scored.final_score,
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

        let threshold_action = ThresholdAction::for_severity(scored.severity);
        let record = DecisionRecord {
            trace_id: trace_stub(&decision_id, scored.severity, scored.final_score),
            decision_id,
            risk_event_id,
            component_id: component_id.to_string(),
            project_id: ctx.project.id,
            scorer: scored.scorer,
            severity: scored.severity,
            final_score: scored.final_score,
            base_risk: scored.base_risk,
            adjusted_risk: scored.adjusted_risk,
            confidence: scored.confidence,
            explanation: scored.explanation,
            escalation_warning: scored
                .severity
                .requires_escalation()
                .then(|| ESCALATION_WARNING.to_string()),
            threshold_action,
        };

        let op = TrailOperation {
            v: 1,
            ts: now.to_rfc3339(),
            project_id: record.project_id.clone(),
            component_id: record.component_id.clone(),
            decision_id: record.decision_id.clone(),
            trace_id: record.trace_id.clone(),
            scorer: record.scorer,
            severity: record.severity,
            final_score: record.final_score,
            threshold_action,
        };
        if let Err(error) = self.trail().append(&op) {
            tracing::warn!(decision_id = %record.decision_id, %error, "governance trail append failed");
        }

        tracing::info!(
            decision_id = %record.decision_id,
            component_id,
            scorer = %record.scorer,
            severity = %record.severity,
            final_score = record.final_score,
            "decision recorded"
        );
        Ok(record)
    }

    /// Record a structural edit with the learned scorer, then refresh the
    /// linked model's visual state when a pipeline is supplied.
    ///
    /// Asset failures never fail the call: they are logged and reported as
    /// `storage_url: None`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::record_decision`].
    pub async fn edit_component<E: MaterialEditor>(
        &self,
        component_id: &str,
        edit: &EditParameters,
        mitigation_flag: bool,
        pipeline: Option<&AssetPipeline<E>>,
    ) -> Result<ComponentEditResponse, DatabaseError> {
        let decision = self
            .record_decision(
                component_id,
                &edit.edit_type,
                mitigation_flag,
                &ScoringPolicy::StructuralEdit(edit.clone()),
            )
            .await?;

        let storage_url = match pipeline {
            Some(pipeline) => match self.refresh_visual_state(component_id, &decision, pipeline).await {
                Ok(url) => url,
                Err(error) => {
                    tracing::warn!(component_id, %error, "model visual state refresh failed");
                    None
                }
            },
            None => None,
        };

        Ok(ComponentEditResponse {
            edit_type: edit.edit_type.clone(),
            decision,
            storage_url,
        })
    }

    /// Repaint the component's model in the recorded severity's color.
    ///
    /// Returns `None` when the component has no linked model. The asset is
    /// only re-edited when the color changes; the stored risk state is
    /// always refreshed.
    async fn refresh_visual_state<E: MaterialEditor>(
        &self,
        component_id: &str,
        decision: &DecisionRecord,
        pipeline: &AssetPipeline<E>,
    ) -> Result<Option<String>, DatabaseError> {
        let component = self.get_component(component_id).await?;
        let Some(model_id) = component.model_id else {
            return Ok(None);
        };
        let model = self.get_model(&model_id).await?;

        let reference = if needs_recolor(&model, decision.severity) {
            pipeline
                .recolor(
                    &model.project_id,
                    &model.id,
                    &model.external_asset_reference,
                    severity_color(decision.severity),
                )
                .await?
        } else {
            model.external_asset_reference.clone()
        };

        let updated = self
            .update_model_visual_state(
                &model.id,
                &reference,
                decision.final_score,
                decision.severity,
            )
            .await?;
        Ok(Some(updated.external_asset_reference))
    }

    fn score(&self, ctx: &ComponentContext, mitigation_flag: bool, policy: &ScoringPolicy) -> Scored {
        match policy {
            ScoringPolicy::Governance => {
                let assessment = deterministic::score(RiskInputs::from_entities(
                    &ctx.project,
                    &ctx.zone,
                    &ctx.component,
                    mitigation_flag,
                ));
                Scored {
                    scorer: ScorerKind::Deterministic,
                    base_risk: Some(assessment.base_risk),
                    adjusted_risk: Some(assessment.adjusted_risk),
                    final_score: assessment.final_score,
                    severity: assessment.severity,
                    confidence: Some(deterministic::assessment_confidence(
                        ctx.component.dependency_count,
                        ctx.zone.inspection_level,
                    )),
                    explanation: Some(assessment.explanation(mitigation_flag)),
                }
            }
            ScoringPolicy::StructuralEdit(edit) => {
                let features =
                    FeatureVector::from_edit(edit, &ctx.component, &ctx.zone, mitigation_flag);
                let prediction = self.learned().predict(&features);
                Scored {
                    scorer: ScorerKind::Learned,
                    base_risk: None,
                    adjusted_risk: None,
                    final_score: prediction.score,
                    severity: prediction.category,
                    confidence: None,
                    explanation: Some(prediction.explanation),
                }
            }
        }
    }
}

fn needs_recolor(model: &Model, severity: Severity) -> bool {
    model.current_severity.map(severity_color) != Some(severity_color(severity))
}

/// A missing parent behind an existing child means the store is broken.
fn dangling(error: DatabaseError, child_id: &str, parent: &str, parent_id: &str) -> DatabaseError {
    if error.is_not_found() {
        tracing::error!(child_id, parent, parent_id, "dangling parent link");
        DatabaseError::Integrity(format!("{child_id} references missing {parent} {parent_id}"))
    } else {
        error
    }
}
