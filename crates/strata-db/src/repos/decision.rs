//! Decision and risk event reads.
//!
//! Decisions and their risk events are only ever written together by the
//! recorder (see [`crate::recorder`]); this module is the read side.

use strata_core::entities::{Decision, RiskEvent};
use strata_core::enums::EntityType;
use strata_core::responses::DecisionDetail;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_f64, get_opt_string, parse_datetime, parse_enum};
use crate::service::StrataService;

const DECISION_COLUMNS: &str = "id, component_id, decision_type, severity, mitigation_flag, timestamp";
const RISK_EVENT_COLUMNS: &str =
    "id, decision_id, scorer, base_risk, adjusted_risk, final_score, severity, explanation, created_at";

fn row_to_decision(row: &libsql::Row) -> Result<Decision, DatabaseError> {
    Ok(Decision {
        id: row.get::<String>(0)?,
        component_id: row.get::<String>(1)?,
        decision_type: row.get::<String>(2)?,
        severity: parse_enum(&row.get::<String>(3)?)?,
        mitigation_flag: get_bool(row, 4)?,
        timestamp: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn row_to_risk_event(row: &libsql::Row) -> Result<RiskEvent, DatabaseError> {
    Ok(RiskEvent {
        id: row.get::<String>(0)?,
        decision_id: row.get::<String>(1)?,
        scorer: parse_enum(&row.get::<String>(2)?)?,
        base_risk: get_opt_f64(row, 3)?,
        adjusted_risk: get_opt_f64(row, 4)?,
        final_score: row.get::<f64>(5)?,
        severity: parse_enum(&row.get::<String>(6)?)?,
        explanation: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl StrataService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no decision has this id.
    pub async fn get_decision(&self, id: &str) -> Result<Decision, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                &format!("SELECT {DECISION_COLUMNS} FROM decisions WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Decision, id))?;
        row_to_decision(&row)
    }

    /// Decisions for one component, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_decisions(
        &self,
        component_id: &str,
        limit: u32,
    ) -> Result<Vec<Decision>, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {DECISION_COLUMNS} FROM decisions WHERE component_id = ?1
                     ORDER BY timestamp DESC, rowid DESC LIMIT ?2"
                ),
                libsql::params![component_id, i64::from(limit)],
            )
            .await?;
        let mut decisions = Vec::new();
        while let Some(row) = rows.next().await? {
            decisions.push(row_to_decision(&row)?);
        }
        Ok(decisions)
    }

    /// The risk event attached to a decision.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` (for the risk event) if the decision
    /// has none.
    pub async fn get_risk_event_for_decision(
        &self,
        decision_id: &str,
    ) -> Result<RiskEvent, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                &format!("SELECT {RISK_EVENT_COLUMNS} FROM risk_events WHERE decision_id = ?1"),
                [decision_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::RiskEvent, decision_id))?;
        row_to_risk_event(&row)
    }

    /// A decision with its risk event.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the decision does not exist and
    /// `DatabaseError::Integrity` if it exists without a risk event.
    pub async fn get_decision_detail(&self, id: &str) -> Result<DecisionDetail, DatabaseError> {
        let decision = self.get_decision(id).await?;
        let risk_event = match self.get_risk_event_for_decision(id).await {
            Ok(event) => event,
            Err(e) if e.is_not_found() => {
                return Err(DatabaseError::Integrity(format!(
                    "decision {id} has no risk event"
                )));
            }
            Err(e) => return Err(e),
        };
        Ok(DecisionDetail {
            decision,
            risk_event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;

    #[tokio::test]
    async fn missing_decision_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_decision("dec-00000000").await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::NotFound {
                entity_type: EntityType::Decision,
                ..
            }
        ));
        assert!(svc.get_decision_detail("dec-00000000").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_decisions_for_unknown_component_is_empty() {
        let svc = test_service().await;
        assert!(svc.list_decisions("cmp-00000000", 10).await.unwrap().is_empty());
    }
}
