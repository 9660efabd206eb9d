//! Incident and assignment persistence operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use dispatch_core::{DeliveryState, Incident, IncidentStatus, ResponderAssignment};

use crate::error::{Result, StoreError};
use crate::models::{AssignmentRow, IncidentFilter, IncidentRow};

/// Persist a newly created incident.
pub async fn create_incident(pool: &SqlitePool, incident: &Incident) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO incidents
            (id, reporter_id, latitude, longitude, emergency_type,
             additional_info, status, created_at, resolved_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&incident.id)
    .bind(&incident.reporter_id)
    .bind(incident.location.latitude)
    .bind(incident.location.longitude)
    .bind(incident.emergency_type.as_str())
    .bind(&incident.additional_info)
    .bind(incident.status.as_str())
    .bind(incident.created_at.to_rfc3339())
    .bind(incident.resolved_at.map(|t| t.to_rfc3339()))
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return StoreError::AlreadyExists {
                    entity: "Incident",
                    id: incident.id.clone(),
                };
            }
        }
        StoreError::Sqlx(e)
    })?;

    Ok(())
}

/// Load an incident with its full assignment list.
pub async fn get_incident(pool: &SqlitePool, id: &str) -> Result<Incident> {
    let row = sqlx::query_as::<_, IncidentRow>(
        r#"
        SELECT id, reporter_id, latitude, longitude, emergency_type,
               additional_info, status, created_at, resolved_at
        FROM incidents
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::NotFound {
        entity: "Incident",
        id: id.to_string(),
    })?;

    let assignments = assignments_for(pool, id).await?;
    row.into_incident(assignments)
}

/// List incidents under a pre-resolved scope filter, newest first.
pub async fn list_incidents(pool: &SqlitePool, filter: &IncidentFilter) -> Result<Vec<Incident>> {
    let rows: Vec<IncidentRow> = match (&filter.responder_id, &filter.reporter_id) {
        (Some(responder), Some(reporter)) => {
            sqlx::query_as(
                r#"
                SELECT i.id, i.reporter_id, i.latitude, i.longitude, i.emergency_type,
                       i.additional_info, i.status, i.created_at, i.resolved_at
                FROM incidents i
                INNER JOIN responder_assignments ra ON ra.incident_id = i.id
                WHERE ra.responder_id = ? AND i.reporter_id = ?
                ORDER BY i.created_at DESC
                "#,
            )
            .bind(responder)
            .bind(reporter)
            .fetch_all(pool)
            .await?
        }
        (Some(responder), None) => {
            sqlx::query_as(
                r#"
                SELECT i.id, i.reporter_id, i.latitude, i.longitude, i.emergency_type,
                       i.additional_info, i.status, i.created_at, i.resolved_at
                FROM incidents i
                INNER JOIN responder_assignments ra ON ra.incident_id = i.id
                WHERE ra.responder_id = ?
                ORDER BY i.created_at DESC
                "#,
            )
            .bind(responder)
            .fetch_all(pool)
            .await?
        }
        (None, Some(reporter)) => {
            sqlx::query_as(
                r#"
                SELECT id, reporter_id, latitude, longitude, emergency_type,
                       additional_info, status, created_at, resolved_at
                FROM incidents
                WHERE reporter_id = ?
                ORDER BY created_at DESC
                "#,
            )
            .bind(reporter)
            .fetch_all(pool)
            .await?
        }
        (None, None) => {
            sqlx::query_as(
                r#"
                SELECT id, reporter_id, latitude, longitude, emergency_type,
                       additional_info, status, created_at, resolved_at
                FROM incidents
                ORDER BY created_at DESC
                "#,
            )
            .fetch_all(pool)
            .await?
        }
    };

    let mut incidents = Vec::with_capacity(rows.len());
    for row in rows {
        let assignments = assignments_for(pool, &row.id).await?;
        incidents.push(row.into_incident(assignments)?);
    }
    Ok(incidents)
}

/// Set an incident's status, and its resolution timestamp when completing.
pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    status: IncidentStatus,
    resolved_at: Option<DateTime<Utc>>,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE incidents
        SET status = ?, resolved_at = ?
        WHERE id = ?
        "#,
    )
    .bind(status.as_str())
    .bind(resolved_at.map(|t| t.to_rfc3339()))
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "Incident",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Append a responder assignment to an incident.
pub async fn insert_assignment(
    pool: &SqlitePool,
    incident_id: &str,
    assignment: &ResponderAssignment,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO responder_assignments
            (incident_id, responder_id, channel, delivery_state, accepted,
             provider_ref, outcome_error, notified_at, response_time)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(incident_id)
    .bind(&assignment.responder_id)
    .bind(assignment.channel.as_str())
    .bind(assignment.delivery_state.as_str())
    .bind(assignment.accepted)
    .bind(&assignment.provider_ref)
    .bind(&assignment.outcome_error)
    .bind(assignment.notified_at.to_rfc3339())
    .bind(assignment.response_time.map(|t| t.to_rfc3339()))
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return StoreError::AlreadyExists {
                    entity: "Assignment",
                    id: format!("{}/{}", incident_id, assignment.responder_id),
                };
            }
        }
        StoreError::Sqlx(e)
    })?;

    Ok(())
}

/// Load one responder's assignment for an incident.
pub async fn get_assignment(
    pool: &SqlitePool,
    incident_id: &str,
    responder_id: &str,
) -> Result<ResponderAssignment> {
    let row = sqlx::query_as::<_, AssignmentRow>(
        r#"
        SELECT responder_id, channel, delivery_state, accepted,
               provider_ref, outcome_error, notified_at, response_time
        FROM responder_assignments
        WHERE incident_id = ? AND responder_id = ?
        "#,
    )
    .bind(incident_id)
    .bind(responder_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::NotFound {
        entity: "Assignment",
        id: format!("{}/{}", incident_id, responder_id),
    })?;

    row.into_assignment()
}

/// Record an accepted delivery-state transition for an assignment.
pub async fn update_assignment_state(
    pool: &SqlitePool,
    incident_id: &str,
    responder_id: &str,
    state: DeliveryState,
    response_time: DateTime<Utc>,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE responder_assignments
        SET delivery_state = ?, response_time = ?
        WHERE incident_id = ? AND responder_id = ?
        "#,
    )
    .bind(state.as_str())
    .bind(response_time.to_rfc3339())
    .bind(incident_id)
    .bind(responder_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "Assignment",
            id: format!("{}/{}", incident_id, responder_id),
        });
    }

    Ok(())
}

/// All assignments for an incident, in notification order.
async fn assignments_for(pool: &SqlitePool, incident_id: &str) -> Result<Vec<ResponderAssignment>> {
    let rows = sqlx::query_as::<_, AssignmentRow>(
        r#"
        SELECT responder_id, channel, delivery_state, accepted,
               provider_ref, outcome_error, notified_at, response_time
        FROM responder_assignments
        WHERE incident_id = ?
        ORDER BY notified_at, responder_id
        "#,
    )
    .bind(incident_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(AssignmentRow::into_assignment).collect()
}
