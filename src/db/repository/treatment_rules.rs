//! Patient-treatment rule engine: admission checks before insert/update,
//! foreign-key gating before delete, and the removal cascade that clears
//! invoice/estimate line back-references instead of blocking the delete.

use rusqlite::{params, Connection};
use thiserror::Error;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::PatientTreatment;

use super::estimate::{clear_estimate_line_treatment, list_estimate_lines_by_treatment};
use super::invoice::{clear_invoice_line_treatment, list_invoice_lines_by_treatment};
use super::patient_treatment::{delete_patient_treatment, get_patient_treatment};
use super::{get_doctor, get_patient, get_treatment};

/// A rule violation reported to the caller. `Display` gives the
/// user-facing message; the fields carry the context for programmatic use.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Doctors is mandatory.")]
    MissingDoctor { doctor_id: Uuid },

    #[error("Patient is mandatory.")]
    MissingPatient { patient_id: Uuid },

    #[error("Treatments type is mandatory.")]
    MissingTreatmentType { treatment_id: Uuid },

    #[error("Invalid tax rate. Can not be less than zero.")]
    InvalidTaxRate { tax_rate: f64 },

    #[error("A treatment with this id already exists.")]
    DuplicateId { id: Uuid },

    #[error("Treatment not found.")]
    UnknownId { id: Uuid },

    #[error("Treatment is still referenced by '{relation}' ({count} rows).")]
    ReferencedBy { relation: &'static str, count: i64 },
}

/// A relation whose rows may hold a back-reference to a patient treatment.
#[derive(Debug, Clone, Copy)]
pub struct DependentRelation {
    pub name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
}

pub const FK_INVOICE_LINES_PATIENT_TREATMENTS: &str = "fk_invoice_lines_patient_treatments";
pub const FK_ESTIMATE_LINES_PATIENT_TREATMENTS: &str = "fk_estimate_lines_patient_treatments";

/// Every known relation pointing at `patient_treatments`.
pub const DEPENDENT_RELATIONS: &[DependentRelation] = &[
    DependentRelation {
        name: FK_INVOICE_LINES_PATIENT_TREATMENTS,
        table: "invoice_lines",
        column: "patient_treatment_id",
    },
    DependentRelation {
        name: FK_ESTIMATE_LINES_PATIENT_TREATMENTS,
        table: "estimate_lines",
        column: "patient_treatment_id",
    },
];

/// Validate a batch of patient treatments.
///
/// Per item: a negative tax rate fails immediately; otherwise the doctor,
/// patient and treatment references are each checked for existence and every
/// missing one is reported. The batch is fail-fast: the first failing item
/// stops the scan, so later items are not checked at all.
///
/// An empty result means the batch is valid.
pub fn validate_patient_treatments(
    conn: &Connection,
    items: &[PatientTreatment],
) -> Result<Vec<ValidationError>, DatabaseError> {
    let mut errors = Vec::new();

    for item in items {
        if item.tax_rate < 0.0 {
            errors.push(ValidationError::InvalidTaxRate { tax_rate: item.tax_rate });
            break;
        }

        let before = errors.len();
        if get_doctor(conn, &item.doctor_id)?.is_none() {
            errors.push(ValidationError::MissingDoctor { doctor_id: item.doctor_id });
        }
        if get_patient(conn, &item.patient_id)?.is_none() {
            errors.push(ValidationError::MissingPatient { patient_id: item.patient_id });
        }
        if get_treatment(conn, &item.treatment_id)?.is_none() {
            errors.push(ValidationError::MissingTreatmentType { treatment_id: item.treatment_id });
        }
        if errors.len() > before {
            break;
        }
    }

    Ok(errors)
}

/// Gate an insert: field validation first, then the structural check that
/// no item's id is already taken. The structural check only runs when
/// validation passed.
pub fn can_add_patient_treatments(
    conn: &Connection,
    items: &[PatientTreatment],
) -> Result<Vec<ValidationError>, DatabaseError> {
    let mut errors = validate_patient_treatments(conn, items)?;
    if !errors.is_empty() {
        return Ok(errors);
    }

    for item in items {
        if get_patient_treatment(conn, &item.id)?.is_some() {
            errors.push(ValidationError::DuplicateId { id: item.id });
        }
    }
    Ok(errors)
}

/// Gate an update: field validation first, then the structural check that
/// every item exists.
pub fn can_update_patient_treatments(
    conn: &Connection,
    items: &[PatientTreatment],
) -> Result<Vec<ValidationError>, DatabaseError> {
    let mut errors = validate_patient_treatments(conn, items)?;
    if !errors.is_empty() {
        return Ok(errors);
    }

    for item in items {
        if get_patient_treatment(conn, &item.id)?.is_none() {
            errors.push(ValidationError::UnknownId { id: item.id });
        }
    }
    Ok(errors)
}

/// Gate a removal against dependent relations.
///
/// The invoice-line and estimate-line relations are always force-added to
/// the exclusion list: the removal cascade clears those back-references
/// itself, so they must never block a delete. Every other known relation
/// that still references an item is reported. At present the two line
/// relations are the only entries in [`DEPENDENT_RELATIONS`], so the scan
/// reports nothing until a new dependent relation is registered there.
pub fn can_remove_patient_treatments(
    conn: &Connection,
    items: &[PatientTreatment],
    check_foreign_keys: bool,
    excluded_relations: &[&str],
) -> Result<Vec<ValidationError>, DatabaseError> {
    let mut errors = Vec::new();
    if !check_foreign_keys {
        return Ok(errors);
    }

    let mut excluded: Vec<&str> = excluded_relations.to_vec();
    for name in [
        FK_INVOICE_LINES_PATIENT_TREATMENTS,
        FK_ESTIMATE_LINES_PATIENT_TREATMENTS,
    ] {
        if !excluded.contains(&name) {
            excluded.push(name);
        }
    }

    for item in items {
        for relation in DEPENDENT_RELATIONS {
            if excluded.contains(&relation.name) {
                continue;
            }
            let count: i64 = conn.query_row(
                &format!(
                    "SELECT COUNT(*) FROM {} WHERE {} = ?1",
                    relation.table, relation.column
                ),
                params![item.id.to_string()],
                |row| row.get(0),
            )?;
            if count > 0 {
                errors.push(ValidationError::ReferencedBy { relation: relation.name, count });
            }
        }
    }

    Ok(errors)
}

/// Remove a batch of patient treatments with cascading back-reference
/// clearing, inside one transaction.
///
/// Phase 1 clears the back-reference of every invoice line and estimate
/// line pointing at any item; phase 2 deletes the items. A failure at any
/// point rolls the whole removal back, so dependents are never left
/// half-cleared.
pub fn remove_patient_treatments(
    conn: &Connection,
    items: &[PatientTreatment],
) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let mut cleared = 0usize;

    for item in items {
        for line in list_invoice_lines_by_treatment(&tx, &item.id)? {
            clear_invoice_line_treatment(&tx, &line.id)?;
            cleared += 1;
        }
        for line in list_estimate_lines_by_treatment(&tx, &item.id)? {
            clear_estimate_line_treatment(&tx, &line.id)?;
            cleared += 1;
        }
    }

    for item in items {
        delete_patient_treatment(&tx, &item.id)?;
    }

    tx.commit()?;

    if cleared > 0 {
        tracing::info!(cleared, removed = items.len(), "Cleared line back-references before treatment removal");
    }
    Ok(())
}
