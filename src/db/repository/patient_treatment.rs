use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{PatientTreatment, ToothSet};

pub fn insert_patient_treatment(
    conn: &Connection,
    treatment: &PatientTreatment,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patient_treatments (id, doctor_id, patient_id, treatment_id,
         creation_date, treatment_date, description, notes, price, tax_rate, is_paid, teeth)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            treatment.id.to_string(),
            treatment.doctor_id.to_string(),
            treatment.patient_id.to_string(),
            treatment.treatment_id.to_string(),
            treatment.creation_date.to_string(),
            treatment.treatment_date.map(|d| d.to_string()),
            treatment.description,
            treatment.notes,
            treatment.price,
            treatment.tax_rate,
            treatment.is_paid as i32,
            treatment.teeth.mask() as i64,
        ],
    )?;
    Ok(())
}

pub fn get_patient_treatment(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<PatientTreatment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, doctor_id, patient_id, treatment_id, creation_date, treatment_date,
         description, notes, price, tax_rate, is_paid, teeth
         FROM patient_treatments WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok(PatientTreatmentRow {
            id: row.get(0)?,
            doctor_id: row.get(1)?,
            patient_id: row.get(2)?,
            treatment_id: row.get(3)?,
            creation_date: row.get(4)?,
            treatment_date: row.get(5)?,
            description: row.get(6)?,
            notes: row.get(7)?,
            price: row.get(8)?,
            tax_rate: row.get(9)?,
            is_paid: row.get(10)?,
            teeth: row.get(11)?,
        })
    });

    match result {
        Ok(row) => Ok(Some(patient_treatment_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_patient_treatment(
    conn: &Connection,
    treatment: &PatientTreatment,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE patient_treatments SET doctor_id = ?2, patient_id = ?3, treatment_id = ?4,
         treatment_date = ?5, description = ?6, notes = ?7, price = ?8, tax_rate = ?9,
         is_paid = ?10, teeth = ?11
         WHERE id = ?1",
        params![
            treatment.id.to_string(),
            treatment.doctor_id.to_string(),
            treatment.patient_id.to_string(),
            treatment.treatment_id.to_string(),
            treatment.treatment_date.map(|d| d.to_string()),
            treatment.description,
            treatment.notes,
            treatment.price,
            treatment.tax_rate,
            treatment.is_paid as i32,
            treatment.teeth.mask() as i64,
        ],
    )?;
    Ok(())
}

pub fn delete_patient_treatment(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM patient_treatments WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(())
}

pub fn list_patient_treatments_by_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<PatientTreatment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, doctor_id, patient_id, treatment_id, creation_date, treatment_date,
         description, notes, price, tax_rate, is_paid, teeth
         FROM patient_treatments WHERE patient_id = ?1 ORDER BY creation_date DESC",
    )?;

    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok(PatientTreatmentRow {
            id: row.get(0)?,
            doctor_id: row.get(1)?,
            patient_id: row.get(2)?,
            treatment_id: row.get(3)?,
            creation_date: row.get(4)?,
            treatment_date: row.get(5)?,
            description: row.get(6)?,
            notes: row.get(7)?,
            price: row.get(8)?,
            tax_rate: row.get(9)?,
            is_paid: row.get(10)?,
            teeth: row.get(11)?,
        })
    })?;

    let mut treatments = Vec::new();
    for row in rows {
        treatments.push(patient_treatment_from_row(row?)?);
    }
    Ok(treatments)
}

// Internal row type for PatientTreatment mapping
struct PatientTreatmentRow {
    id: String,
    doctor_id: String,
    patient_id: String,
    treatment_id: String,
    creation_date: String,
    treatment_date: Option<String>,
    description: Option<String>,
    notes: Option<String>,
    price: f64,
    tax_rate: f64,
    is_paid: i32,
    teeth: i64,
}

fn patient_treatment_from_row(row: PatientTreatmentRow) -> Result<PatientTreatment, DatabaseError> {
    Ok(PatientTreatment {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        doctor_id: Uuid::parse_str(&row.doctor_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        patient_id: Uuid::parse_str(&row.patient_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        treatment_id: Uuid::parse_str(&row.treatment_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        // %.f also matches the fractional seconds NaiveDateTime::to_string
        // emits for sub-second timestamps; an unparseable value is an error,
        // not a silent epoch default.
        creation_date: NaiveDateTime::parse_from_str(&row.creation_date, "%Y-%m-%d %H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(&row.creation_date, "%Y-%m-%dT%H:%M:%S%.f"))
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        treatment_date: row
            .treatment_date
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        description: row.description,
        notes: row.notes,
        price: row.price,
        tax_rate: row.tax_rate,
        is_paid: row.is_paid != 0,
        teeth: ToothSet::from_mask(row.teeth as u32),
    })
}
