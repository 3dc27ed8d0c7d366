use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Estimate, EstimateLine};

pub fn insert_estimate(conn: &Connection, estimate: &Estimate) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO estimates (id, number, estimate_date, total) VALUES (?1, ?2, ?3, ?4)",
        params![
            estimate.id.to_string(),
            estimate.number,
            estimate.estimate_date.to_string(),
            estimate.total,
        ],
    )?;
    Ok(())
}

pub fn insert_estimate_line(conn: &Connection, line: &EstimateLine) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO estimate_lines (id, estimate_id, patient_treatment_id, code, description,
         quantity, unit_price, tax_rate)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            line.id.to_string(),
            line.estimate_id.to_string(),
            line.patient_treatment_id.map(|id| id.to_string()),
            line.code,
            line.description,
            line.quantity,
            line.unit_price,
            line.tax_rate,
        ],
    )?;
    Ok(())
}

pub fn get_estimate_line(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<EstimateLine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, estimate_id, patient_treatment_id, code, description, quantity, unit_price, tax_rate
         FROM estimate_lines WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok(EstimateLineRow {
            id: row.get(0)?,
            estimate_id: row.get(1)?,
            patient_treatment_id: row.get(2)?,
            code: row.get(3)?,
            description: row.get(4)?,
            quantity: row.get(5)?,
            unit_price: row.get(6)?,
            tax_rate: row.get(7)?,
        })
    });

    match result {
        Ok(row) => Ok(Some(estimate_line_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All estimate lines whose back-reference points at the given treatment.
pub fn list_estimate_lines_by_treatment(
    conn: &Connection,
    patient_treatment_id: &Uuid,
) -> Result<Vec<EstimateLine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, estimate_id, patient_treatment_id, code, description, quantity, unit_price, tax_rate
         FROM estimate_lines WHERE patient_treatment_id = ?1",
    )?;

    let rows = stmt.query_map(params![patient_treatment_id.to_string()], |row| {
        Ok(EstimateLineRow {
            id: row.get(0)?,
            estimate_id: row.get(1)?,
            patient_treatment_id: row.get(2)?,
            code: row.get(3)?,
            description: row.get(4)?,
            quantity: row.get(5)?,
            unit_price: row.get(6)?,
            tax_rate: row.get(7)?,
        })
    })?;

    let mut lines = Vec::new();
    for row in rows {
        lines.push(estimate_line_from_row(row?)?);
    }
    Ok(lines)
}

/// Set the back-reference of one estimate line to NULL.
pub fn clear_estimate_line_treatment(
    conn: &Connection,
    line_id: &Uuid,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE estimate_lines SET patient_treatment_id = NULL WHERE id = ?1",
        params![line_id.to_string()],
    )?;
    Ok(())
}

struct EstimateLineRow {
    id: String,
    estimate_id: String,
    patient_treatment_id: Option<String>,
    code: String,
    description: String,
    quantity: i32,
    unit_price: f64,
    tax_rate: f64,
}

fn estimate_line_from_row(row: EstimateLineRow) -> Result<EstimateLine, DatabaseError> {
    Ok(EstimateLine {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        estimate_id: Uuid::parse_str(&row.estimate_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        patient_treatment_id: row
            .patient_treatment_id
            .and_then(|s| Uuid::parse_str(&s).ok()),
        code: row.code,
        description: row.description,
        quantity: row.quantity,
        unit_price: row.unit_price,
        tax_rate: row.tax_rate,
    })
}
