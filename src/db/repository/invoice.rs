use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Invoice, InvoiceLine};

pub fn insert_invoice(conn: &Connection, invoice: &Invoice) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO invoices (id, number, invoice_date, total) VALUES (?1, ?2, ?3, ?4)",
        params![
            invoice.id.to_string(),
            invoice.number,
            invoice.invoice_date.to_string(),
            invoice.total,
        ],
    )?;
    Ok(())
}

pub fn insert_invoice_line(conn: &Connection, line: &InvoiceLine) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO invoice_lines (id, invoice_id, patient_treatment_id, code, description,
         quantity, unit_price, tax_rate)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            line.id.to_string(),
            line.invoice_id.to_string(),
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

pub fn get_invoice_line(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<InvoiceLine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, invoice_id, patient_treatment_id, code, description, quantity, unit_price, tax_rate
         FROM invoice_lines WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok(InvoiceLineRow {
            id: row.get(0)?,
            invoice_id: row.get(1)?,
            patient_treatment_id: row.get(2)?,
            code: row.get(3)?,
            description: row.get(4)?,
            quantity: row.get(5)?,
            unit_price: row.get(6)?,
            tax_rate: row.get(7)?,
        })
    });

    match result {
        Ok(row) => Ok(Some(invoice_line_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All invoice lines whose back-reference points at the given treatment.
pub fn list_invoice_lines_by_treatment(
    conn: &Connection,
    patient_treatment_id: &Uuid,
) -> Result<Vec<InvoiceLine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, invoice_id, patient_treatment_id, code, description, quantity, unit_price, tax_rate
         FROM invoice_lines WHERE patient_treatment_id = ?1",
    )?;

    let rows = stmt.query_map(params![patient_treatment_id.to_string()], |row| {
        Ok(InvoiceLineRow {
            id: row.get(0)?,
            invoice_id: row.get(1)?,
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
        lines.push(invoice_line_from_row(row?)?);
    }
    Ok(lines)
}

/// Set the back-reference of one invoice line to NULL.
pub fn clear_invoice_line_treatment(conn: &Connection, line_id: &Uuid) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE invoice_lines SET patient_treatment_id = NULL WHERE id = ?1",
        params![line_id.to_string()],
    )?;
    Ok(())
}

struct InvoiceLineRow {
    id: String,
    invoice_id: String,
    patient_treatment_id: Option<String>,
    code: String,
    description: String,
    quantity: i32,
    unit_price: f64,
    tax_rate: f64,
}

fn invoice_line_from_row(row: InvoiceLineRow) -> Result<InvoiceLine, DatabaseError> {
    Ok(InvoiceLine {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        invoice_id: Uuid::parse_str(&row.invoice_id)
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
