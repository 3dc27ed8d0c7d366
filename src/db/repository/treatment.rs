use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Treatment;

pub fn insert_treatment(conn: &Connection, treatment: &Treatment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO treatments (id, code, name, price, tax_rate)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            treatment.id.to_string(),
            treatment.code,
            treatment.name,
            treatment.price,
            treatment.tax_rate,
        ],
    )?;
    Ok(())
}

pub fn get_treatment(conn: &Connection, id: &Uuid) -> Result<Option<Treatment>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, code, name, price, tax_rate FROM treatments WHERE id = ?1",
        params![id.to_string()],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
            ))
        },
    );

    match result {
        Ok(row) => Ok(Some(treatment_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_treatment_by_code(
    conn: &Connection,
    code: &str,
) -> Result<Option<Treatment>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, code, name, price, tax_rate FROM treatments WHERE code = ?1",
        params![code],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
            ))
        },
    );

    match result {
        Ok(row) => Ok(Some(treatment_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_treatments(conn: &Connection) -> Result<Vec<Treatment>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, code, name, price, tax_rate FROM treatments ORDER BY code")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, f64>(3)?,
            row.get::<_, f64>(4)?,
        ))
    })?;

    let mut treatments = Vec::new();
    for row in rows {
        treatments.push(treatment_from_row(row?)?);
    }
    Ok(treatments)
}

fn treatment_from_row(
    row: (String, String, String, f64, f64),
) -> Result<Treatment, DatabaseError> {
    let (id, code, name, price, tax_rate) = row;
    Ok(Treatment {
        id: Uuid::parse_str(&id).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        code,
        name,
        price,
        tax_rate,
    })
}
