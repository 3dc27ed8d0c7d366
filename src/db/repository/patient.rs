use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Patient, Sex};

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, first_name, last_name, sex, birth_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            patient.id.to_string(),
            patient.first_name,
            patient.last_name,
            patient.sex.as_str(),
            patient.birth_date.to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, first_name, last_name, sex, birth_date FROM patients WHERE id = ?1",
        params![id.to_string()],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        },
    );

    match result {
        Ok((id, first_name, last_name, sex, birth_date)) => Ok(Some(Patient {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            first_name,
            last_name,
            sex: Sex::from_str(&sex)?,
            birth_date: NaiveDate::parse_from_str(&birth_date, "%Y-%m-%d").unwrap_or_default(),
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, sex, birth_date FROM patients ORDER BY last_name",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut patients = Vec::new();
    for row in rows {
        let (id, first_name, last_name, sex, birth_date) = row?;
        patients.push(Patient {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            first_name,
            last_name,
            sex: Sex::from_str(&sex)?,
            birth_date: NaiveDate::parse_from_str(&birth_date, "%Y-%m-%d").unwrap_or_default(),
        });
    }
    Ok(patients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn patient_insert_and_retrieve() {
        let conn = open_memory_database().unwrap();
        let id = Uuid::new_v4();
        insert_patient(
            &conn,
            &Patient {
                id,
                first_name: "Marco".into(),
                last_name: "Bianchi".into(),
                sex: Sex::Male,
                birth_date: NaiveDate::from_ymd_opt(1984, 7, 19).unwrap(),
            },
        )
        .unwrap();

        let patient = get_patient(&conn, &id).unwrap().unwrap();
        assert_eq!(patient.first_name, "Marco");
        assert_eq!(patient.birth_date, NaiveDate::from_ymd_opt(1984, 7, 19).unwrap());

        assert!(get_patient(&conn, &Uuid::new_v4()).unwrap().is_none());
        assert_eq!(get_all_patients(&conn).unwrap().len(), 1);
    }
}
