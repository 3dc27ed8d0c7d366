use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Doctor, Sex};

pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (id, first_name, last_name, sex) VALUES (?1, ?2, ?3, ?4)",
        params![
            doctor.id.to_string(),
            doctor.first_name,
            doctor.last_name,
            doctor.sex.as_str(),
        ],
    )?;
    Ok(())
}

pub fn get_doctor(conn: &Connection, id: &Uuid) -> Result<Option<Doctor>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, first_name, last_name, sex FROM doctors WHERE id = ?1",
        params![id.to_string()],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        },
    );

    match result {
        Ok((id, first_name, last_name, sex)) => Ok(Some(Doctor {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            first_name,
            last_name,
            sex: Sex::from_str(&sex)?,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, first_name, last_name, sex FROM doctors ORDER BY last_name")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut doctors = Vec::new();
    for row in rows {
        let (id, first_name, last_name, sex) = row?;
        doctors.push(Doctor {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            first_name,
            last_name,
            sex: Sex::from_str(&sex)?,
        });
    }
    Ok(doctors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn doctor_insert_and_retrieve() {
        let conn = open_memory_database().unwrap();
        let id = Uuid::new_v4();
        insert_doctor(
            &conn,
            &Doctor {
                id,
                first_name: "Anna".into(),
                last_name: "Rossi".into(),
                sex: Sex::Female,
            },
        )
        .unwrap();

        let doctor = get_doctor(&conn, &id).unwrap().unwrap();
        assert_eq!(doctor.last_name, "Rossi");
        assert_eq!(doctor.sex, Sex::Female);

        assert!(get_doctor(&conn, &Uuid::new_v4()).unwrap().is_none());
        assert_eq!(get_all_doctors(&conn).unwrap().len(), 1);
    }
}
