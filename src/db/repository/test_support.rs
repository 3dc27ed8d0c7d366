//! Shared fixtures for repository tests.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::{
    Doctor, Estimate, EstimateLine, Invoice, InvoiceLine, Patient, PatientTreatment, Sex,
    ToothSet, Treatment,
};

use super::{
    insert_doctor, insert_estimate, insert_estimate_line, insert_invoice, insert_invoice_line,
    insert_patient, insert_treatment,
};

pub struct PracticeSeed {
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub treatment_id: Uuid,
}

/// Insert one doctor, one patient and one catalog treatment.
pub fn seed_practice(conn: &Connection) -> PracticeSeed {
    let seed = PracticeSeed {
        doctor_id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        treatment_id: Uuid::new_v4(),
    };

    insert_doctor(
        conn,
        &Doctor {
            id: seed.doctor_id,
            first_name: "Laura".into(),
            last_name: "Conti".into(),
            sex: Sex::Female,
        },
    )
    .unwrap();

    insert_patient(
        conn,
        &Patient {
            id: seed.patient_id,
            first_name: "Paolo".into(),
            last_name: "Greco".into(),
            sex: Sex::Male,
            birth_date: NaiveDate::from_ymd_opt(1990, 3, 14).unwrap(),
        },
    )
    .unwrap();

    insert_treatment(
        conn,
        &Treatment {
            id: seed.treatment_id,
            code: "FIL".into(),
            name: "Filling".into(),
            price: 90.0,
            tax_rate: 22.0,
        },
    )
    .unwrap();

    seed
}

/// A fresh, valid patient treatment pointing at the seeded records.
pub fn sample_treatment(seed: &PracticeSeed) -> PatientTreatment {
    PatientTreatment {
        id: Uuid::new_v4(),
        doctor_id: seed.doctor_id,
        patient_id: seed.patient_id,
        treatment_id: seed.treatment_id,
        creation_date: NaiveDateTime::parse_from_str("2024-05-02 09:30:00", "%Y-%m-%d %H:%M:%S")
            .unwrap(),
        treatment_date: Some(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()),
        description: Some("Filling".into()),
        notes: None,
        price: 90.0,
        tax_rate: 22.0,
        is_paid: false,
        teeth: ToothSet::EMPTY,
    }
}

pub fn seed_invoice(conn: &Connection) -> Uuid {
    let id = Uuid::new_v4();
    insert_invoice(
        conn,
        &Invoice {
            id,
            number: "2024/001".into(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            total: 0.0,
        },
    )
    .unwrap();
    id
}

pub fn seed_estimate(conn: &Connection) -> Uuid {
    let id = Uuid::new_v4();
    insert_estimate(
        conn,
        &Estimate {
            id,
            number: "2024/E01".into(),
            estimate_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            total: 0.0,
        },
    )
    .unwrap();
    id
}

/// Attach a line to the invoice, optionally back-referencing a treatment.
pub fn attach_invoice_line(
    conn: &Connection,
    invoice_id: &Uuid,
    patient_treatment_id: Option<Uuid>,
) -> Uuid {
    let id = Uuid::new_v4();
    insert_invoice_line(
        conn,
        &InvoiceLine {
            id,
            invoice_id: *invoice_id,
            patient_treatment_id,
            code: "FIL".into(),
            description: "Filling".into(),
            quantity: 1,
            unit_price: 90.0,
            tax_rate: 22.0,
        },
    )
    .unwrap();
    id
}

/// Attach a line to the estimate, optionally back-referencing a treatment.
pub fn attach_estimate_line(
    conn: &Connection,
    estimate_id: &Uuid,
    patient_treatment_id: Option<Uuid>,
) -> Uuid {
    let id = Uuid::new_v4();
    insert_estimate_line(
        conn,
        &EstimateLine {
            id,
            estimate_id: *estimate_id,
            patient_treatment_id,
            code: "FIL".into(),
            description: "Filling".into(),
            quantity: 1,
            unit_price: 90.0,
            tax_rate: 22.0,
        },
    )
    .unwrap();
    id
}
