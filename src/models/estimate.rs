use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    pub id: Uuid,
    pub number: String,
    pub estimate_date: NaiveDate,
    pub total: f64,
}

/// A quoted line. `patient_treatment_id` is a non-owning back-reference:
/// it is set to NULL when the referenced treatment is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateLine {
    pub id: Uuid,
    pub estimate_id: Uuid,
    pub patient_treatment_id: Option<Uuid>,
    pub code: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub tax_rate: f64,
}
