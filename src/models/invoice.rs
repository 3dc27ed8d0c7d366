use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub invoice_date: NaiveDate,
    pub total: f64,
}

/// A billed line. `patient_treatment_id` is a non-owning back-reference:
/// it is set to NULL when the referenced treatment is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub patient_treatment_id: Option<Uuid>,
    pub code: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub tax_rate: f64,
}
