use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry of the treatment catalog (a "treatment type").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub price: f64,
    pub tax_rate: f64,
}
