//! Repository layer — entity-scoped database operations.
//!
//! Free functions over `&Connection`, one sub-module per entity, plus the
//! patient-treatment rule engine (validation and removal cascade) in
//! `treatment_rules`.

mod doctor;
mod estimate;
mod invoice;
mod patient;
mod patient_treatment;
mod treatment;
mod treatment_rules;

#[cfg(test)]
pub(crate) mod test_support;

pub use doctor::*;
pub use estimate::*;
pub use invoice::*;
pub use patient::*;
pub use patient_treatment::*;
pub use treatment::*;
pub use treatment_rules::*;
