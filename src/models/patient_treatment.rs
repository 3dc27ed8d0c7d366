use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tooth::ToothSet;

/// One treatment performed (or planned) on a patient.
///
/// `doctor_id`, `patient_id` and `treatment_id` must reference existing
/// records; the rule engine in `db::repository::treatment_rules` checks this
/// before any insert or update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientTreatment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub treatment_id: Uuid,
    pub creation_date: NaiveDateTime,
    pub treatment_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub price: f64,
    pub tax_rate: f64,
    pub is_paid: bool,
    pub teeth: ToothSet,
}

impl PatientTreatment {
    /// Display string for the tooth selection ("Arches", "Upper Arch",
    /// "Lower Arch", "None", or the comma-joined FDI codes).
    pub fn tooth_summary(&self) -> String {
        self.teeth.describe()
    }

    /// Number of teeth selected on the chart.
    pub fn tooth_count(&self) -> u32 {
        self.teeth.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tooth::ToothPosition;

    fn sample() -> PatientTreatment {
        PatientTreatment {
            id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            treatment_id: Uuid::new_v4(),
            creation_date: NaiveDateTime::parse_from_str(
                "2024-05-02 09:30:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
            treatment_date: Some(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()),
            description: Some("Root canal, first session".into()),
            notes: None,
            price: 240.0,
            tax_rate: 22.0,
            is_paid: false,
            teeth: [ToothPosition::T36].into_iter().collect(),
        }
    }

    #[test]
    fn tooth_helpers_delegate_to_the_chart() {
        let mut treatment = sample();
        assert_eq!(treatment.tooth_summary(), "36");
        assert_eq!(treatment.tooth_count(), 1);

        treatment.teeth = ToothSet::ALL;
        assert_eq!(treatment.tooth_summary(), "Arches");
        assert_eq!(treatment.tooth_count(), 32);
    }

    #[test]
    fn serializes_to_json_and_back() {
        let treatment = sample();
        let json = serde_json::to_string(&treatment).unwrap();
        let back: PatientTreatment = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, treatment.id);
        assert_eq!(back.teeth, treatment.teeth);
        assert_eq!(back.tax_rate, treatment.tax_rate);
    }
}
