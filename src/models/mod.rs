pub mod doctor;
pub mod enums;
pub mod estimate;
pub mod invoice;
pub mod patient;
pub mod patient_treatment;
pub mod tooth;
pub mod treatment;

pub use doctor::*;
pub use enums::*;
pub use estimate::*;
pub use invoice::*;
pub use patient::*;
pub use patient_treatment::*;
pub use tooth::*;
pub use treatment::*;
