pub mod outcome;
pub mod print;
pub mod procedure;
pub mod resource;
pub mod worklist;

pub use outcome::*;
pub use print::PrintSettings;
pub use procedure::{PerformedProcedureStep, PerformedProcedureSteps};
pub use resource::{PatientSex, ResourceType};
pub use worklist::{Worklist, WorklistItem, WorklistRequest};
