use serde::{Deserialize, Serialize};

/// A performed step reported when completing a scheduled procedure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PerformedProcedureStep {
    pub operators_name: String,
    #[serde(rename = "SeriesInstanceUID")]
    pub series_instance_uid: String,
    #[serde(rename = "RetrieveAETitle")]
    pub retrieve_ae_title: String,
}

pub type PerformedProcedureSteps = Vec<PerformedProcedureStep>;
