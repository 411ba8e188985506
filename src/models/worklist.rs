use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::resource::PatientSex;

/// Filter for a modality worklist query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorklistRequest {
    /// Free-text patient name; spaces match any single character
    pub patient_name: String,
    pub sex: PatientSex,
    pub modality: String,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
}

/// One scheduled procedure step returned by the archive.
///
/// Dates and times that are absent or malformed are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorklistItem {
    /// Display name (`^` separators replaced by spaces)
    pub patient_name: String,
    /// Name exactly as the archive returned it
    pub dicom_patient_name: String,
    pub patient_birth_date: Option<NaiveDate>,
    pub sex: PatientSex,
    pub modality: String,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub description: String,
    pub uuid: String,
    pub patient_id: String,
    pub study_instance_uid: String,
    pub accession_number: String,
}

pub type Worklist = Vec<WorklistItem>;
