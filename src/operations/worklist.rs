use chrono::{NaiveDate, NaiveTime};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::models::{PatientSex, Worklist, WorklistItem, WorklistRequest};

const DICOM_DATE_FORMAT: &str = "%Y%m%d";
const DICOM_TIME_FORMAT: &str = "%H%M%S";

/// Fuzzy `PatientName` matcher: `John Doe` becomes `*John?Doe*`
pub fn patient_name_filter(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!("*{}*", name.replace(' ', "?"))
    }
}

/// `ScheduledProcedureStepStartDate` range, empty when unbounded
pub fn start_date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    if from.is_none() && to.is_none() {
        return String::new();
    }
    let render = |date: Option<NaiveDate>| {
        date.map(|d| d.format(DICOM_DATE_FORMAT).to_string())
            .unwrap_or_default()
    };
    format!("{}-{}", render(from), render(to))
}

pub(super) fn encode_request(request: &WorklistRequest) -> Vec<u8> {
    json!({
        "PatientName": patient_name_filter(&request.patient_name),
        "PatientSex": request.sex.code(),
        "ScheduledProcedureStepSequence": [{
            "Modality": request.modality,
            "ScheduledProcedureStepStartDate":
                start_date_range(request.start_date_from, request.start_date_to),
        }],
    })
    .to_string()
    .into_bytes()
}

pub(super) fn decode_response(answer: &[u8]) -> Worklist {
    let json: Value = match serde_json::from_slice(answer) {
        Ok(json) => json,
        Err(e) => {
            debug!("Worklist answer is not JSON: {}", e);
            return Worklist::new();
        }
    };
    json.as_array()
        .map(|items| items.iter().filter_map(Value::as_object).map(decode_item).collect())
        .unwrap_or_default()
}

fn decode_item(obj: &Map<String, Value>) -> WorklistItem {
    let field = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let date = |key: &str| NaiveDate::parse_from_str(&field(key), DICOM_DATE_FORMAT).ok();

    let dicom_patient_name = field("PatientName");
    WorklistItem {
        patient_name: dicom_patient_name.replace('^', " "),
        patient_birth_date: date("PatientBirthDate"),
        sex: PatientSex::from_code(&field("PatientSex")),
        modality: field("Modality"),
        start_date: date("StartDate"),
        start_time: NaiveTime::parse_from_str(&field("StartTime"), DICOM_TIME_FORMAT).ok(),
        description: field("Description"),
        uuid: field("UUID"),
        patient_id: field("PatientID"),
        study_instance_uid: field("StudyInstanceUID"),
        accession_number: field("AccessionNumber"),
        dicom_patient_name,
    }
}
