use serde::{Deserialize, Serialize};

/// Archive resource levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Patient,
    Study,
    Series,
    Instance,
}

impl ResourceType {
    /// Path segment used by the REST API for this level
    pub fn resource_name(&self) -> &'static str {
        match self {
            ResourceType::Patient => "patients",
            ResourceType::Study => "studies",
            ResourceType::Series => "series",
            ResourceType::Instance => "instances",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.resource_name())
    }
}

/// DICOM patient sex (0010,0040)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PatientSex {
    Male,
    Female,
    Other,
    #[default]
    None,
}

impl PatientSex {
    const ALL: [PatientSex; 4] = [
        PatientSex::Male,
        PatientSex::Female,
        PatientSex::Other,
        PatientSex::None,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PatientSex::Male => "M",
            PatientSex::Female => "F",
            PatientSex::Other => "O",
            PatientSex::None => "",
        }
    }

    /// Reverse lookup of [`PatientSex::code`]; unknown codes map to `None`
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|sex| sex.code() == code)
            .unwrap_or(PatientSex::None)
    }
}
