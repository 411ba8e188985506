//! Archive operations on top of a blocking [`Transport`].
//!
//! Each method maps one archive capability to a REST resource, issues a
//! single request (two for operations that first resolve a public id) and
//! decodes the answer into an [`Outcome`]. Nothing here returns an error:
//! transport failures, error statuses and malformed payloads all end up in
//! `success()` and default-valued results.

mod print;
mod worklist;


pub use worklist::{patient_name_filter, start_date_range};

use archive_api::{ApiConfig, CallResult, HttpTransport, Method, Transport};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::{
    AeTitleOutcome, EchoOutcome, MediaOutcome, ModalitiesOutcome, Outcome,
    PerformedProcedureStep, PrintOutcome, PrintSettings, ReloadOutcome, RemoveOutcome,
    ResourceType, ResourcesOutcome, SpsOutcome, StoreOutcome, WorklistOutcome, WorklistRequest,
};

/// Blocking archive operations
#[derive(Debug)]
pub struct Operations<T> {
    transport: T,
}

impl Operations<HttpTransport> {
    /// Operations against `host` on the standard archive port
    pub fn with_host(host: impl Into<String>) -> Self {
        Self::new(HttpTransport::new(ApiConfig::with_host(host)))
    }
}

impl<T: Transport> Operations<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn call(&self, resource: &str, method: Method, body: &[u8]) -> CallResult {
        self.transport.execute(resource, method, body)
    }

    /// Outcome for calls that only report whether the archive accepted them
    fn accepted(result: CallResult) -> Outcome<bool> {
        Outcome::new(result.server_ok, result.resource_found)
    }

    /// C-ECHO a configured modality.
    ///
    /// `success()` means the archive answered; the result tells whether the
    /// echo itself succeeded.
    pub fn echo(&self, modality: &str) -> EchoOutcome {
        let result = self.call(&format!("modalities/{}/echo", modality), Method::Post, &[]);
        info!(
            "C-ECHO {}: server_ok={}, succeeded={}",
            modality, result.server_ok, result.resource_found
        );
        Self::accepted(result)
    }

    /// Names of the modalities configured on the archive
    pub fn list_modalities(&self) -> ModalitiesOutcome {
        let result = self.call("modalities", Method::Get, &[]);
        Self::string_list(result)
    }

    /// Public ids of every resource at `kind` level
    pub fn list_resources(&self, kind: ResourceType) -> ResourcesOutcome {
        let result = self.call(kind.resource_name(), Method::Get, &[]);
        Self::string_list(result)
    }

    fn string_list(result: CallResult) -> Outcome<Vec<String>> {
        if !result.server_ok {
            return Outcome::failed();
        }
        let values = if result.resource_found {
            decode_string_array(&result.answer)
        } else {
            Vec::new()
        };
        Outcome::new(true, values)
    }

    /// Resolve a DICOM identifier to the archive's public id.
    ///
    /// Returns an empty string when the lookup fails.
    pub(crate) fn public_id(&self, kind: ResourceType, id: &str) -> String {
        let result = self.call(
            &format!("public-id/{}/{}", kind.resource_name(), id),
            Method::Get,
            &[],
        );
        if !result.is_success() {
            debug!("No public id for {} '{}'", kind, id);
            return String::new();
        }
        serde_json::from_slice::<Value>(&result.answer)
            .ok()
            .and_then(|v| v.get(0).and_then(Value::as_str).map(str::to_string))
            .unwrap_or_default()
    }

    /// Download the DICOMDIR media archive (ZIP) of a resource
    pub fn media(&self, kind: ResourceType, id: &str) -> MediaOutcome {
        let public_id = self.public_id(kind, id);
        let result = self.call(
            &format!("{}/{}/media", kind.resource_name(), public_id),
            Method::Get,
            &[],
        );
        if !result.server_ok {
            return Outcome::failed();
        }
        let raw = if result.resource_found {
            result.answer
        } else {
            Vec::new()
        };
        debug!("Media for {} '{}': {} bytes", kind, id, raw.len());
        Outcome::new(true, raw)
    }

    /// Query the modality worklist through the archive.
    ///
    /// Items are only decoded when the query succeeded; a failed query on a
    /// reachable archive is still `success()` with an empty worklist.
    pub fn worklist(&self, modality: &str, request: &WorklistRequest) -> WorklistOutcome {
        let body = worklist::encode_request(request);
        let result = self.call(&format!("modalities/{}/sps-find", modality), Method::Post, &body);
        if !result.server_ok {
            return Outcome::failed();
        }
        let items = if result.resource_found {
            worklist::decode_response(&result.answer)
        } else {
            Vec::new()
        };
        info!("Worklist from {}: {} item(s)", modality, items.len());
        Outcome::new(true, items)
    }

    /// C-STORE a resource to a modality
    pub fn store(&self, kind: ResourceType, id: &str, modality: &str) -> StoreOutcome {
        let public_id = self.public_id(kind, id);
        let result = self.call(
            &format!("modalities/{}/store", modality),
            Method::Post,
            public_id.as_bytes(),
        );
        info!("C-STORE {} '{}' to {}: {}", kind, id, modality, result.resource_found);
        Self::accepted(result)
    }

    /// Print a bitmap on a DICOM printer modality.
    ///
    /// A bitmap that cannot be encoded as PNG fails the outcome without
    /// contacting the archive.
    pub fn print(&self, modality: &str, settings: &PrintSettings) -> PrintOutcome {
        let body = match print::encode_request(settings) {
            Ok(body) => body,
            Err(e) => {
                warn!("Print job for {} not sent: {}", modality, e);
                return Outcome::failed();
            }
        };
        let result = self.call(&format!("modalities/{}/print", modality), Method::Post, &body);
        Self::accepted(result)
    }

    /// Mark a scheduled procedure step as started
    pub fn sps_start(&self, modality: &str, uuid: &str) -> SpsOutcome {
        let result = self.call(
            &format!("modalities/{}/sps-start/{}", modality, uuid),
            Method::Post,
            &[],
        );
        Self::accepted(result)
    }

    /// Cancel the running procedure step
    pub fn sps_cancel(&self, modality: &str) -> SpsOutcome {
        let result = self.call(&format!("modalities/{}/sps-cancel", modality), Method::Post, &[]);
        Self::accepted(result)
    }

    /// Complete the running procedure step with the performed steps, in order
    pub fn sps_complete(&self, modality: &str, steps: &[PerformedProcedureStep]) -> SpsOutcome {
        let body = match serde_json::to_vec(steps) {
            Ok(body) => body,
            Err(e) => {
                warn!("Performed steps for {} not serializable: {}", modality, e);
                return Outcome::failed();
            }
        };
        let result = self.call(
            &format!("modalities/{}/sps-complete", modality),
            Method::Post,
            &body,
        );
        Self::accepted(result)
    }

    /// AE title configured for `modality`.
    ///
    /// A modality missing from the archive's configuration fails the outcome
    /// even though the request itself succeeded.
    pub fn ae_title(&self, modality: &str) -> AeTitleOutcome {
        let result = self.call("modalities?expand", Method::Get, &[]);
        if !result.is_success() {
            return Outcome::failed();
        }
        match decode_ae_title(&result.answer, modality) {
            Some(ae_title) => Outcome::new(true, ae_title),
            None => {
                debug!("Modality '{}' not configured on the archive", modality);
                Outcome::failed()
            }
        }
    }

    /// Delete a resource by public id
    pub fn remove(&self, kind: ResourceType, id: &str) -> RemoveOutcome {
        let result = self.call(&format!("{}/{}", kind.resource_name(), id), Method::Delete, &[]);
        let removed = result.is_success();
        Outcome::new(removed, removed)
    }

    /// Ask the archive to reload its configuration
    pub fn reload(&self) -> ReloadOutcome {
        let result = self.call("tools/reload", Method::Post, &[]);
        Self::accepted(result)
    }

    /// Restart the archive; the answer is ignored
    pub fn restart(&self) {
        let result = self.call("tools/reset", Method::Post, &[]);
        info!("Archive restart requested (server_ok={})", result.server_ok);
    }
}

/// JSON array of strings; non-string entries become empty strings
fn decode_string_array(answer: &[u8]) -> Vec<String> {
    match serde_json::from_slice::<Value>(answer) {
        Ok(Value::Array(values)) => values
            .iter()
            .map(|v| v.as_str().unwrap_or_default().to_string())
            .collect(),
        Ok(other) => {
            debug!("Expected a JSON array, got {}", other);
            Vec::new()
        }
        Err(e) => {
            debug!("Answer is not JSON: {}", e);
            Vec::new()
        }
    }
}

/// Look up `modality` in the `modalities?expand` answer.
///
/// Entries are either `[aet, host, port, ...]` arrays or objects with an
/// `AET` key, depending on the archive version.
fn decode_ae_title(answer: &[u8], modality: &str) -> Option<String> {
    let json: Value = serde_json::from_slice(answer).ok()?;
    let entry = json.as_object()?.get(modality)?;
    let ae_title = match entry {
        Value::Array(values) => values.first().and_then(Value::as_str),
        Value::Object(fields) => fields.get("AET").and_then(Value::as_str),
        _ => None,
    };
    Some(ae_title.unwrap_or_default().to_string())
}
