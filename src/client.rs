//! Non-blocking facade over [`Operations`].
//!
//! Every call captures its arguments, runs the blocking operation on a
//! [`WorkerPool`] thread and returns a [`Pending`] handle resolving to the
//! same outcome the blocking call would have produced.

use std::sync::Arc;

use archive_api::{ApiConfig, HttpTransport, Transport};

use crate::globals;
use crate::models::{
    Outcome, PerformedProcedureStep, PrintSettings, ResourceType, Worklist, WorklistRequest,
};
use crate::operations::Operations;
use crate::pool::{Pending, WorkerPool};

/// Asynchronous archive client
pub struct Orthanc<T = HttpTransport> {
    operations: Arc<Operations<T>>,
    pool: Arc<WorkerPool>,
}

impl<T> Clone for Orthanc<T> {
    fn clone(&self) -> Self {
        Self {
            operations: Arc::clone(&self.operations),
            pool: Arc::clone(&self.pool),
        }
    }
}

impl Orthanc<HttpTransport> {
    /// Client for the current process-wide default host
    pub fn new() -> Self {
        Self::with_host(globals::host())
    }

    /// Client for `host`, regardless of the process-wide default
    pub fn with_host(host: impl Into<String>) -> Self {
        Self::with_transport(
            HttpTransport::new(ApiConfig::with_host(host)),
            WorkerPool::global(),
        )
    }

    /// Change the default host used by clients created afterwards
    pub fn set_host(host: impl Into<String>) {
        globals::set_host(host);
    }

    pub fn host() -> String {
        globals::host()
    }

    /// Host this client sends requests to
    pub fn target(&self) -> &ApiConfig {
        self.operations.transport().config()
    }
}

impl Default for Orthanc<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport + 'static> Orthanc<T> {
    pub fn with_transport(transport: T, pool: Arc<WorkerPool>) -> Self {
        Self {
            operations: Arc::new(Operations::new(transport)),
            pool,
        }
    }

    /// Blocking operations behind this client
    pub fn operations(&self) -> &Operations<T> {
        &self.operations
    }

    fn submit<R, F>(&self, task: F) -> Pending<R>
    where
        F: FnOnce(&Operations<T>) -> Outcome<R> + Send + 'static,
        R: Send + 'static,
    {
        let operations = Arc::clone(&self.operations);
        self.pool.submit(move || task(&operations))
    }

    pub fn echo(&self, modality: &str) -> Pending<bool> {
        let modality = modality.to_string();
        self.submit(move |ops| ops.echo(&modality))
    }

    pub fn list_modalities(&self) -> Pending<Vec<String>> {
        self.submit(|ops| ops.list_modalities())
    }

    pub fn list_resources(&self, kind: ResourceType) -> Pending<Vec<String>> {
        self.submit(move |ops| ops.list_resources(kind))
    }

    pub fn media(&self, kind: ResourceType, id: &str) -> Pending<Vec<u8>> {
        let id = id.to_string();
        self.submit(move |ops| ops.media(kind, &id))
    }

    pub fn worklist(&self, modality: &str, request: &WorklistRequest) -> Pending<Worklist> {
        let modality = modality.to_string();
        let request = request.clone();
        self.submit(move |ops| ops.worklist(&modality, &request))
    }

    pub fn store(&self, kind: ResourceType, id: &str, modality: &str) -> Pending<bool> {
        let id = id.to_string();
        let modality = modality.to_string();
        self.submit(move |ops| ops.store(kind, &id, &modality))
    }

    pub fn print(&self, modality: &str, settings: &PrintSettings) -> Pending<bool> {
        let modality = modality.to_string();
        let settings = settings.clone();
        self.submit(move |ops| ops.print(&modality, &settings))
    }

    pub fn sps_start(&self, modality: &str, uuid: &str) -> Pending<bool> {
        let modality = modality.to_string();
        let uuid = uuid.to_string();
        self.submit(move |ops| ops.sps_start(&modality, &uuid))
    }

    pub fn sps_cancel(&self, modality: &str) -> Pending<bool> {
        let modality = modality.to_string();
        self.submit(move |ops| ops.sps_cancel(&modality))
    }

    pub fn sps_complete(&self, modality: &str, steps: &[PerformedProcedureStep]) -> Pending<bool> {
        let modality = modality.to_string();
        let steps = steps.to_vec();
        self.submit(move |ops| ops.sps_complete(&modality, &steps))
    }

    pub fn ae_title(&self, modality: &str) -> Pending<String> {
        let modality = modality.to_string();
        self.submit(move |ops| ops.ae_title(&modality))
    }

    pub fn remove(&self, kind: ResourceType, id: &str) -> Pending<bool> {
        let id = id.to_string();
        self.submit(move |ops| ops.remove(kind, &id))
    }

    pub fn reload(&self) -> Pending<bool> {
        self.submit(|ops| ops.reload())
    }

    /// Fire-and-forget restart of the archive
    pub fn restart(&self) {
        let operations = Arc::clone(&self.operations);
        self.pool.detach(move || operations.restart());
    }
}
