use archive_api::DEFAULT_HOST;
use once_cell::sync::Lazy;
use std::sync::RwLock;

/// Process-wide default archive host.
///
/// Read when a client is constructed; clients keep their own copy, so a
/// later [`set_host`] never changes the target of a call already in flight.
static HOST_CELL: Lazy<RwLock<String>> = Lazy::new(|| RwLock::new(DEFAULT_HOST.to_string()));

pub fn set_host(host: impl Into<String>) {
    let mut cell = HOST_CELL.write().unwrap_or_else(|e| e.into_inner());
    *cell = host.into();
}

pub fn host() -> String {
    HOST_CELL.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Restore the default host. Primarily for testing purposes.
pub fn reset_host() {
    set_host(DEFAULT_HOST);
}
