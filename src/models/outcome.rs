use serde::Serialize;

use crate::models::worklist::Worklist;

/// Decoded result of an archive operation.
///
/// `success` is derived per operation (see the operation docs); `result`
/// holds the decoded payload, or its default value when there is none.
/// Values are only produced by the operations layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Outcome<R> {
    success: bool,
    result: R,
}

impl<R> Outcome<R> {
    pub(crate) fn new(success: bool, result: R) -> Self {
        Self { success, result }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn result(&self) -> &R {
        &self.result
    }

    pub fn into_result(self) -> R {
        self.result
    }
}

impl<R: Default> Outcome<R> {
    /// Failed outcome carrying the default payload
    pub(crate) fn failed() -> Self {
        Self::new(false, R::default())
    }
}

pub type EchoOutcome = Outcome<bool>;
pub type ModalitiesOutcome = Outcome<Vec<String>>;
pub type MediaOutcome = Outcome<Vec<u8>>;
pub type WorklistOutcome = Outcome<Worklist>;
pub type StoreOutcome = Outcome<bool>;
pub type PrintOutcome = Outcome<bool>;
pub type SpsOutcome = Outcome<bool>;
pub type AeTitleOutcome = Outcome<String>;
pub type ReloadOutcome = Outcome<bool>;
pub type ResourcesOutcome = Outcome<Vec<String>>;
pub type RemoveOutcome = Outcome<bool>;
