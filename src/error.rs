use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationError;

/// Failures at the HTTP seam
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// The user-visible error taxonomy of the stores.
///
/// `Display` is exactly the banner text a store records in its `error` field;
/// the transport cause stays available through `source()` for logging.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error fetching {what}")]
    Fetch {
        what: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("Error submitting query")]
    Submit(#[source] ApiError),
}

impl StoreError {
    pub fn fetch(what: &'static str, source: ApiError) -> Self {
        StoreError::Fetch { what, source }
    }

    /// Log the failure with its cause and return the banner text
    pub(crate) fn into_banner(self) -> String {
        match &self {
            StoreError::Validation(_) => log::warn!("{}", self),
            StoreError::Fetch { source, .. } | StoreError::Submit(source) => {
                log::error!("{}: {}", self, source)
            }
        }
        self.to_string()
    }
}

impl Serialize for StoreError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
