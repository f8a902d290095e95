use thiserror::Error;

/// Failures talking to the remote library.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LibraryError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for LibraryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LibraryError::Decode(err.to_string())
        } else {
            LibraryError::Network(err.to_string())
        }
    }
}

/// Invalid requests against queue or page state. Callers treat these as no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no modal to close")]
    EmptyModalStack,

    #[error("cannot switch page while a modal is open")]
    ModalOpen,
}
