use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Failure to bind an encoder during resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BindingError {
    #[error("Encoder for `{type_name}` was not found in the registry")]
    NotFound { type_name: &'static str },

    #[error("Encoder type mismatch: expected an encoder of `{expected}`, found one of `{found}`")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Delegate slot for `{type_name}` is already bound")]
    AlreadyBound { type_name: &'static str },
}

/// Failure while writing a value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("Delegate slot for `{type_name}` was used before resolution")]
    Unresolved { type_name: &'static str },

    #[error("No encoder registered for `{type_name}`")]
    NotRegistered { type_name: &'static str },

    #[error("Invalid generator state: {0}")]
    InvalidState(&'static str),

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Utf8(#[from] alloc::string::FromUtf8Error),
}
