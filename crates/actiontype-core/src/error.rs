use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("not initialized: run 'actiontypes config init'")]
    NotInitialized,

    #[error("missing required field(s): {0}")]
    MissingRequiredField(String),

    #[error("invalid JSON in {0}")]
    InvalidStructuredField(String),

    #[error("invalid number in {0}: value does not fit an unsigned 64-bit integer")]
    InvalidNumericField(String),

    #[error("invalid version '{0}': not one of the configured options")]
    InvalidVersion(String),

    #[error("invalid schema payload type '{0}': expected JSON, AVRO or ProtoBuf")]
    InvalidPayloadType(String),

    #[error("transport failure: {0}")]
    TransportFailure(String),

    #[error("nothing to confirm: submit the form first")]
    NothingToConfirm,

    #[error("a confirmation is already in flight")]
    ConfirmPending,

    #[error("action type not found: {0}")]
    ActionTypeNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AdminError {
    /// Validation failures the user can fix by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AdminError::MissingRequiredField(_)
                | AdminError::InvalidStructuredField(_)
                | AdminError::InvalidNumericField(_)
                | AdminError::InvalidVersion(_)
                | AdminError::InvalidPayloadType(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
