/// Convenience result type used across vignette.
pub type VignetteResult<T> = Result<T, VignetteError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum VignetteError {
    /// Invalid scene records, options, or catalog files.
    #[error("validation error: {0}")]
    Validation(String),

    /// A scene catalog failed, returned nothing, or returned a batch that cannot be installed.
    #[error("provider failure: {0}")]
    Provider(String),

    /// Frame clock or trajectory invariant violations.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VignetteError {
    /// Build a [`VignetteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VignetteError::Provider`] value.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Build a [`VignetteError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`VignetteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Message without the category prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::Provider(msg)
            | Self::Evaluation(msg)
            | Self::Serde(msg) => msg.clone(),
            Self::Other(e) => e.to_string(),
        }
    }

    /// Re-classify any error raised while accepting a catalog batch as a provider failure.
    pub(crate) fn into_provider(self) -> Self {
        match self {
            Self::Provider(_) => self,
            other => Self::Provider(other.detail()),
        }
    }

    /// `true` for errors that belong to the provider-failure class.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
