/// Convenience result type used across aviary.
pub type AviaryResult<T> = Result<T, AviaryError>;

/// Top-level error taxonomy used by library APIs.
///
/// None of these are meant to terminate a scene: callers at the flock boundary log them and
/// degrade (skip the creature, or fall back to a static frame).
#[derive(thiserror::Error, Debug)]
pub enum AviaryError {
    /// Invalid user-provided or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The raster backend could not produce a frame sheet, or the sheet cache is inconsistent.
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// An agent referenced an animation or sheet that was never synthesized.
    #[error("missing resource: {0}")]
    MissingResource(String),

    /// Errors while reading or decoding scene configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AviaryError {
    /// Build a [`AviaryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`AviaryError::Synthesis`] value.
    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    /// Build a [`AviaryError::MissingResource`] value.
    pub fn missing_resource(msg: impl Into<String>) -> Self {
        Self::MissingResource(msg.into())
    }

    /// Build a [`AviaryError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
