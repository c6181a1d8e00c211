/// Convenience result type used across tagmint.
pub type TagResult<T> = Result<T, TagError>;

/// Top-level error taxonomy used by the compositing and tag APIs.
#[derive(thiserror::Error, Debug)]
pub enum TagError {
    /// The operation needs an alpha channel or a channel layout the input lacks.
    #[error("format error: {0}")]
    Format(String),

    /// A region, mask or alpha plane does not match the buffer it is combined with.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// A corner radius does not fit the target rectangle.
    #[error("invalid radius: {0}")]
    InvalidRadius(String),

    /// Invalid user-provided style or configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// The text collaborator could not lay out or rasterize a string.
    #[error("text error: {0}")]
    Text(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TagError {
    /// Build a [`TagError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`TagError::SizeMismatch`] value.
    pub fn size_mismatch(msg: impl Into<String>) -> Self {
        Self::SizeMismatch(msg.into())
    }

    /// Build a [`TagError::InvalidRadius`] value.
    pub fn invalid_radius(msg: impl Into<String>) -> Self {
        Self::InvalidRadius(msg.into())
    }

    /// Build a [`TagError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TagError::Text`] value.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
