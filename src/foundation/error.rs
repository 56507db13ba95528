use thiserror::Error;

/// Crate-wide result alias.
pub type RoutelapseResult<T> = Result<T, RoutelapseError>;

/// Error type shared by every layer of the crate.
#[derive(Debug, Error)]
pub enum RoutelapseError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("projection error: {0}")]
    Projection(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RoutelapseError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn projection(msg: impl Into<String>) -> Self {
        Self::Projection(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
