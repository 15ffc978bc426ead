// Error types shared across services

/// Unified outcome of every remote call. Callers can tell success, not-found,
/// and transport failure apart without inspecting logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("appwrite rejected the request ({status}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
