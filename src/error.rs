use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The message reported by the upstream API, without the variant prefix.
    pub fn upstream_message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::Forbidden(msg)
            | AppError::GitHubApi(msg)
            | AppError::Config(msg)
            | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<octocrab::Error> for AppError {
    fn from(e: octocrab::Error) -> Self {
        match &e {
            octocrab::Error::GitHub { source, .. } => match source.status_code.as_u16() {
                404 => AppError::NotFound(source.message.clone()),
                403 => AppError::Forbidden(source.message.clone()),
                _ => AppError::GitHubApi(source.message.clone()),
            },
            _ => AppError::GitHubApi(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
