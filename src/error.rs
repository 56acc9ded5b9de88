use thiserror::Error;

/// Failure kinds shared by the scan and analyze operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed caller request.
    #[error("{0}")]
    InvalidInput(String),

    /// A required credential is not configured.
    #[error("{0}")]
    Configuration(String),

    /// The tracker or the LLM endpoint answered with a non-success status.
    #[error("{message}")]
    Upstream {
        message: String,
        status: u16,
        details: String,
    },

    #[error("{0}")]
    NotFound(String),

    /// Reading or writing the issue store failed.
    #[error("{message}: {source:#}")]
    Persistence {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn persistence(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Persistence {
            message: message.into(),
            source,
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Upstream { status, .. } => *status,
            Self::Configuration(_) | Self::Persistence { .. } | Self::Http(_) | Self::Internal(_) => {
                500
            }
        }
    }

    /// Short message for the `error` field of a response body.
    pub fn message(&self) -> String {
        match self {
            Self::Upstream { message, .. } | Self::Persistence { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Supporting detail for the `details` field, when there is one.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Upstream { details, .. } => Some(details.clone()),
            Self::Persistence { source, .. } => Some(format!("{source:#}")),
            _ => None,
        }
    }
}
