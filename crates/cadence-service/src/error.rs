use thiserror::Error;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RecurError(#[from] cadence_recur::RecurError),

    #[error("Conflict: {0}")]
    Conflict(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
